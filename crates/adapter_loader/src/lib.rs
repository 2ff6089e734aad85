//! # Adapter Loader
//!
//! File-facing edge of the option analytics workspace.
//!
//! This crate provides:
//! - [`OptionChainReader`]: option-chain CSV exports with leading metadata lines
//! - [`StudyConfig`]: TOML study configuration with per-section defaults
//! - Report tables ([`pricing_table`], [`spot_ladder`], [`implied_vol_table`])
//!   and a CSV sink ([`write_csv`]) for external plotting tools
//!
//! No logging subscriber is installed here; events are emitted through
//! `tracing` for the embedding application to collect.
//!
//! ## Example
//!
//! ```
//! use adapter_loader::{implied_vol_table, write_csv, OptionChainReader, StudyConfig};
//!
//! let config = StudyConfig::default();
//! let chain = OptionChainReader::new()
//!     .read_str("Strike_Price,Call_Bid,Call_Ask,Put_Bid,Put_Ask\n1.0,0.14,0.15,0.07,0.08\n")
//!     .unwrap();
//!
//! let rows = implied_vol_table(
//!     &chain,
//!     config.market.spot,
//!     config.market.rate,
//!     config.option.expiry,
//!     &config.implied_vol,
//! );
//! assert!(rows.iter().all(|row| row.implied_vol.is_some()));
//!
//! let mut out = Vec::new();
//! write_csv(&rows, &mut out).unwrap();
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod option_chain;
pub mod tables;

pub use config::{LatticeSection, MarketSection, OptionSection, StudyConfig};
pub use error::LoaderError;
pub use option_chain::{OptionChain, OptionChainReader, OptionQuote, STRIKE_HEADER};
pub use tables::{
    implied_vol_table, pricing_table, spot_ladder, write_csv, write_csv_path, ImpliedVolRow,
    PricingRow,
};
