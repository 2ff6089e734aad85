//! Option-chain CSV reader.
//!
//! Exported chains start with free-form metadata lines (underlying, quote
//! time, ...) followed by a headered table:
//! ```text
//! Underlying,XYZ
//! Date,2024-01-05
//! Strike_Price,Call_Bid,Call_Ask,Put_Bid,Put_Ask
//! 95,6.10,6.30,1.05,1.15
//! 100,-,3.20,2.90,3.05
//! ```
//! Cells that are not numbers (`-`, `N/A`, blank) become `None`.

use std::path::Path;

use pricer_models::instruments::OptionSide;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::LoaderError;

/// Header of the strike column; also marks the start of the table.
pub const STRIKE_HEADER: &str = "Strike_Price";

const REQUIRED_COLUMNS: [&str; 5] = [STRIKE_HEADER, "Call_Bid", "Call_Ask", "Put_Bid", "Put_Ask"];

/// Bid/ask quotes for one strike.
///
/// # Examples
/// ```
/// use adapter_loader::OptionQuote;
///
/// let quote = OptionQuote {
///     strike: 100.0,
///     call_bid: Some(3.0),
///     call_ask: Some(3.2),
///     put_bid: None,
///     put_ask: Some(2.9),
/// };
/// assert!((quote.call_mid().unwrap() - 3.1).abs() < 1e-12);
/// assert_eq!(quote.put_mid(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Strike price
    #[serde(rename = "Strike_Price")]
    pub strike: f64,
    /// Call bid
    #[serde(rename = "Call_Bid", deserialize_with = "csv::invalid_option")]
    pub call_bid: Option<f64>,
    /// Call ask
    #[serde(rename = "Call_Ask", deserialize_with = "csv::invalid_option")]
    pub call_ask: Option<f64>,
    /// Put bid
    #[serde(rename = "Put_Bid", deserialize_with = "csv::invalid_option")]
    pub put_bid: Option<f64>,
    /// Put ask
    #[serde(rename = "Put_Ask", deserialize_with = "csv::invalid_option")]
    pub put_ask: Option<f64>,
}

fn midpoint(bid: Option<f64>, ask: Option<f64>) -> Option<f64> {
    match (bid, ask) {
        (Some(bid), Some(ask)) if bid >= 0.0 && ask >= bid => Some(0.5 * (bid + ask)),
        _ => None,
    }
}

impl OptionQuote {
    /// Call mid price, if both sides are quoted and `ask ≥ bid ≥ 0`.
    pub fn call_mid(&self) -> Option<f64> {
        midpoint(self.call_bid, self.call_ask)
    }

    /// Put mid price, if both sides are quoted and `ask ≥ bid ≥ 0`.
    pub fn put_mid(&self) -> Option<f64> {
        midpoint(self.put_bid, self.put_ask)
    }

    /// Mid price for `side`.
    pub fn mid(&self, side: OptionSide) -> Option<f64> {
        match side {
            OptionSide::Call => self.call_mid(),
            OptionSide::Put => self.put_mid(),
        }
    }
}

/// Parsed option chain: metadata lines plus one quote per strike.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionChain {
    metadata: Vec<String>,
    quotes: Vec<OptionQuote>,
    skipped_rows: usize,
}

impl OptionChain {
    /// Creates a chain from already-parsed parts.
    pub fn new(metadata: Vec<String>, quotes: Vec<OptionQuote>) -> Self {
        Self {
            metadata,
            quotes,
            skipped_rows: 0,
        }
    }

    /// Raw lines that preceded the table.
    pub fn metadata(&self) -> &[String] {
        &self.metadata
    }

    /// Quotes in file order.
    pub fn quotes(&self) -> &[OptionQuote] {
        &self.quotes
    }

    /// Strikes in file order.
    pub fn strikes(&self) -> Vec<f64> {
        self.quotes.iter().map(|quote| quote.strike).collect()
    }

    /// Number of table rows dropped because the strike was unreadable.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Number of quotes.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if the chain has no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// Reader for option-chain CSV exports.
///
/// By default the table starts at the first line beginning with
/// `Strike_Price`; [`OptionChainReader::metadata_rows`] fixes the number of
/// metadata lines instead.
///
/// # Examples
/// ```
/// use adapter_loader::OptionChainReader;
///
/// let content = "\
/// Underlying,XYZ
/// Strike_Price,Call_Bid,Call_Ask,Put_Bid,Put_Ask
/// 100, 3.0, 3.2, 2.8, 3.0
/// 105, 1.1, 1.3, -, 6.0
/// ";
/// let chain = OptionChainReader::new().read_str(content).unwrap();
/// assert_eq!(chain.metadata(), ["Underlying,XYZ"]);
/// assert_eq!(chain.strikes(), vec![100.0, 105.0]);
/// assert_eq!(chain.quotes()[1].put_bid, None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionChainReader {
    metadata_rows: Option<usize>,
}

impl OptionChainReader {
    /// Creates a reader that locates the header row automatically.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treats exactly the first `rows` lines as metadata.
    pub fn metadata_rows(mut self, rows: usize) -> Self {
        self.metadata_rows = Some(rows);
        self
    }

    /// Reads a chain from a file.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<OptionChain, LoaderError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let chain = self.read_str(&content)?;
        info!(
            path = %path.display(),
            quotes = chain.len(),
            skipped = chain.skipped_rows(),
            "Loaded option chain"
        );
        Ok(chain)
    }

    /// Reads a chain from in-memory CSV text.
    ///
    /// # Errors
    /// - `LoaderError::MissingHeader` if no header row is found or a required
    ///   column is absent
    /// - `LoaderError::Csv` on malformed CSV
    pub fn read_str(&self, content: &str) -> Result<OptionChain, LoaderError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let lines: Vec<&str> = content.lines().collect();
        let header_index = match self.metadata_rows {
            Some(rows) if rows < lines.len() => rows,
            Some(_) => return Err(LoaderError::missing_header(STRIKE_HEADER)),
            None => lines
                .iter()
                .position(|line| is_header_line(line))
                .ok_or_else(|| LoaderError::missing_header(STRIKE_HEADER))?,
        };

        let metadata = lines[..header_index]
            .iter()
            .map(|line| line.to_string())
            .collect();
        let table = lines[header_index..].join("\n");

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(table.as_bytes());
        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(LoaderError::missing_header(column));
            }
        }

        let mut quotes = Vec::new();
        let mut skipped_rows = 0;
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }
            match record.deserialize::<OptionQuote>(Some(&headers)) {
                Ok(quote) => quotes.push(quote),
                Err(err) => {
                    warn!(row = index + 1, error = %err, "Skipping option-chain row");
                    skipped_rows += 1;
                }
            }
        }

        Ok(OptionChain {
            metadata,
            quotes,
            skipped_rows,
        })
    }
}

fn is_header_line(line: &str) -> bool {
    let first = line.split(',').next().unwrap_or_default();
    first.trim().trim_matches('"') == STRIKE_HEADER
}
