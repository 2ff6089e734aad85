//! Report tables for prices, Greeks and implied volatilities.
//!
//! Rows serialise to CSV with one column per field; undefined Greeks and
//! unavailable implied volatilities become empty cells.

use std::io::Write;
use std::path::Path;

use pricer_models::analytical::{
    BlackScholes, ImpliedVolConfig, ImpliedVolQuote, ImpliedVolSolver, UnavailableReason,
};
use pricer_models::instruments::{MarketParameters, OptionSide, OptionSpec};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::LoaderError;
use crate::option_chain::OptionChain;

/// One closed-form valuation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingRow {
    /// Spot price
    pub spot: f64,
    /// Strike
    pub strike: f64,
    /// Maturity in years
    pub expiry: f64,
    /// Call or put
    pub side: OptionSide,
    /// Option value
    pub price: f64,
    /// ∂V/∂S
    pub delta: Option<f64>,
    /// ∂²V/∂S²
    pub gamma: Option<f64>,
    /// −∂V/∂T
    pub theta: Option<f64>,
    /// ∂V/∂r
    pub rho: Option<f64>,
    /// ∂V/∂σ
    pub vega: Option<f64>,
}

impl PricingRow {
    fn value(model: &BlackScholes, option: &OptionSpec) -> Self {
        let result = model.price_with_greeks(option);
        Self {
            spot: model.market().spot(),
            strike: option.strike(),
            expiry: option.expiry(),
            side: option.side(),
            price: result.price,
            delta: result.delta,
            gamma: result.gamma,
            theta: result.theta,
            rho: result.rho,
            vega: result.vega,
        }
    }
}

/// Prices and Greeks across a strike ladder.
///
/// # Errors
/// `LoaderError::Model` if `expiry` or any strike is not positive.
///
/// # Examples
/// ```
/// use adapter_loader::pricing_table;
/// use pricer_models::instruments::{MarketParameters, OptionSide};
///
/// let market = MarketParameters::new(1.0, 0.05, 0.3).unwrap();
/// let rows = pricing_table(&market, 1.4, &[0.9, 1.0, 1.1], OptionSide::Call).unwrap();
/// assert_eq!(rows.len(), 3);
/// assert!(rows[0].price > rows[2].price);
/// ```
pub fn pricing_table(
    market: &MarketParameters,
    expiry: f64,
    strikes: &[f64],
    side: OptionSide,
) -> Result<Vec<PricingRow>, LoaderError> {
    let model = BlackScholes::new(*market);
    strikes
        .iter()
        .map(|&strike| -> Result<PricingRow, LoaderError> {
            let option = OptionSpec::new(strike, expiry, side)?;
            Ok(PricingRow::value(&model, &option))
        })
        .collect()
}

/// Prices and Greeks of one option across a spot ladder.
///
/// # Errors
/// `LoaderError::Model` if any spot is not positive.
pub fn spot_ladder(
    market: &MarketParameters,
    option: &OptionSpec,
    spots: &[f64],
) -> Result<Vec<PricingRow>, LoaderError> {
    spots
        .iter()
        .map(|&spot| -> Result<PricingRow, LoaderError> {
            let shifted = MarketParameters::new(spot, market.rate(), market.volatility())?;
            Ok(PricingRow::value(&BlackScholes::new(shifted), option))
        })
        .collect()
}

/// Implied volatility for one strike and side of a chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpliedVolRow {
    /// Strike
    pub strike: f64,
    /// Call or put
    pub side: OptionSide,
    /// Mid price used for the inversion
    pub mid: Option<f64>,
    /// Implied volatility, if available
    pub implied_vol: Option<f64>,
    /// Why no implied volatility is available
    pub unavailable: Option<UnavailableReason>,
}

impl ImpliedVolRow {
    /// Creates a row from a mid price and its inversion outcome.
    pub fn new(strike: f64, side: OptionSide, mid: Option<f64>, quote: ImpliedVolQuote) -> Self {
        Self {
            strike,
            side,
            mid,
            implied_vol: quote.value(),
            unavailable: quote.reason(),
        }
    }

    /// The inversion outcome.
    pub fn quote(&self) -> ImpliedVolQuote {
        match (self.implied_vol, self.unavailable) {
            (Some(sigma), _) => ImpliedVolQuote::Available(sigma),
            (None, Some(reason)) => ImpliedVolQuote::Unavailable(reason),
            (None, None) => ImpliedVolQuote::Unavailable(UnavailableReason::MissingQuote),
        }
    }
}

/// Implied volatilities of every call and put mid in a chain.
///
/// Rows come strike by strike, calls before puts. Quotes without a usable
/// mid are reported as `MissingQuote`; failed inversions carry their reason.
pub fn implied_vol_table(
    chain: &OptionChain,
    spot: f64,
    rate: f64,
    expiry: f64,
    config: &ImpliedVolConfig,
) -> Vec<ImpliedVolRow> {
    let solver = ImpliedVolSolver::new(*config);
    let rows: Vec<ImpliedVolRow> = chain
        .quotes()
        .iter()
        .flat_map(|quote| {
            let solver = &solver;
            OptionSide::ALL.into_iter().map(move |side| {
                let mid = quote.mid(side);
                let outcome = match mid {
                    Some(premium) => ImpliedVolQuote::from_result(solver.solve_premium(
                        premium,
                        spot,
                        quote.strike,
                        rate,
                        expiry,
                        side,
                    )),
                    None => ImpliedVolQuote::Unavailable(UnavailableReason::MissingQuote),
                };
                if let ImpliedVolQuote::Unavailable(reason) = outcome {
                    debug!(strike = quote.strike, %side, %reason, "Implied volatility unavailable");
                }
                ImpliedVolRow::new(quote.strike, side, mid, outcome)
            })
        })
        .collect();

    let available = rows.iter().filter(|row| row.implied_vol.is_some()).count();
    info!(
        rows = rows.len(),
        available,
        "Built implied volatility table"
    );
    rows
}

/// Serialises rows as CSV with a header line.
pub fn write_csv<W, R>(rows: &[R], writer: W) -> Result<(), LoaderError>
where
    W: Write,
    R: Serialize,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes rows as CSV to `path`, replacing any existing file.
pub fn write_csv_path<R: Serialize>(rows: &[R], path: impl AsRef<Path>) -> Result<(), LoaderError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_csv(rows, file)?;
    info!(path = %path.display(), rows = rows.len(), "Report written to file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option_chain::OptionQuote;
    use approx::assert_relative_eq;
    use pricer_models::analytical::price;

    fn reference_market() -> MarketParameters {
        MarketParameters::new(1.0, 0.05, 0.3).unwrap()
    }

    #[test]
    fn test_pricing_table_parity_per_strike() {
        let market = reference_market();
        let strikes = [0.8, 1.0, 1.2];
        let calls = pricing_table(&market, 1.4, &strikes, OptionSide::Call).unwrap();
        let puts = pricing_table(&market, 1.4, &strikes, OptionSide::Put).unwrap();

        for (call, put) in calls.iter().zip(&puts) {
            let parity = 1.0 - call.strike * (-0.07_f64).exp();
            assert_relative_eq!(call.price - put.price, parity, epsilon = 1e-12);
            assert!(call.delta.is_some());
        }
    }

    #[test]
    fn test_pricing_table_rejects_bad_strike() {
        let result = pricing_table(&reference_market(), 1.4, &[1.0, -1.0], OptionSide::Call);
        assert!(matches!(result, Err(LoaderError::Model(_))));
    }

    #[test]
    fn test_spot_ladder() {
        let option = OptionSpec::call(1.0, 1.4).unwrap();
        let rows = spot_ladder(&reference_market(), &option, &[0.5, 1.0, 1.5]).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].spot, 1.0);
        assert!(rows.windows(2).all(|pair| pair[0].price < pair[1].price));
        assert!(spot_ladder(&reference_market(), &option, &[0.0]).is_err());
    }

    #[test]
    fn test_implied_vol_table_recovers_flat_surface() {
        let quotes = [0.9, 1.0, 1.1]
            .iter()
            .map(|&strike| {
                let call = price(1.0, strike, 0.05, 0.3, 1.4, OptionSide::Call);
                let put = price(1.0, strike, 0.05, 0.3, 1.4, OptionSide::Put);
                OptionQuote {
                    strike,
                    call_bid: Some(call),
                    call_ask: Some(call),
                    put_bid: Some(put),
                    put_ask: Some(put),
                }
            })
            .collect();
        let chain = OptionChain::new(Vec::new(), quotes);

        let rows = implied_vol_table(&chain, 1.0, 0.05, 1.4, &ImpliedVolConfig::default());
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].side, OptionSide::Call);
        assert_eq!(rows[1].side, OptionSide::Put);
        for row in rows {
            assert_relative_eq!(row.implied_vol.unwrap(), 0.3, epsilon = 1e-7);
            assert_eq!(row.unavailable, None);
        }
    }

    #[test]
    fn test_implied_vol_table_reasons() {
        let quote = OptionQuote {
            strike: 1.0,
            call_bid: None,
            call_ask: Some(0.1),
            put_bid: Some(5.0),
            put_ask: Some(5.0),
        };
        let chain = OptionChain::new(Vec::new(), vec![quote]);
        let rows = implied_vol_table(&chain, 1.0, 0.05, 1.4, &ImpliedVolConfig::default());

        assert_eq!(
            rows[0].quote(),
            ImpliedVolQuote::Unavailable(UnavailableReason::MissingQuote)
        );
        assert_eq!(rows[0].mid, None);
        assert_eq!(
            rows[1].quote(),
            ImpliedVolQuote::Unavailable(UnavailableReason::PriceAboveRange)
        );
    }

    #[test]
    fn test_write_csv_empty_cells() {
        let market = MarketParameters::new(1.0, 0.05, 0.0).unwrap();
        let rows = pricing_table(&market, 1.4, &[0.5], OptionSide::Call).unwrap();

        let mut buffer = Vec::new();
        write_csv(&rows, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "spot,strike,expiry,side,price,delta,gamma,theta,rho,vega"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("1.0,0.5,1.4,call,"));
        assert!(row.ends_with(",,,,,"));
    }

    #[test]
    fn test_write_implied_vol_rows() {
        let rows = vec![
            ImpliedVolRow::new(
                1.0,
                OptionSide::Call,
                Some(0.2),
                ImpliedVolQuote::Available(0.25),
            ),
            ImpliedVolRow::new(
                1.0,
                OptionSide::Put,
                None,
                ImpliedVolQuote::Unavailable(UnavailableReason::MissingQuote),
            ),
        ];
        let mut buffer = Vec::new();
        write_csv(&rows, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "strike,side,mid,implied_vol,unavailable");
        assert_eq!(lines[1], "1.0,call,0.2,0.25,");
        assert_eq!(lines[2], "1.0,put,,,missing_quote");
    }
}
