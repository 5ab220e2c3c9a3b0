//! Asset quotes and their tick updates
//!
//! Two update rules exist on the board:
//!
//! - *rebased*: jitter the price, then recompute change and percent against
//!   the reference `price - change` carried over from the previous quote.
//! - *drift*: jitter the price and walk the absolute change on its own;
//!   percent is derived from the walked change.
//!
//! Both always return a new quote; the previous one is discarded.

use rand::Rng;

use super::generator::{drift, jitter};

/// A displayed instrument
#[derive(Debug, Clone, PartialEq)]
pub struct AssetQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: Option<String>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
}

impl AssetQuote {
    pub fn new(symbol: &str, name: &str, price: f64, change: f64, change_percent: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            change,
            change_percent,
            volume: None,
            high_24h: None,
            low_24h: None,
        }
    }

    pub fn with_volume(mut self, volume: &str) -> Self {
        self.volume = Some(volume.to_string());
        self
    }

    pub fn with_range(mut self, high: f64, low: f64) -> Self {
        self.high_24h = Some(high);
        self.low_24h = Some(low);
        self
    }

    /// Price the current change is measured from
    pub fn reference_price(&self) -> f64 {
        self.price - self.change
    }

    pub fn is_up(&self) -> bool {
        self.change_percent >= 0.0
    }

    /// Next quote under the rebased rule
    pub fn rebased<R: Rng + ?Sized>(&self, rng: &mut R, volatility: f64) -> Self {
        let reference = self.reference_price();
        let price = jitter(rng, self.price, volatility);
        let change = price - reference;
        Self {
            price,
            change,
            change_percent: percent_of(change, reference),
            ..self.clone()
        }
    }

    /// Next quote under the drift rule
    pub fn drifted<R: Rng + ?Sized>(&self, rng: &mut R, volatility: f64, change_amplitude: f64) -> Self {
        let price = jitter(rng, self.price, volatility);
        let change = drift(rng, self.change, change_amplitude);
        Self {
            price,
            change,
            change_percent: percent_of(change, price - change),
            ..self.clone()
        }
    }

    /// Next quote with only the price moving; change figures are kept
    pub fn repriced<R: Rng + ?Sized>(&self, rng: &mut R, volatility: f64) -> Self {
        Self {
            price: jitter(rng, self.price, volatility),
            ..self.clone()
        }
    }
}

/// `change` as a percentage of `reference`.
///
/// A zero or non-finite reference yields 0.0 instead of an infinite or NaN
/// percentage; the sign of a 0.0 result never contradicts the change sign
/// check in `signs_agree`.
pub fn percent_of(change: f64, reference: f64) -> f64 {
    if reference == 0.0 || !reference.is_finite() {
        return 0.0;
    }
    let pct = change / reference * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

/// Percent and absolute change point the same way (zero counts as either)
pub fn signs_agree(quote: &AssetQuote) -> bool {
    quote.change == 0.0
        || quote.change_percent == 0.0
        || (quote.change > 0.0) == (quote.change_percent > 0.0)
}

pub fn crypto_quotes() -> Vec<AssetQuote> {
    vec![
        AssetQuote::new("BTC", "Bitcoin", 97842.50, 2341.20, 2.45)
            .with_volume("32.4B")
            .with_range(98500.0, 95200.0),
        AssetQuote::new("ETH", "Ethereum", 3456.78, -45.32, -1.29)
            .with_volume("18.7B")
            .with_range(3520.0, 3410.0),
    ]
}

pub fn korea_quotes() -> Vec<AssetQuote> {
    vec![
        AssetQuote::new("KOSPI", "KOSPI Index", 2456.78, 23.45, 0.96).with_volume("8.2T KRW"),
        AssetQuote::new("KOSDAQ", "KOSDAQ Index", 712.34, -5.67, -0.79).with_volume("4.1T KRW"),
    ]
}

pub fn safe_haven_quotes() -> Vec<AssetQuote> {
    vec![
        AssetQuote::new("XAU/USD", "Gold", 2634.50, 18.30, 0.70),
        AssetQuote::new("US10Y", "US 10Y Yield", 4.32, 0.05, 1.17),
        AssetQuote::new("USD/KRW", "USD/KRW", 1398.50, -2.30, -0.16),
        AssetQuote::new("DXY", "Dollar Index", 106.42, 0.23, 0.22),
    ]
}

pub fn global_index_quotes() -> Vec<AssetQuote> {
    vec![
        AssetQuote::new("SPX", "S&P 500", 6032.45, 42.18, 0.70),
        AssetQuote::new("NDX", "NASDAQ", 21478.90, -89.34, -0.41),
        AssetQuote::new("DJI", "Dow Jones", 44910.65, 156.78, 0.35),
    ]
}

/// Look up one quote from a seed table by symbol
pub fn find_quote(table: &[AssetQuote], symbol: &str) -> Option<AssetQuote> {
    table.iter().find(|q| q.symbol == symbol).cloned()
}
