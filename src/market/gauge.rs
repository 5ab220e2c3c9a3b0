//! Bounded sentiment gauges and the fear/greed banding

use rand::Rng;

use super::generator::drift;

/// Lowest value a gauge can walk to
pub const GAUGE_MIN: f64 = 5.0;
/// Highest value a gauge can walk to
pub const GAUGE_MAX: f64 = 95.0;
/// Full width of a single gauge step
pub const GAUGE_STEP: f64 = 3.0;

/// Fear & greed classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBand {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl SentimentBand {
    /// Classify a 0-100 reading (upper bounds inclusive: 25/45/55/75)
    pub fn classify(value: f64) -> Self {
        if value <= 25.0 {
            Self::ExtremeFear
        } else if value <= 45.0 {
            Self::Fear
        } else if value <= 55.0 {
            Self::Neutral
        } else if value <= 75.0 {
            Self::Greed
        } else {
            Self::ExtremeGreed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ExtremeFear => "Extreme Fear",
            Self::Fear => "Fear",
            Self::Neutral => "Neutral",
            Self::Greed => "Greed",
            Self::ExtremeGreed => "Extreme Greed",
        }
    }
}

/// One sentiment meter
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub id: &'static str,
    pub label: &'static str,
    pub sublabel: &'static str,
    pub value: f64,
}

impl Gauge {
    pub fn band(&self) -> SentimentBand {
        SentimentBand::classify(self.value)
    }

    /// Rounded reading shown on screen
    pub fn display_value(&self) -> u8 {
        self.value.round().clamp(0.0, 100.0) as u8
    }

    /// Next reading, walked by at most half a step and clamped
    pub fn ticked<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            value: drift(rng, self.value, GAUGE_STEP).clamp(GAUGE_MIN, GAUGE_MAX),
            ..self.clone()
        }
    }
}

pub fn seed_gauges() -> Vec<Gauge> {
    vec![
        Gauge {
            id: "global",
            label: "Global Sentiment",
            sublabel: "Fear & Greed Index",
            value: 62.0,
        },
        Gauge {
            id: "crypto",
            label: "Crypto Sentiment",
            sublabel: "Kimchi Premium: +2.3%",
            value: 71.0,
        },
        Gauge {
            id: "realestate",
            label: "KR Real Estate",
            sublabel: "Seoul Apartment Index",
            value: 38.0,
        },
    ]
}
