//! Threshold banding
//!
//! Pure lookups from a number or category to a discrete status. Colors are
//! chosen by the widgets from these statuses so the mapping stays testable
//! without a terminal.

/// USD/KRW stress classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyStress {
    Stable,
    Warning,
    Critical,
}

/// Above this the won is under acute pressure
pub const KRW_CRITICAL_ABOVE: f64 = 1420.0;
/// Above this the won is weakening
pub const KRW_WARNING_ABOVE: f64 = 1380.0;
/// Left edge of the strength meter scale
pub const KRW_METER_FLOOR: f64 = 1300.0;

impl CurrencyStress {
    /// Classify a USD/KRW rate (thresholds are exclusive)
    pub fn classify(rate: f64) -> Self {
        if rate > KRW_CRITICAL_ABOVE {
            Self::Critical
        } else if rate > KRW_WARNING_ABOVE {
            Self::Warning
        } else {
            Self::Stable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Stable => "STABLE",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Fill of the "Strong ₩ .. Weak ₩" meter, in percent
pub fn krw_weakness_percent(rate: f64) -> f64 {
    ((rate - KRW_METER_FLOOR) / 2.0).clamp(0.0, 100.0)
}

/// Strength of a factor's link to the Korean market
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correlation {
    High,
    Medium,
    Low,
}

impl Correlation {
    /// Bar fill in percent
    pub fn strength_percent(&self) -> u16 {
        match self {
            Self::High => 100,
            Self::Medium => 60,
            Self::Low => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// How a rising factor affects Korea
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
    Neutral,
}

/// Effect of a factor move on the Korean market
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Good for Korea (▲)
    Supportive,
    /// Bad for Korea (▼)
    Adverse,
    /// No signal
    Flat,
}

impl Impact {
    /// Combine the factor's relationship with its current move
    pub fn of(direction: Direction, change: f64) -> Self {
        match direction {
            Direction::Neutral => Self::Flat,
            _ if change == 0.0 => Self::Flat,
            Direction::Positive if change > 0.0 => Self::Supportive,
            Direction::Positive => Self::Adverse,
            Direction::Negative if change > 0.0 => Self::Adverse,
            Direction::Negative => Self::Supportive,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Supportive => "▲ ",
            Self::Adverse => "▼ ",
            Self::Flat => "",
        }
    }
}

/// Trend arrow for a raw move
pub fn move_arrow(change: f64) -> &'static str {
    if change > 0.0 {
        "↑"
    } else if change < 0.0 {
        "↓"
    } else {
        "–"
    }
}

/// Sign prefix used on every percent figure ("+" for zero too)
pub fn sign_prefix(value: f64) -> &'static str {
    if value >= 0.0 {
        "+"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_stress_bands() {
        assert_eq!(CurrencyStress::classify(1450.0).label(), "CRITICAL");
        assert_eq!(CurrencyStress::classify(1400.0).label(), "WARNING");
        assert_eq!(CurrencyStress::classify(1320.0).label(), "STABLE");
    }

    #[test]
    fn test_currency_stress_edges_are_exclusive() {
        assert_eq!(CurrencyStress::classify(1420.0), CurrencyStress::Warning);
        assert_eq!(CurrencyStress::classify(1420.01), CurrencyStress::Critical);
        assert_eq!(CurrencyStress::classify(1380.0), CurrencyStress::Stable);
        assert_eq!(CurrencyStress::classify(1380.01), CurrencyStress::Warning);
    }

    #[test]
    fn test_krw_meter_clamped() {
        assert_eq!(krw_weakness_percent(1250.0), 0.0);
        assert_eq!(krw_weakness_percent(1398.5), 49.25);
        assert_eq!(krw_weakness_percent(1500.0), 100.0);
        assert_eq!(krw_weakness_percent(1800.0), 100.0);
    }

    #[test]
    fn test_correlation_strength() {
        assert_eq!(Correlation::High.strength_percent(), 100);
        assert_eq!(Correlation::Medium.strength_percent(), 60);
        assert_eq!(Correlation::Low.strength_percent(), 30);
    }

    #[test]
    fn test_impact_matrix() {
        assert_eq!(Impact::of(Direction::Positive, 2.3), Impact::Supportive);
        assert_eq!(Impact::of(Direction::Positive, -0.1), Impact::Adverse);
        assert_eq!(Impact::of(Direction::Negative, 0.05), Impact::Adverse);
        assert_eq!(Impact::of(Direction::Negative, -1.2), Impact::Supportive);
        assert_eq!(Impact::of(Direction::Neutral, 5.0), Impact::Flat);
        assert_eq!(Impact::of(Direction::Positive, 0.0), Impact::Flat);
        assert_eq!(Impact::Supportive.arrow(), "▲ ");
    }

    #[test]
    fn test_sign_prefix_and_arrow() {
        assert_eq!(sign_prefix(0.0), "+");
        assert_eq!(sign_prefix(-0.4), "");
        assert_eq!(move_arrow(1.0), "↑");
        assert_eq!(move_arrow(-1.0), "↓");
        assert_eq!(move_arrow(0.0), "–");
    }
}
