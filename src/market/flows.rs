//! Cross-asset flow records: impact factors, gravity nodes, allocation
//! slices and real assets, plus the risk-on / risk-off readings derived
//! from them.

use rand::Rng;

use super::bands::{Correlation, Direction};
use super::generator::{drift, jitter};

/// Volatility applied to factor and real-asset values every tick
pub const FACTOR_VOLATILITY: f64 = 0.001;
/// Full width of the per-tick change walk, in percentage points
pub const FACTOR_CHANGE_STEP: f64 = 0.1;

/// A global driver of Korean markets
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactFactor {
    pub name: &'static str,
    pub value: f64,
    /// Percent change
    pub change: f64,
    pub korean_impact: &'static str,
    pub correlation: Correlation,
    pub direction: Direction,
}

impl ImpactFactor {
    pub fn ticked<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            value: jitter(rng, self.value, FACTOR_VOLATILITY),
            change: drift(rng, self.change, FACTOR_CHANGE_STEP),
            ..self.clone()
        }
    }
}

pub fn impact_factors() -> Vec<ImpactFactor> {
    vec![
        ImpactFactor {
            name: "US 10Y Yield",
            value: 4.32,
            change: 0.05,
            korean_impact: "Pressure on KOSPI",
            correlation: Correlation::High,
            direction: Direction::Negative,
        },
        ImpactFactor {
            name: "S&P 500",
            value: 6032.0,
            change: 0.70,
            korean_impact: "Risk sentiment boost",
            correlation: Correlation::High,
            direction: Direction::Positive,
        },
        ImpactFactor {
            name: "NVIDIA",
            value: 142.50,
            change: 2.3,
            korean_impact: "Samsung/SK Hynix correlated",
            correlation: Correlation::High,
            direction: Direction::Positive,
        },
        ImpactFactor {
            name: "WTI Crude",
            value: 78.42,
            change: -1.2,
            korean_impact: "Import cost reduction",
            correlation: Correlation::Medium,
            direction: Direction::Negative,
        },
        ImpactFactor {
            name: "China PMI",
            value: 50.3,
            change: 0.4,
            korean_impact: "Export demand signal",
            correlation: Correlation::Medium,
            direction: Direction::Positive,
        },
    ]
}

/// Asset class column on the gravity map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    Safe,
    Risk,
    Real,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    pub id: &'static str,
    pub label: &'static str,
    pub category: NodeCategory,
    pub value: f64,
    pub change: f64,
}

pub fn gravity_nodes() -> Vec<FlowNode> {
    use NodeCategory::*;
    vec![
        FlowNode { id: "gold", label: "Gold", category: Safe, value: 2634.0, change: 0.7 },
        FlowNode { id: "usd", label: "USD", category: Safe, value: 106.4, change: 0.2 },
        FlowNode { id: "bonds", label: "Bonds", category: Safe, value: 4.32, change: 1.2 },
        FlowNode { id: "btc", label: "Bitcoin", category: Risk, value: 97842.0, change: 2.5 },
        FlowNode { id: "stocks", label: "Stocks", category: Risk, value: 6032.0, change: 0.7 },
        FlowNode { id: "reits", label: "REITs", category: Real, value: 89.5, change: -1.2 },
        FlowNode { id: "commodities", label: "Commodities", category: Real, value: 78.3, change: 0.4 },
    ]
}

/// Direction of the aggregate rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowDirection {
    RiskOn,
    RiskOff,
    Neutral,
}

impl FlowDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RiskOn => "RISK ON",
            Self::RiskOff => "RISK OFF",
            Self::Neutral => "NEUTRAL",
        }
    }
}

/// Gravity map reading: which side is pulling capital, and by how much
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityReading {
    pub direction: FlowDirection,
    /// Absolute gap between mean risk and mean safe change, in percent
    pub delta: f64,
}

fn mean_change(nodes: &[FlowNode], category: NodeCategory) -> f64 {
    let (sum, count) = nodes
        .iter()
        .filter(|n| n.category == category)
        .fold((0.0, 0usize), |(s, c), n| (s + n.change, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Risk-on when risk assets out-move safe assets on average; ties read as
/// risk-off.
pub fn gravity_reading(nodes: &[FlowNode]) -> GravityReading {
    let risk = mean_change(nodes, NodeCategory::Risk);
    let safe = mean_change(nodes, NodeCategory::Safe);
    GravityReading {
        direction: if risk > safe {
            FlowDirection::RiskOn
        } else {
            FlowDirection::RiskOff
        },
        delta: (risk - safe).abs(),
    }
}

/// Portfolio bucket for the money-move view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationCategory {
    RiskOn,
    Safe,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationSlice {
    pub name: &'static str,
    /// Share of the portfolio in percent
    pub weight: f64,
    pub change: f64,
    pub category: AllocationCategory,
}

pub fn allocation_slices() -> Vec<AllocationSlice> {
    use AllocationCategory::*;
    vec![
        AllocationSlice { name: "US Stocks", weight: 35.0, change: 2.3, category: RiskOn },
        AllocationSlice { name: "Korea Stocks", weight: 12.0, change: -1.5, category: RiskOn },
        AllocationSlice { name: "Crypto", weight: 8.0, change: 4.2, category: RiskOn },
        AllocationSlice { name: "Gold", weight: 15.0, change: 1.8, category: Safe },
        AllocationSlice { name: "Bonds", weight: 18.0, change: 0.5, category: Safe },
        AllocationSlice { name: "USD Cash", weight: 7.0, change: -0.8, category: Safe },
        AllocationSlice { name: "Real Estate", weight: 5.0, change: -2.1, category: RiskOn },
    ]
}

/// Money-move summary
#[derive(Debug, Clone, PartialEq)]
pub struct MoneyFlow {
    pub direction: FlowDirection,
    /// Meter fill, 50..=100
    pub strength: f64,
    pub description: &'static str,
}

/// Net rotation: summed risk-on change minus summed safe change, with a
/// dead zone of ±1 point.
pub fn money_flow(slices: &[AllocationSlice]) -> MoneyFlow {
    let sum = |category: AllocationCategory| -> f64 {
        slices
            .iter()
            .filter(|s| s.category == category)
            .map(|s| s.change)
            .sum()
    };
    let net = sum(AllocationCategory::RiskOn) - sum(AllocationCategory::Safe);
    let strength = (net.abs() * 15.0 + 50.0).min(100.0);

    let (direction, description) = if net > 1.0 {
        (FlowDirection::RiskOn, "Capital flowing into Risk Assets")
    } else if net < -1.0 {
        (FlowDirection::RiskOff, "Capital rotating to Safe Havens")
    } else {
        (FlowDirection::Neutral, "Market in equilibrium")
    };

    MoneyFlow {
        direction,
        strength,
        description,
    }
}

/// Physical asset tracked in the real-assets footer
#[derive(Debug, Clone, PartialEq)]
pub struct RealAsset {
    pub id: &'static str,
    pub name: &'static str,
    pub value: f64,
    /// Percent change
    pub change: f64,
    pub unit: &'static str,
}

impl RealAsset {
    pub fn ticked<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            value: jitter(rng, self.value, FACTOR_VOLATILITY),
            change: drift(rng, self.change, FACTOR_CHANGE_STEP),
            ..self.clone()
        }
    }
}

pub fn real_assets() -> Vec<RealAsset> {
    vec![
        RealAsset { id: "kr-reits", name: "Korean REITs Index", value: 892.45, change: -1.8, unit: "pts" },
        RealAsset { id: "seoul-apt", name: "Seoul Apartment Index", value: 112.3, change: -0.4, unit: "" },
        RealAsset { id: "wti", name: "WTI Crude Oil", value: 78.42, change: 1.2, unit: "USD" },
        RealAsset { id: "copper", name: "Copper", value: 4.12, change: 0.8, unit: "USD/lb" },
    ]
}
