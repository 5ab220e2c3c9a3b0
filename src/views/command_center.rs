//! Command Center: the Korea-centric landing board

use ratatui::prelude::*;

use crate::widgets::WidgetKind;

pub const WIDGETS: [WidgetKind; 8] = [
    WidgetKind::Header,
    WidgetKind::KoreanCore,
    WidgetKind::ImpactFactors,
    WidgetKind::GravityMap,
    WidgetKind::SentimentGauges,
    WidgetKind::KeywordCloud,
    WidgetKind::RealAssets,
    WidgetKind::InsightSummary,
];

/// Header, three zones across, gauges and real assets beside the keyword
/// cloud, then the insight strip along the bottom
pub fn layout(area: Rect) -> Vec<(WidgetKind, Rect)> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Ratio(1, 2),
            Constraint::Ratio(1, 2),
            Constraint::Length(5),
        ])
        .split(area);

    let zones = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(rows[1]);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(lower[0]);

    vec![
        (WidgetKind::Header, rows[0]),
        (WidgetKind::KoreanCore, zones[0]),
        (WidgetKind::ImpactFactors, zones[1]),
        (WidgetKind::GravityMap, zones[2]),
        (WidgetKind::SentimentGauges, left[0]),
        (WidgetKind::RealAssets, left[1]),
        (WidgetKind::KeywordCloud, lower[1]),
        (WidgetKind::InsightSummary, rows[3]),
    ]
}
