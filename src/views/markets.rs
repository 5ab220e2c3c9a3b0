//! Markets: crypto, Korean indices, safe havens and global benchmarks

use ratatui::prelude::*;

use crate::widgets::WidgetKind;

pub const WIDGETS: [WidgetKind; 7] = [
    WidgetKind::Header,
    WidgetKind::KoreaMonitor,
    WidgetKind::CryptoTracker,
    WidgetKind::SafeHavens,
    WidgetKind::GlobalIndices,
    WidgetKind::NewsSentiment,
    WidgetKind::MoneyMove,
];

pub fn layout(area: Rect) -> Vec<(WidgetKind, Rect)> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(25), Constraint::Percentage(25)])
        .split(rows[1]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(35), Constraint::Percentage(40)])
        .split(rows[2]);

    vec![
        (WidgetKind::Header, rows[0]),
        (WidgetKind::KoreaMonitor, top[0]),
        (WidgetKind::CryptoTracker, top[1]),
        (WidgetKind::SafeHavens, top[2]),
        (WidgetKind::GlobalIndices, bottom[0]),
        (WidgetKind::NewsSentiment, bottom[1]),
        (WidgetKind::MoneyMove, bottom[2]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_places_every_widget_once() {
        let placed = layout(Rect::new(0, 0, 160, 48));
        assert_eq!(placed.len(), WIDGETS.len());
        for kind in WIDGETS {
            assert!(placed.iter().any(|(k, _)| *k == kind));
        }
    }

    #[test]
    fn test_chart_gets_half_the_width() {
        let placed = layout(Rect::new(0, 0, 160, 48));
        let monitor = placed
            .iter()
            .find(|(k, _)| *k == WidgetKind::KoreaMonitor)
            .map(|(_, r)| *r);
        assert_eq!(monitor.map(|r| r.width), Some(80));
    }
}
