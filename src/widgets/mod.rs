//! Board widgets
//!
//! Each widget owns its market state and declares how often it wants to be
//! ticked. The board subscribes that interval on mount and cancels it on
//! unmount; widgets never own timers themselves.

use std::time::Duration;

use crossterm::event::KeyCode;
use rand::RngCore;
use ratatui::prelude::*;

use crate::themes::Theme;

pub mod chart;
pub mod price_display;

pub mod crypto_tracker;
pub mod global_indices;
pub mod gravity_map;
pub mod header;
pub mod impact_factors;
pub mod insight_summary;
pub mod keyword_cloud;
pub mod korea_monitor;
pub mod korean_core;
pub mod money_move;
pub mod news_sentiment;
pub mod real_assets;
pub mod safe_havens;
pub mod sentiment_gauges;

/// Identity of every widget on the board, also used as the timer key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Header,
    KoreanCore,
    ImpactFactors,
    GravityMap,
    SentimentGauges,
    KeywordCloud,
    RealAssets,
    InsightSummary,
    CryptoTracker,
    KoreaMonitor,
    SafeHavens,
    GlobalIndices,
    NewsSentiment,
    MoneyMove,
}

impl WidgetKind {
    /// Tick period, or `None` for widgets with static data
    pub fn interval(&self) -> Option<Duration> {
        let ms = match self {
            Self::GravityMap => 50,
            Self::Header => 1_000,
            Self::KoreanCore => 2_000,
            Self::KoreaMonitor => 2_500,
            Self::CryptoTracker | Self::ImpactFactors | Self::RealAssets => 3_000,
            Self::GlobalIndices => 3_500,
            Self::SafeHavens | Self::SentimentGauges => 4_000,
            Self::InsightSummary => 15_000,
            Self::KeywordCloud | Self::NewsSentiment | Self::MoneyMove => return None,
        };
        Some(Duration::from_millis(ms))
    }

    /// Construct a freshly seeded widget
    pub fn build(self, rng: &mut dyn RngCore, now: Duration) -> Box<dyn BoardWidget> {
        match self {
            Self::Header => Box::new(header::Header::new()),
            Self::KoreanCore => Box::new(korean_core::KoreanCore::new(rng)),
            Self::ImpactFactors => Box::new(impact_factors::ImpactFactors::new()),
            Self::GravityMap => Box::new(gravity_map::GravityMap::new()),
            Self::SentimentGauges => Box::new(sentiment_gauges::SentimentGauges::new()),
            Self::KeywordCloud => Box::new(keyword_cloud::KeywordCloud::new(rng)),
            Self::RealAssets => Box::new(real_assets::RealAssets::new(rng)),
            Self::InsightSummary => Box::new(insight_summary::InsightSummary::new(rng, now)),
            Self::CryptoTracker => Box::new(crypto_tracker::CryptoTracker::new(rng)),
            Self::KoreaMonitor => Box::new(korea_monitor::KoreaMonitor::new(rng)),
            Self::SafeHavens => Box::new(safe_havens::SafeHavens::new()),
            Self::GlobalIndices => Box::new(global_indices::GlobalIndices::new()),
            Self::NewsSentiment => Box::new(news_sentiment::NewsSentiment::new()),
            Self::MoneyMove => Box::new(money_move::MoneyMove::new()),
        }
    }
}

/// A self-updating unit of display
pub trait BoardWidget {
    fn kind(&self) -> WidgetKind;

    /// Advance market state by one timer period
    fn tick(&mut self, rng: &mut dyn RngCore, now: Duration);

    /// Per-frame update for purely visual state (typing, pulses)
    fn animate(&mut self, _now: Duration) {}

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme);

    /// Handle key input; returns true when the key was consumed
    fn handle_key(&mut self, _key: KeyCode, _rng: &mut dyn RngCore, _now: Duration) -> bool {
        false
    }
}

/// Render a line on one row of `area`, honoring its alignment and clipped
/// to the area width
pub(crate) fn line_at(buf: &mut Buffer, area: Rect, row: u16, line: Line<'_>) {
    if row >= area.height || area.width == 0 {
        return;
    }
    let width = line.width() as u16;
    let offset = match line.alignment {
        Some(Alignment::Center) => area.width.saturating_sub(width) / 2,
        Some(Alignment::Right) => area.width.saturating_sub(width),
        _ => 0,
    };
    buf.set_line(area.x + offset, area.y + row, &line, area.width - offset);
}

/// Render `left` flush left and `right` flush right on one row; the right
/// side is dropped when both do not fit
pub(crate) fn spread_at(buf: &mut Buffer, area: Rect, row: u16, left: Line<'_>, right: Line<'_>) {
    if row >= area.height || area.width == 0 {
        return;
    }
    let y = area.y + row;
    let left_width = left.width() as u16;
    buf.set_line(area.x, y, &left, area.width);
    let right_width = right.width() as u16;
    if left_width + right_width < area.width {
        buf.set_line(area.right() - right_width, y, &right, right_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL: [WidgetKind; 14] = [
        WidgetKind::Header,
        WidgetKind::KoreanCore,
        WidgetKind::ImpactFactors,
        WidgetKind::GravityMap,
        WidgetKind::SentimentGauges,
        WidgetKind::KeywordCloud,
        WidgetKind::RealAssets,
        WidgetKind::InsightSummary,
        WidgetKind::CryptoTracker,
        WidgetKind::KoreaMonitor,
        WidgetKind::SafeHavens,
        WidgetKind::GlobalIndices,
        WidgetKind::NewsSentiment,
        WidgetKind::MoneyMove,
    ];

    #[test]
    fn test_build_reports_own_kind() {
        let mut rng = StdRng::seed_from_u64(1);
        for kind in ALL {
            let widget = kind.build(&mut rng, Duration::ZERO);
            assert_eq!(widget.kind(), kind);
        }
    }

    #[test]
    fn test_intervals() {
        assert_eq!(WidgetKind::KoreanCore.interval(), Some(Duration::from_secs(2)));
        assert_eq!(WidgetKind::KoreaMonitor.interval(), Some(Duration::from_millis(2500)));
        assert_eq!(WidgetKind::InsightSummary.interval(), Some(Duration::from_secs(15)));
        assert_eq!(WidgetKind::GravityMap.interval(), Some(Duration::from_millis(50)));
        assert_eq!(WidgetKind::MoneyMove.interval(), None);
    }

    #[test]
    fn test_every_widget_survives_ticks_and_tiny_areas() {
        let theme = Theme::default();
        let mut rng = StdRng::seed_from_u64(5);
        for kind in ALL {
            let mut widget = kind.build(&mut rng, Duration::ZERO);
            for i in 1..20u64 {
                widget.tick(&mut rng, Duration::from_secs(i));
                widget.animate(Duration::from_secs(i));
            }
            for (w, h) in [(0u16, 0u16), (1, 1), (8, 3), (20, 6), (120, 40)] {
                let area = Rect::new(0, 0, w, h);
                let mut buf = Buffer::empty(area);
                widget.render(area, &mut buf, &theme);
            }
            let area = Rect::new(0, 0, 80, 20);
            let mut buf = Buffer::empty(area);
            widget.render(area, &mut buf, &theme);
            assert!(!buffer_text(&buf).trim().is_empty(), "{:?} rendered nothing", kind);
        }
    }
}
