//! Korea News Sentiment: ranked keywords with volume bars

use std::time::Duration;

use rand::RngCore;
use ratatui::prelude::*;

use super::keyword_cloud::sentiment_color;
use super::{line_at, spread_at, BoardWidget, WidgetKind};
use crate::market::news::{max_count, news_keywords, Mood, NewsKeyword, Sentiment, SentimentBreakdown};
use crate::themes::Theme;
use crate::ui::borders::divider;
use crate::ui::Panel;

const RANK_WIDTH: u16 = 4;
const COUNT_WIDTH: u16 = 7;

pub struct NewsSentiment {
    keywords: Vec<NewsKeyword>,
}

impl NewsSentiment {
    pub fn new() -> Self {
        Self {
            keywords: news_keywords(),
        }
    }
}

impl Default for NewsSentiment {
    fn default() -> Self {
        Self::new()
    }
}

/// Cells of a volume bar for `count` against the busiest keyword
pub fn bar_cells(count: u32, max: u32, width: u16) -> u16 {
    if max == 0 {
        return 0;
    }
    ((count as f64 / max as f64) * width as f64).round().min(width as f64) as u16
}

fn sentiment_icon(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "↑",
        Sentiment::Negative => "↓",
        Sentiment::Neutral => "–",
    }
}

fn mood_color(mood: Mood, theme: &Theme) -> Color {
    match mood {
        Mood::Bullish => theme.neon_green,
        Mood::Bearish => theme.neon_red,
        Mood::Neutral => theme.text_primary,
    }
}

impl BoardWidget for NewsSentiment {
    fn kind(&self) -> WidgetKind {
        WidgetKind::NewsSentiment
    }

    fn tick(&mut self, _rng: &mut dyn RngCore, _now: Duration) {}

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let inner = Panel::new(theme)
            .title("Korea News Sentiment")
            .subtitle("Trending topics from Korean markets")
            .live(true)
            .render(area, buf);
        if inner.width < RANK_WIDTH + COUNT_WIDTH + 4 || inner.height == 0 {
            return;
        }

        let breakdown = SentimentBreakdown::of(&self.keywords);
        let mood = breakdown.mood();
        spread_at(
            buf,
            inner,
            0,
            Line::from(Span::styled("▤ Market Sentiment", Style::default().fg(theme.text_muted))),
            Line::from(Span::styled(mood.label(), Style::default().fg(mood_color(mood, theme)).bold())),
        );

        // Keyword rows between the mood line and the breakdown footer
        let list_rows = inner.height.saturating_sub(3);
        let max = max_count(&self.keywords);
        let word_width = inner.width - RANK_WIDTH - COUNT_WIDTH;
        for (i, keyword) in self.keywords.iter().take(list_rows as usize).enumerate() {
            let row = i as u16 + 1;
            let color = sentiment_color(keyword.sentiment, theme);
            let word_color = if keyword.sentiment == Sentiment::Neutral {
                theme.text_secondary
            } else {
                color
            };
            line_at(
                buf,
                inner,
                row,
                Line::from(vec![
                    Span::styled(format!("#{:<3}", i + 1), Style::default().fg(theme.text_muted)),
                    Span::styled(keyword.word, Style::default().fg(word_color)),
                ]),
            );
            let bar_bg = Theme::dim(color, 0.25);
            let y = inner.y + row;
            for dx in 0..bar_cells(keyword.count, max, word_width) {
                if let Some(cell) = buf.cell_mut((inner.x + RANK_WIDTH + dx, y)) {
                    cell.set_bg(bar_bg);
                }
            }
            let count_area = Rect {
                x: inner.right() - COUNT_WIDTH,
                y,
                width: COUNT_WIDTH,
                height: 1,
            };
            line_at(
                buf,
                count_area,
                0,
                Line::from(vec![
                    Span::styled(format!("{} ", keyword.count), Style::default().fg(theme.text_primary)),
                    Span::styled(sentiment_icon(keyword.sentiment), Style::default().fg(color)),
                ])
                .right_aligned(),
            );
        }

        if inner.height < 3 {
            return;
        }
        let footer = inner.height - 2;
        line_at(
            buf,
            inner,
            footer,
            Line::from(Span::styled(divider(inner.width as usize), Style::default().fg(theme.border))),
        );
        let tally = |icon: &'static str, count: usize, label: &'static str, color: Color| -> Vec<Span<'static>> {
            vec![
                Span::styled(format!("{} {} ", icon, count), Style::default().fg(color).bold()),
                Span::styled(format!("{}   ", label), Style::default().fg(theme.text_muted)),
            ]
        };
        let mut spans = tally("↑", breakdown.positive, "Positive", theme.neon_green);
        spans.extend(tally("–", breakdown.neutral, "Neutral", theme.text_muted));
        spans.extend(tally("↓", breakdown.negative, "Negative", theme.neon_red));
        line_at(buf, inner, footer + 1, Line::from(spans).centered());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;

    #[test]
    fn test_bar_cells() {
        assert_eq!(bar_cells(847, 847, 40), 40);
        assert_eq!(bar_cells(0, 847, 40), 0);
        assert_eq!(bar_cells(10, 0, 40), 0);
        assert_eq!(bar_cells(1, 2, 9), 5);
    }

    #[test]
    fn test_seed_render() {
        let theme = Theme::default();
        let mut widget = NewsSentiment::new();
        let area = Rect::new(0, 0, 60, 18);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf, &theme);
        let text = buffer_text(&buf);
        assert!(text.contains("BULLISH"));
        assert!(text.contains("#1  Samsung"));
        assert!(text.contains("847 ↑"));
        assert!(text.contains("#12 Trade Surplus"));
        assert!(text.contains("↑ 7 Positive"));
        assert!(text.contains("– 2 Neutral"));
        assert!(text.contains("↓ 3 Negative"));
    }

    #[test]
    fn test_top_keyword_bar_spans_the_row() {
        let theme = Theme::default();
        let mut widget = NewsSentiment::new();
        let area = Rect::new(0, 0, 60, 18);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf, &theme);
        // Inner area starts at x=2 (border plus padding), first list row is y=2
        let bar_bg = Theme::dim(theme.neon_green, 0.25);
        assert_eq!(buf[(2 + RANK_WIDTH, 2)].bg, bar_bg);
        assert_eq!(buf[(2 + 60 - 4 - RANK_WIDTH - COUNT_WIDTH + RANK_WIDTH - 1, 2)].bg, bar_bg);
    }

    #[test]
    fn test_short_panel_truncates_list() {
        let theme = Theme::default();
        let mut widget = NewsSentiment::new();
        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf, &theme);
        let text = buffer_text(&buf);
        assert!(text.contains("Samsung"));
        assert!(!text.contains("Trade Surplus"));
        assert!(text.contains("Positive"));
    }
}
