//! News heatmap: keyword bubbles sized by mention volume

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use ratatui::prelude::*;
use tracing::debug;

use super::{line_at, spread_at, BoardWidget, WidgetKind};
use crate::market::news::{layout_bubbles, news_keywords, Bubble, NewsKeyword, Sentiment, SentimentBreakdown};
use crate::themes::Theme;
use crate::ui::borders::{divider, Separators};
use crate::ui::Panel;

const TOP_STRIP: usize = 5;

pub struct KeywordCloud {
    keywords: Vec<NewsKeyword>,
    /// Layout seed drawn at mount so resizes re-place bubbles reproducibly
    layout_seed: u64,
    bubbles: Vec<Bubble>,
    laid_out_for: Option<(u16, u16)>,
}

impl KeywordCloud {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        Self {
            keywords: news_keywords(),
            layout_seed: rng.next_u64(),
            bubbles: Vec::new(),
            laid_out_for: None,
        }
    }

    #[cfg(test)]
    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    /// Recompute the layout if the cloud area changed size
    pub fn ensure_layout(&mut self, width: u16, height: u16) {
        if self.laid_out_for == Some((width, height)) {
            return;
        }
        let mut rng = StdRng::seed_from_u64(self.layout_seed);
        self.bubbles = layout_bubbles(&mut rng, &self.keywords, width, height);
        self.laid_out_for = Some((width, height));
        debug!(
            "Keyword cloud laid out at {}x{}: {} of {} placed",
            width,
            height,
            self.bubbles.iter().filter(|b| b.placed).count(),
            self.bubbles.len()
        );
    }
}

pub fn sentiment_color(sentiment: Sentiment, theme: &Theme) -> Color {
    match sentiment {
        Sentiment::Positive => theme.neon_green,
        Sentiment::Negative => theme.neon_red,
        Sentiment::Neutral => theme.neon_blue,
    }
}

/// Word clipped to `room` cells
fn clip(word: &str, room: usize) -> String {
    word.chars().take(room).collect()
}

fn render_bubble(bubble: &Bubble, origin: Rect, buf: &mut Buffer, theme: &Theme) {
    let color = sentiment_color(bubble.sentiment, theme);
    let mut style = Style::default().fg(color);
    if bubble.tier > 0 {
        style = style.bold();
    }
    let frame = Style::default().fg(Theme::dim(color, 0.6));
    let w = bubble.width as usize;
    let area = Rect {
        x: origin.x + bubble.x,
        y: origin.y + bubble.y,
        width: bubble.width,
        height: bubble.height,
    };

    if bubble.height >= 3 && w >= 2 {
        let inside = w - 2;
        let word = clip(bubble.word, inside);
        let pad = inside - word.chars().count();
        let left = pad / 2;
        line_at(buf, area, 0, Line::from(Span::styled(format!("╭{}╮", "─".repeat(inside)), frame)));
        line_at(
            buf,
            area,
            1,
            Line::from(vec![
                Span::styled("│", frame),
                Span::raw(" ".repeat(left)),
                Span::styled(word, style),
                Span::raw(" ".repeat(pad - left)),
                Span::styled("│", frame),
            ]),
        );
        line_at(buf, area, 2, Line::from(Span::styled(format!("╰{}╯", "─".repeat(inside)), frame)));
    } else if w >= 2 {
        let inside = w - 2;
        let word = clip(bubble.word, inside);
        let pad = inside - word.chars().count();
        let left = pad / 2;
        line_at(
            buf,
            area,
            0,
            Line::from(vec![
                Span::styled("(", frame),
                Span::raw(" ".repeat(left)),
                Span::styled(word, style),
                Span::raw(" ".repeat(pad - left)),
                Span::styled(")", frame),
            ]),
        );
    } else {
        line_at(buf, area, 0, Line::from(Span::styled(clip(bubble.word, w), style)));
    }
}

impl BoardWidget for KeywordCloud {
    fn kind(&self) -> WidgetKind {
        WidgetKind::KeywordCloud
    }

    fn tick(&mut self, _rng: &mut dyn RngCore, _now: Duration) {}

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let inner = Panel::new(theme)
            .title("News Heatmap")
            .subtitle("Korean economic keywords by volume")
            .live(true)
            .render(area, buf);
        if inner.width < 10 || inner.height == 0 {
            return;
        }

        let breakdown = SentimentBreakdown::of(&self.keywords);
        let legend = |label: &str, count: usize, color: Color| -> Vec<Span<'static>> {
            vec![
                Span::styled(format!("{} ", Separators::CIRCLE_FILLED), Style::default().fg(color)),
                Span::styled(format!("{} ({})  ", label, count), Style::default().fg(theme.text_muted)),
            ]
        };
        let mut spans = legend("Positive", breakdown.positive, theme.neon_green);
        spans.extend(legend("Negative", breakdown.negative, theme.neon_red));
        spans.extend(legend("Neutral", breakdown.neutral, theme.neon_blue));
        spread_at(
            buf,
            inner,
            0,
            Line::from(spans),
            Line::from(Span::styled("Bubble size = Mention volume", Style::default().fg(theme.text_muted))),
        );
        line_at(
            buf,
            inner,
            1,
            Line::from(Span::styled(divider(inner.width as usize), Style::default().fg(theme.border))),
        );

        // Cloud between the legend and the top-5 strip
        if inner.height < 4 {
            return;
        }
        let cloud = Rect {
            y: inner.y + 2,
            height: inner.height - 3,
            ..inner
        };
        self.ensure_layout(cloud.width, cloud.height);
        // Quietest first so louder bubbles win any overlap
        for bubble in self.bubbles.iter().rev() {
            render_bubble(bubble, cloud, buf, theme);
        }

        let mut strip = vec![Span::styled("TOP 5 ", Style::default().fg(theme.text_secondary).bold())];
        for (i, bubble) in self.bubbles.iter().take(TOP_STRIP).enumerate() {
            if i > 0 {
                strip.push(Span::styled(" · ", Style::default().fg(theme.border)));
            }
            strip.push(Span::styled(
                format!("{} {}", bubble.word, bubble.count),
                Style::default().fg(sentiment_color(bubble.sentiment, theme)),
            ));
        }
        line_at(buf, inner, inner.height - 1, Line::from(strip));
    }
}
