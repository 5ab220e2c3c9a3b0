//! Capital Gravity Map: safe-haven vs risk-asset rotation radar

use std::time::Duration;

use rand::RngCore;
use ratatui::prelude::*;

use super::{line_at, spread_at, BoardWidget, WidgetKind};
use crate::market::flows::{gravity_nodes, gravity_reading, FlowDirection, FlowNode, NodeCategory};
use crate::market::bands::sign_prefix;
use crate::themes::Theme;
use crate::ui::animation::{apply_alpha, pulse};
use crate::ui::borders::{divider, flow_line, Separators};
use crate::ui::Panel;

/// Phase steps per full pulse cycle
pub const PHASE_CYCLE: u8 = 100;

pub struct GravityMap {
    nodes: Vec<FlowNode>,
    phase: u8,
}

impl GravityMap {
    pub fn new() -> Self {
        Self {
            nodes: gravity_nodes(),
            phase: 0,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> u8 {
        self.phase
    }

    fn node_color(node: &FlowNode, theme: &Theme) -> Color {
        match node.category {
            NodeCategory::Safe if node.change >= 0.0 => theme.neon_gold,
            NodeCategory::Safe => Theme::dim(theme.neon_gold, 0.6),
            NodeCategory::Risk => theme.change_color(node.change),
            NodeCategory::Real if node.change >= 0.0 => theme.neon_amber,
            NodeCategory::Real => theme.neon_red,
        }
    }

    fn node_line(node: &FlowNode, theme: &Theme) -> (Line<'static>, Line<'static>) {
        (
            Line::from(vec![
                Span::styled(
                    format!("{} ", Separators::CIRCLE_FILLED),
                    Style::default().fg(Self::node_color(node, theme)),
                ),
                Span::styled(node.label, Style::default().fg(theme.text_primary)),
            ]),
            Line::from(Span::styled(
                format!("{}{:.1}%", sign_prefix(node.change), node.change),
                Style::default().fg(theme.change_color(node.change)).bold(),
            )),
        )
    }

    fn render_column(&self, category: NodeCategory, title: &str, color: Color, area: Rect, buf: &mut Buffer, theme: &Theme) {
        line_at(
            buf,
            area,
            0,
            Line::from(Span::styled(title.to_uppercase(), Style::default().fg(color).bold())),
        );
        for (row, node) in self.nodes.iter().filter(|n| n.category == category).enumerate() {
            let (left, right) = Self::node_line(node, theme);
            spread_at(buf, area, row as u16 + 1, left, right);
        }
    }
}

impl Default for GravityMap {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardWidget for GravityMap {
    fn kind(&self) -> WidgetKind {
        WidgetKind::GravityMap
    }

    fn tick(&mut self, _rng: &mut dyn RngCore, _now: Duration) {
        self.phase = (self.phase + 1) % PHASE_CYCLE;
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let inner = Panel::new(theme)
            .title("Capital Gravity Map")
            .subtitle("Real-time capital rotation radar")
            .live(true)
            .render(area, buf);
        if inner.width < 20 || inner.height < 3 {
            return;
        }

        let reading = gravity_reading(&self.nodes);
        let risk_on = reading.direction == FlowDirection::RiskOn;
        let (banner_color, banner) = if risk_on {
            (theme.neon_green, "SAFE → RISK")
        } else {
            (theme.neon_gold, "RISK → SAFE")
        };

        // Banner: five pulsing bars, then the direction
        let mut spans = Vec::new();
        for i in 0..5u8 {
            let glow = 0.3 + 0.7 * pulse(self.phase.wrapping_add(i * 10));
            spans.push(Span::styled("▮", Style::default().fg(apply_alpha(banner_color, glow))));
        }
        spans.push(Span::styled(format!(" {}  ", banner), Style::default().fg(theme.text_secondary)));
        spans.push(Span::styled(reading.direction.label(), Style::default().fg(banner_color).bold()));
        line_at(buf, inner, 0, Line::from(spans).centered());

        let body = Rect {
            y: inner.y + 2,
            height: inner.height.saturating_sub(2),
            ..inner
        };
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Length(1), Constraint::Min(0)])
            .split(body);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(36), Constraint::Percentage(28), Constraint::Percentage(36)])
            .split(parts[0]);

        self.render_column(NodeCategory::Safe, "Safe Haven", theme.neon_gold, columns[0], buf, theme);
        self.render_column(NodeCategory::Risk, "Risk Assets", theme.neon_green, columns[2], buf, theme);

        // Center: delta figure and a moving flow line towards the winning side
        let center = columns[1];
        let delta = format!("{:.1}%", reading.delta);
        line_at(
            buf,
            center,
            1,
            Line::from(Span::styled(delta, Style::default().fg(banner_color).bold())).centered(),
        );
        line_at(
            buf,
            center,
            2,
            Line::from(Span::styled("DELTA", Style::default().fg(theme.text_muted))).centered(),
        );
        let lane = center.width.saturating_sub(2) as usize;
        let mut flow = flow_line(lane, self.phase);
        if !risk_on {
            flow = flow
                .chars()
                .rev()
                .map(|c| if c == '→' { '←' } else { c })
                .collect();
        }
        line_at(
            buf,
            center,
            3,
            Line::from(Span::styled(flow, Style::default().fg(banner_color))).centered(),
        );

        line_at(
            buf,
            parts[1],
            0,
            Line::from(Span::styled(divider(parts[1].width as usize), Style::default().fg(theme.border))),
        );

        // Real economy row
        let real = parts[2];
        line_at(
            buf,
            real,
            0,
            Line::from(Span::styled("REAL ECONOMY", Style::default().fg(theme.neon_amber).bold())),
        );
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(Rect {
                y: real.y + 1,
                height: real.height.saturating_sub(1),
                ..real
            });
        for (node, half) in self
            .nodes
            .iter()
            .filter(|n| n.category == NodeCategory::Real)
            .zip(halves.iter())
        {
            let (left, right) = Self::node_line(node, theme);
            let padded = Rect {
                width: half.width.saturating_sub(2),
                ..*half
            };
            spread_at(buf, padded, 0, left, right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_phase_wraps() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut map = GravityMap::new();
        for i in 0..250u64 {
            map.tick(&mut rng, Duration::from_millis(50 * i));
        }
        assert_eq!(map.phase(), 50);
    }

    #[test]
    fn test_seed_render_reads_risk_on() {
        let theme = Theme::default();
        let mut map = GravityMap::new();
        let area = Rect::new(0, 0, 80, 14);
        let mut buf = Buffer::empty(area);
        map.render(area, &mut buf, &theme);
        let text = buffer_text(&buf);
        assert!(text.contains("RISK ON"));
        assert!(text.contains("0.9%"));
        assert!(text.contains("SAFE HAVEN"));
        assert!(text.contains("Bitcoin"));
        assert!(text.contains("+2.5%"));
        assert!(text.contains("REAL ECONOMY"));
        assert!(text.contains("-1.2%"));
    }
}
