//! Animation effects
//!
//! Fades and pulses are driven by the board clock rather than wall time, so
//! a `ManualClock` can step them frame by frame.

use std::time::Duration;

use ratatui::prelude::*;

/// Fade-in state for view transitions
#[derive(Clone, Debug)]
pub struct FadeState {
    start: Duration,
    duration: Duration,
}

impl FadeState {
    pub fn fade_in(now: Duration, duration: Duration) -> Self {
        Self {
            start: now,
            duration,
        }
    }

    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_done(&self, now: Duration) -> bool {
        now.saturating_sub(self.start) >= self.duration
    }

    /// Get alpha value (0.0 to 1.0)
    pub fn alpha(&self, now: Duration) -> f32 {
        ease_out_cubic(self.progress(now))
    }
}

/// Cubic ease-out function
fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Apply alpha to a color (simple dimming)
pub fn apply_alpha(color: Color, alpha: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let r = (r as f32 * alpha) as u8;
            let g = (g as f32 * alpha) as u8;
            let b = (b as f32 * alpha) as u8;
            Color::Rgb(r, g, b)
        }
        // Indexed and named colors cannot be dimmed
        other => other,
    }
}

/// Dim every cell of an already rendered area
pub fn fade_area(buf: &mut Buffer, area: Rect, alpha: f32) {
    if alpha >= 1.0 {
        return;
    }
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                let fg = apply_alpha(cell.fg, alpha);
                let bg = apply_alpha(cell.bg, alpha);
                cell.set_fg(fg).set_bg(bg);
            }
        }
    }
}

/// Triangle wave over a 0..100 phase, 0.0 at the ends and 1.0 mid-cycle
pub fn pulse(phase: u8) -> f32 {
    let p = (phase % 100) as f32 / 100.0;
    1.0 - (2.0 * p - 1.0).abs()
}
