//! Theme structure
//!
//! Semantic color system for the board. Colors are organized by purpose,
//! not by color name, with a set of neon signal colors on top for market
//! moves and bands.

use ratatui::style::Color;

/// Theme colors with semantic organization
#[derive(Clone, Debug)]
pub struct Theme {
    // ─────────────────────────────────────────────────────────────────────────
    // Surfaces - Background layers
    // ─────────────────────────────────────────────────────────────────────────
    /// Main background color
    pub background: Color,
    /// Card/panel background (slightly elevated)
    pub surface: Color,
    /// Overlays such as the help screen
    pub surface_elevated: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Text - Foreground colors
    // ─────────────────────────────────────────────────────────────────────────
    /// Primary text - prices, headers
    pub text_primary: Color,
    /// Secondary text - names, labels
    pub text_secondary: Color,
    /// Muted text - hints, units, axis labels
    pub text_muted: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Accents
    // ─────────────────────────────────────────────────────────────────────────
    /// Primary accent - brand cyan
    pub accent: Color,
    /// Secondary accent - gradient pair (purple)
    pub accent_secondary: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Signals - market moves and bands
    // ─────────────────────────────────────────────────────────────────────────
    /// Gains, greed, stable
    pub neon_green: Color,
    /// Losses, fear, critical
    pub neon_red: Color,
    /// Safe havens, neutral band
    pub neon_gold: Color,
    /// Warnings, fear band, real economy
    pub neon_amber: Color,
    /// Crypto, neutral news, medium correlation
    pub neon_blue: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Borders - Edge colors
    // ─────────────────────────────────────────────────────────────────────────
    /// Default border color
    pub border: Color,
    /// Focused/active border color
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::cockpit()
    }
}

impl Theme {
    /// Dark command-center palette
    pub fn cockpit() -> Self {
        Self {
            // Surfaces
            background: Color::Rgb(13, 17, 28),         // Deep navy
            surface: Color::Rgb(20, 25, 40),            // Card
            surface_elevated: Color::Rgb(30, 37, 56),   // Overlay

            // Text
            text_primary: Color::Rgb(226, 232, 240),    // Off-white
            text_secondary: Color::Rgb(160, 170, 190),
            text_muted: Color::Rgb(110, 120, 140),

            // Accents
            accent: Color::Rgb(0, 200, 255),            // Cyan
            accent_secondary: Color::Rgb(170, 110, 255),// Purple

            // Signals
            neon_green: Color::Rgb(0, 255, 140),
            neon_red: Color::Rgb(255, 60, 90),
            neon_gold: Color::Rgb(255, 190, 40),
            neon_amber: Color::Rgb(255, 130, 30),
            neon_blue: Color::Rgb(0, 230, 255),

            // Borders
            border: Color::Rgb(40, 48, 70),
            border_focused: Color::Rgb(0, 200, 255),
        }
    }

    /// Color for a signed move
    pub fn change_color(&self, change: f64) -> Color {
        if change >= 0.0 {
            self.neon_green
        } else {
            self.neon_red
        }
    }

    /// Dim a color towards black (0.0 = black, 1.0 = unchanged)
    pub fn dim(color: Color, factor: f32) -> Color {
        if let Color::Rgb(r, g, b) = color {
            let scale = |c: u8| -> u8 { (c as f32 * factor.clamp(0.0, 1.0)) as u8 };
            Color::Rgb(scale(r), scale(g), scale(b))
        } else {
            color
        }
    }

    /// Blend two colors with a ratio (1.0 = color1, 0.0 = color2)
    pub fn blend(color1: Color, color2: Color, ratio: f32) -> Color {
        match (color1, color2) {
            (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
                let blend = |c1: u8, c2: u8| -> u8 {
                    let c1 = c1 as f32;
                    let c2 = c2 as f32;
                    (c1 * ratio + c2 * (1.0 - ratio)) as u8
                };
                Color::Rgb(blend(r1, r2), blend(g1, g2), blend(b1, b2))
            }
            _ => color1,
        }
    }
}
