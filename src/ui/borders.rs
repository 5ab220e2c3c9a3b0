//! Separator glyphs and divider lines
//!
//! Panels use ratatui's rounded `BorderType`; this module holds the glyphs
//! drawn inside them.

/// Separator characters for visual hierarchy
pub struct Separators;

impl Separators {
    /// Light horizontal line
    pub const LIGHT_HORIZONTAL: &'static str = "─";

    /// Dotted horizontal line
    pub const DOTTED: &'static str = "┄";

    /// Arrow right (capital moving)
    pub const ARROW_RIGHT: &'static str = "→";

    /// Diamond (for branding)
    pub const DIAMOND: &'static str = "◆";

    /// Filled circle (status indicator)
    pub const CIRCLE_FILLED: &'static str = "●";

    /// Vertical bar (gauge needle)
    pub const CURSOR: &'static str = "│";
}

/// Solid divider of `width` cells
pub fn divider(width: usize) -> String {
    Separators::LIGHT_HORIZONTAL.repeat(width)
}

/// Dotted divider of `width` cells
pub fn dotted(width: usize) -> String {
    Separators::DOTTED.repeat(width)
}

/// Flow line of `width` cells with a moving pulse at `phase` (0..100)
pub fn flow_line(width: usize, phase: u8) -> String {
    if width == 0 {
        return String::new();
    }
    let head = (phase as usize % 100) * width / 100;
    (0..width)
        .map(|i| {
            if i == head {
                Separators::CIRCLE_FILLED
            } else if i + 1 == width {
                Separators::ARROW_RIGHT
            } else {
                Separators::DOTTED
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dividers() {
        assert_eq!(divider(3), "───");
        assert_eq!(dotted(2), "┄┄");
        assert_eq!(divider(0), "");
    }

    #[test]
    fn test_flow_line_moves_with_phase() {
        assert_eq!(flow_line(5, 0), "●┄┄┄→");
        assert_eq!(flow_line(5, 40), "┄┄●┄→");
        assert_eq!(flow_line(5, 99).chars().count(), 5);
        assert_eq!(flow_line(0, 10), "");
    }
}
