//! UI components module
//!
//! Reusable UI components for the board: panels, separators, the status
//! bar, the help overlay and fade/pulse animations.

pub mod animation;
pub mod borders;
pub mod help_overlay;
pub mod panels;
pub mod status_bar;

pub use help_overlay::HelpOverlay;
pub use panels::{Meter, Panel, PanelStyle};
pub use status_bar::StatusBar;

/// Flatten a buffer into newline-separated rows of symbols
#[cfg(test)]
pub fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
