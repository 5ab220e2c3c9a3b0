//! Number formatting and percent coloring shared by every price-bearing
//! widget

use ratatui::prelude::*;

use crate::market::bands::sign_prefix;
use crate::themes::Theme;

/// Insert thousands separators into a run of ASCII digits
pub fn with_commas(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn grouped(value: f64, decimals: usize, trim_zeros: bool) -> String {
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), ""));
    let frac = if trim_zeros {
        frac_part.trim_end_matches('0')
    } else {
        frac_part
    };

    let mut out = String::new();
    if value < 0.0 && raw.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&with_commas(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Display a price with magnitude-dependent precision.
///
/// Five digits and up show no decimals, three to four digits show at most
/// two, single units show exactly two and sub-unit prices show four.
pub fn format_price(value: f64) -> String {
    let abs = value.abs();
    if abs >= 10_000.0 {
        grouped(value, 0, false)
    } else if abs >= 100.0 {
        grouped(value, 2, true)
    } else if abs >= 1.0 {
        grouped(value, 2, false)
    } else {
        grouped(value, 4, false)
    }
}

/// Fixed decimals with separators
pub fn format_decimal(value: f64, decimals: usize) -> String {
    grouped(value, decimals, false)
}

/// Whole-number price with separators, for index levels
pub fn format_integer(value: f64) -> String {
    grouped(value, 0, false)
}

/// "+1.23%" / "-0.45%"
pub fn format_percent(pct: f64) -> String {
    format!("{}{:.2}%", sign_prefix(pct), pct)
}

/// Signed number with fixed decimals, "+23.45" / "-5.67"
pub fn format_signed(value: f64, decimals: usize) -> String {
    format!("{}{:.*}", sign_prefix(value), decimals, value)
}

/// Moves under a hundredth of a percent render muted
pub fn is_flat(change_percent: f64) -> bool {
    change_percent.abs() < 0.01
}

/// Color of a percent figure
pub fn percent_color(change_percent: f64, theme: &Theme) -> Color {
    if is_flat(change_percent) {
        theme.text_muted
    } else {
        theme.change_color(change_percent)
    }
}
