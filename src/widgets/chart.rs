//! Chart widgets: Sparkline (block chars) and LineChart (braille dots)

use ratatui::prelude::*;

use crate::market::ChartPoint;
use crate::themes::Theme;
use crate::widgets::price_display::format_price;

// ─── Block-character sparkline ──────────────────────────────────────

/// Unicode block characters for sparkline (8 levels from empty to full)
const SPARK_CHARS: [char; 8] = ['\u{2581}', '\u{2582}', '\u{2583}', '\u{2584}', '\u{2585}', '\u{2586}', '\u{2587}', '\u{2588}'];

/// Min and range of a slice; a flat slice gets range 1.0
fn scale(values: &[f64]) -> (f64, f64) {
    let min_val = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_val = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = if (max_val - min_val).abs() < f64::EPSILON {
        1.0
    } else {
        max_val - min_val
    };
    (min_val, range)
}

/// Block level (0-7) of each value relative to the slice's own range
pub fn spark_levels(values: &[f64]) -> Vec<usize> {
    let (min_val, range) = scale(values);
    values
        .iter()
        .map(|&v| {
            let normalized = ((v - min_val) / range).clamp(0.0, 1.0);
            ((normalized * 7.0).round() as usize).min(7)
        })
        .collect()
}

/// Compact sparkline over a borrowed series, rendered in 1 row
pub struct Sparkline<'a> {
    data: &'a [f64],
    color: Color,
}

impl<'a> Sparkline<'a> {
    pub fn new(data: &'a [f64], color: Color) -> Self {
        Self { data, color }
    }

    /// Render the most recent points that fit into a single-row area
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 || self.data.is_empty() {
            return;
        }

        let visible_count = (area.width as usize).min(self.data.len());
        let visible = &self.data[self.data.len() - visible_count..];

        for (i, level) in spark_levels(visible).into_iter().enumerate() {
            let x = area.x + i as u16;
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(SPARK_CHARS[level]);
                cell.set_style(Style::default().fg(self.color));
            }
        }
    }
}

// ─── Braille-dot line chart ─────────────────────────────────────────

/// Braille dot positions (each cell is 2 columns x 4 rows)
/// Bit positions:
///   0x01 0x08
///   0x02 0x10
///   0x04 0x20
///   0x40 0x80
const BRAILLE_BASE: u32 = 0x2800;

const BIT_MAP: [[u32; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// A data series for the line chart
pub struct Series<'a> {
    pub data: Vec<f64>,
    pub color: Color,
    pub label: &'a str,
}

impl<'a> Series<'a> {
    pub fn new(label: &'a str, color: Color, data: Vec<f64>) -> Self {
        Self { data, color, label }
    }

    /// Close values of a generated chart series
    pub fn from_points(label: &'a str, color: Color, points: &[ChartPoint]) -> Self {
        Self::new(label, color, points.iter().map(|p| p.close).collect())
    }
}

/// Line chart using braille-dot rendering for high resolution
pub struct LineChart<'a> {
    series: Vec<Series<'a>>,
    x_labels: Vec<String>,
}

impl<'a> Default for LineChart<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> LineChart<'a> {
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            x_labels: Vec::new(),
        }
    }

    pub fn series(mut self, series: Series<'a>) -> Self {
        self.series.push(series);
        self
    }

    /// Labels spread evenly along the x-axis (first, middle, last)
    pub fn x_labels(mut self, labels: Vec<String>) -> Self {
        self.x_labels = labels;
        self
    }

    /// Render the line chart into the given area
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.height < 3 || area.width < 12 {
            return;
        }

        // Reserve space for Y-axis labels and the bottom axis row
        let y_label_width: u16 = 9;
        let chart_x = area.x + y_label_width;
        let chart_width = area.width.saturating_sub(y_label_width);
        let chart_height = area.height.saturating_sub(1);

        let all_values: Vec<f64> = self.series.iter().flat_map(|s| s.data.iter()).copied().collect();

        if all_values.is_empty() {
            put_str(buf, area.x + area.width.saturating_sub(7) / 2, area.y + area.height / 2, "No data", theme.text_muted, area.right());
            return;
        }

        let (min_val, range) = scale(&all_values);
        let max_val = min_val + range;

        // Braille grid resolution: each cell = 2 x-dots, 4 y-dots
        let grid_w = chart_width as usize * 2;
        let grid_h = chart_height as usize * 4;

        let mut grid: Vec<Vec<bool>> = vec![vec![false; grid_w]; grid_h];
        let mut cell_color: Vec<Vec<Option<Color>>> =
            vec![vec![None; chart_width as usize]; chart_height as usize];

        for series in &self.series {
            let n = series.data.len();
            if n < 2 {
                continue;
            }

            let visible_count = grid_w.min(n);
            let start = n - visible_count;
            let to_grid = |i: usize| -> (i32, i32) {
                let gx = ((i - start) as f64 / (visible_count - 1) as f64 * (grid_w - 1) as f64).round() as i32;
                let normalized = ((series.data[i] - min_val) / range).clamp(0.0, 1.0);
                let gy = ((1.0 - normalized) * (grid_h - 1) as f64).round() as i32;
                (gx, gy)
            };

            // Connect consecutive points (Bresenham)
            for i in start..(n - 1) {
                let (x0, y0) = to_grid(i);
                let (x1, y1) = to_grid(i + 1);

                let dx = (x1 - x0).abs();
                let dy = -(y1 - y0).abs();
                let sx = if x0 < x1 { 1 } else { -1 };
                let sy = if y0 < y1 { 1 } else { -1 };
                let mut err = dx + dy;
                let mut cx = x0;
                let mut cy = y0;

                loop {
                    let gx = (cx.max(0) as usize).min(grid_w - 1);
                    let gy = (cy.max(0) as usize).min(grid_h - 1);
                    grid[gy][gx] = true;
                    cell_color[gy / 4][gx / 2] = Some(series.color);

                    if cx == x1 && cy == y1 {
                        break;
                    }
                    let e2 = 2 * err;
                    if e2 >= dy {
                        err += dy;
                        cx += sx;
                    }
                    if e2 <= dx {
                        err += dx;
                        cy += sy;
                    }
                }
            }
        }

        // Render braille characters
        for cy in 0..chart_height as usize {
            for cx in 0..chart_width as usize {
                let mut braille: u32 = 0;
                for (row, bits) in BIT_MAP.iter().enumerate() {
                    for (col, bit) in bits.iter().enumerate() {
                        if grid[cy * 4 + row][cx * 2 + col] {
                            braille |= bit;
                        }
                    }
                }

                if braille != 0 {
                    let ch = char::from_u32(BRAILLE_BASE + braille).unwrap_or(' ');
                    if let Some(cell) = buf.cell_mut((chart_x + cx as u16, area.y + cy as u16)) {
                        cell.set_char(ch);
                        let color = cell_color[cy][cx].unwrap_or(theme.accent);
                        cell.set_style(Style::default().fg(color));
                    }
                }
            }
        }

        // Y-axis labels (top, middle, bottom)
        let labels = [
            (area.y, max_val),
            (area.y + chart_height / 2, (max_val + min_val) / 2.0),
            (area.y + chart_height.saturating_sub(1), min_val),
        ];
        for (y, value) in labels {
            let padded = format!("{:>8}", format_price(value));
            put_str(buf, area.x, y, &padded, theme.text_muted, chart_x);
        }

        // X-axis labels
        let axis_y = area.y + chart_height;
        let count = self.x_labels.len();
        for (i, label) in self.x_labels.iter().enumerate() {
            let label_len = label.chars().count() as u16;
            let slot = if count > 1 {
                (chart_width.saturating_sub(label_len) as usize * i / (count - 1)) as u16
            } else {
                0
            };
            put_str(buf, chart_x + slot, axis_y, label, theme.text_muted, area.right());
        }

        // Legend (if multiple series), right-aligned on the axis row
        if self.series.len() > 1 {
            let legend_len: u16 = self.series.iter().map(|s| s.label.chars().count() as u16 + 3).sum();
            let mut lx = area.right().saturating_sub(legend_len);
            for series in &self.series {
                put_str(buf, lx, axis_y, "\u{25CF}", series.color, area.right());
                put_str(buf, lx + 1, axis_y, series.label, theme.text_secondary, area.right());
                lx += series.label.chars().count() as u16 + 3;
            }
        }
    }
}

/// Write `text` starting at (x, y), clipped before `limit`
fn put_str(buf: &mut Buffer, x: u16, y: u16, text: &str, color: Color, limit: u16) {
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as u16;
        if cx >= limit {
            break;
        }
        if let Some(cell) = buf.cell_mut((cx, y)) {
            cell.set_char(ch);
            cell.set_style(Style::default().fg(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::generator::generate_series;
    use crate::ui::buffer_text;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spark_levels_span_range() {
        assert_eq!(spark_levels(&[1.0, 2.0, 3.0]), vec![0, 4, 7]);
        assert_eq!(spark_levels(&[5.0, 5.0]), vec![0, 0]);
        assert!(spark_levels(&[]).is_empty());
    }

    #[test]
    fn test_sparkline_keeps_latest_points() {
        let data: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        Sparkline::new(&data, Color::Green).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "\u{2581}");
        assert_eq!(buf[(9, 0)].symbol(), "\u{2588}");
    }

    #[test]
    fn test_line_chart_draws_braille_and_labels() {
        let mut rng = StdRng::seed_from_u64(4);
        let points = generate_series(&mut rng, 2456.0, 48, 0.008);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);
        LineChart::new()
            .series(Series::from_points("KOSPI", theme.neon_green, &points))
            .x_labels(vec!["00:00".into(), "24:00".into(), "47:00".into()])
            .render(area, &mut buf, &theme);

        let text = buffer_text(&buf);
        assert!(text.contains("00:00"));
        assert!(text.contains("47:00"));
        assert!(text.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c)));
    }

    #[test]
    fn test_line_chart_without_data() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        LineChart::new().render(area, &mut buf, &theme);
        assert!(buffer_text(&buf).contains("No data"));
    }
}
