//! 累計節省金額折線圖，輸出為獨立的 SVG 文件

use super::summary::format_thousands;
use crate::core::YearlySavings;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 56.0;
const Y_TICKS: usize = 5;
const MAX_X_LABELS: u32 = 12;

struct Frame {
    first_year: f64,
    last_year: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn new(points: &[YearlySavings]) -> Self {
        let first_year = points.first().map(|p| f64::from(p.year)).unwrap_or(1.0);
        let last_year = points.last().map(|p| f64::from(p.year)).unwrap_or(1.0);

        // y 軸一定包含 0，讓正負趨勢一眼可辨
        let (mut y_min, mut y_max) = points
            .iter()
            .map(|p| p.cumulative_savings)
            .filter(|v| v.is_finite())
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if (y_max - y_min).abs() < f64::EPSILON {
            y_min -= 1.0;
            y_max += 1.0;
        }

        Self {
            first_year,
            last_year,
            y_min,
            y_max,
        }
    }

    fn x(&self, year: f64) -> f64 {
        let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        if self.last_year > self.first_year {
            MARGIN_LEFT + (year - self.first_year) / (self.last_year - self.first_year) * plot_width
        } else {
            MARGIN_LEFT + plot_width / 2.0
        }
    }

    fn y(&self, value: f64) -> f64 {
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        MARGIN_TOP + (self.y_max - value) / (self.y_max - self.y_min) * plot_height
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn render_svg(points: &[YearlySavings], currency: &str) -> String {
    let frame = Frame::new(points);
    let plot_bottom = HEIGHT - MARGIN_BOTTOM;
    let plot_right = WIDTH - MARGIN_RIGHT;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = WIDTH,
        h = HEIGHT
    ));
    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"28\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"18\">Cumulative Savings Over Time</text>\n",
        WIDTH / 2.0
    ));

    // y 軸刻度與格線
    for i in 0..=Y_TICKS {
        let value = frame.y_min + (frame.y_max - frame.y_min) * i as f64 / Y_TICKS as f64;
        let y = frame.y(value);
        svg.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#e0e0e0\"/>\n",
            MARGIN_LEFT, y, plot_right, y
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-family=\"sans-serif\" font-size=\"11\">{}</text>\n",
            MARGIN_LEFT - 8.0,
            y + 4.0,
            format_thousands(value, 0)
        ));
    }

    if frame.y_min < 0.0 && frame.y_max > 0.0 {
        let zero = frame.y(0.0);
        svg.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#888\" stroke-dasharray=\"4 3\"/>\n",
            MARGIN_LEFT, zero, plot_right, zero
        ));
    }

    // 座標軸
    svg.push_str(&format!(
        "<line x1=\"{l:.1}\" y1=\"{t:.1}\" x2=\"{l:.1}\" y2=\"{b:.1}\" stroke=\"black\"/>\n",
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = plot_bottom
    ));
    svg.push_str(&format!(
        "<line x1=\"{:.1}\" y1=\"{b:.1}\" x2=\"{:.1}\" y2=\"{b:.1}\" stroke=\"black\"/>\n",
        MARGIN_LEFT,
        plot_right,
        b = plot_bottom
    ));

    let label_step = (points.len() as u32).div_ceil(MAX_X_LABELS).max(1);
    for point in points.iter().filter(|p| (p.year - 1) % label_step == 0) {
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"11\">{}</text>\n",
            frame.x(f64::from(point.year)),
            plot_bottom + 18.0,
            point.year
        ));
    }

    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"13\">Year</text>\n",
        MARGIN_LEFT + (plot_right - MARGIN_LEFT) / 2.0,
        HEIGHT - 12.0
    ));
    svg.push_str(&format!(
        "<text x=\"18\" y=\"{y:.1}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"13\" transform=\"rotate(-90 18 {y:.1})\">{} Saved</text>\n",
        escape(currency),
        y = MARGIN_TOP + (plot_bottom - MARGIN_TOP) / 2.0
    ));

    let coords: Vec<(f64, f64)> = points
        .iter()
        .filter(|p| p.cumulative_savings.is_finite())
        .map(|p| (frame.x(f64::from(p.year)), frame.y(p.cumulative_savings)))
        .collect();

    if coords.len() > 1 {
        let path = coords
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!(
            "<polyline points=\"{}\" fill=\"none\" stroke=\"#1f77b4\" stroke-width=\"2\"/>\n",
            path
        ));
    }
    for (x, y) in &coords {
        svg.push_str(&format!(
            "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"3.5\" fill=\"#1f77b4\"/>\n",
            x, y
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(net: f64, years: u32) -> Vec<YearlySavings> {
        (1..=years)
            .map(|year| YearlySavings {
                year,
                cumulative_savings: net * f64::from(year),
            })
            .collect()
    }

    #[test]
    fn test_one_marker_per_year() {
        let svg = render_svg(&series(-457.5, 10), "Rs");

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Cumulative Savings Over Time"));
        assert!(svg.contains(">Rs Saved</text>"));
        assert_eq!(svg.matches("<circle").count(), 10);
        assert_eq!(svg.matches("<polyline").count(), 1);
    }

    #[test]
    fn test_rising_series_goes_up_the_page() {
        let svg = render_svg(&series(100.0, 2), "Rs");
        let points = svg
            .split("points=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .unwrap();
        let ys: Vec<f64> = points
            .split(' ')
            .map(|pair| pair.split(',').nth(1).unwrap().parse().unwrap())
            .collect();
        // SVG 的 y 向下為正
        assert!(ys[1] < ys[0]);
    }

    #[test]
    fn test_flat_and_single_point_series() {
        let flat = render_svg(&series(0.0, 5), "Rs");
        assert_eq!(flat.matches("<circle").count(), 5);
        assert!(!flat.contains("NaN"));

        let single = render_svg(&series(250.0, 1), "Rs");
        assert_eq!(single.matches("<circle").count(), 1);
        assert_eq!(single.matches("<polyline").count(), 0);
    }

    #[test]
    fn test_long_lifespans_thin_out_year_labels() {
        let svg = render_svg(&series(10.0, 40), "$");
        let year_labels = svg.matches("font-size=\"11\">").count() - (Y_TICKS + 1);
        assert!(year_labels <= MAX_X_LABELS as usize);
    }

    #[test]
    fn test_currency_is_escaped() {
        let svg = render_svg(&series(1.0, 3), "<R&D>");
        assert!(svg.contains("&lt;R&amp;D&gt; Saved"));
    }
}
