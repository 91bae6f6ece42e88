//! Minimal SVG assembly.
//!
//! Elements are appended line by line onto a string body; numbers go
//! through [`fmt_num`] so output is stable across platforms (6 significant
//! figures, trailing zeros trimmed).

use std::fmt::Write as _;

use glam::DVec2;

use crate::types::{Font, Size};

/// An SVG document under construction.
pub struct SvgDocument {
    out: String,
}

impl SvgDocument {
    /// Start a document with the given `viewBox` (min-x, min-y, width,
    /// height).
    pub fn new(view_box: [f64; 4]) -> SvgDocument {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            fmt_num(view_box[0]),
            fmt_num(view_box[1]),
            fmt_num(view_box[2]),
            fmt_num(view_box[3]),
        );
        SvgDocument { out }
    }

    pub fn open_group(&mut self) {
        self.out.push_str("<g>\n");
    }

    pub fn close_group(&mut self) {
        self.out.push_str("</g>\n");
    }

    pub fn rect(&mut self, origin: DVec2, size: Size, fill: &str, stroke: &str, stroke_width: f64) {
        let _ = writeln!(
            self.out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" stroke="{stroke}" stroke-width="{}"/>"#,
            fmt_num(origin.x),
            fmt_num(origin.y),
            fmt_num(size.width),
            fmt_num(size.height),
            fmt_num(stroke_width),
        );
    }

    pub fn polygon(&mut self, points: &[DVec2], fill: &str, stroke: &str, stroke_width: f64) {
        let _ = writeln!(
            self.out,
            r#"<polygon points="{}" fill="{fill}" stroke="{stroke}" stroke-width="{}"/>"#,
            fmt_points(points),
            fmt_num(stroke_width),
        );
    }

    pub fn circle(&mut self, center: DVec2, radius: f64, fill: &str) {
        let _ = writeln!(
            self.out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}"/>"#,
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(radius),
        );
    }

    pub fn polyline(&mut self, points: &[DVec2], stroke: &str, stroke_width: f64) {
        let _ = writeln!(
            self.out,
            r#"<polyline points="{}" fill="none" stroke="{stroke}" stroke-width="{}"/>"#,
            fmt_points(points),
            fmt_num(stroke_width),
        );
    }

    /// A label centered on `at`, nudged down by `baseline_em` so it sits
    /// optically centered rather than on the baseline.
    pub fn text(&mut self, at: DVec2, content: &str, font: &Font, baseline_em: f64) {
        let _ = writeln!(
            self.out,
            r#"<text x="{}" y="{}" dy="{}em" text-anchor="middle" font-family="{}" font-size="{}">{}</text>"#,
            fmt_num(at.x),
            fmt_num(at.y),
            fmt_num(baseline_em),
            escape_text(&font.family),
            fmt_num(font.size),
            escape_text(content),
        );
    }

    pub fn finish(mut self) -> String {
        self.out.push_str("</svg>\n");
        self.out
    }
}

fn fmt_points(points: &[DVec2]) -> String {
    let mut out = String::new();
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", fmt_num(point.x), fmt_num(point.y));
    }
    out
}

/// Escape text content for embedding in an SVG element.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format a number to 6 significant figures with trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    const SIG_FIGS: i32 = 6;

    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(SIG_FIGS - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (SIG_FIGS - 1 - magnitude).max(0) as usize;
    let s = format!("{rounded:.decimals$}");
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    s.to_string()
}
