//! stemma — tree-structured flowcharts rendered to SVG.
//!
//! A chart is an ordered tree of labeled boxes laid out in one of four
//! growth directions (top-down, bottom-up, left-to-right, right-to-left).
//! Geometry is never stored: size, position, anchor and edge points are
//! recomputed on access from pure, direction-generic recursive formulas in
//! [`layout`]. The renderer serializes the tree as rectangles, polygons,
//! connector polylines, markers and labels inside a direction-aware
//! viewport.
//!
//! Charts can be built programmatically through [`Chart`], or parsed from a
//! small line-based prompt:
//!
//! ```
//! let prompt = "demo TD
//! Start --> fetch input
//! Start --> report -t p
//! ";
//! let document = stemma::parse(prompt)?;
//! let svg = document.chart.to_svg();
//! assert!(svg.starts_with("<svg"));
//! # Ok::<(), stemma::ParseError>(())
//! ```

use pest_derive::Parser;

pub mod chart;
pub mod errors;
pub mod layout;
mod log;
pub mod parse;
mod render;
pub mod shape;
mod svg;
pub mod text;
pub mod types;

pub use chart::{Chart, Connection, NodeId};
pub use errors::{ChartError, ParseError};
pub use layout::Node;
pub use parse::{Document, parse, parse_named};
pub use render::connectors;
pub use shape::{Outline, Parallelogram, Rectangle, Shape, ShapeKind};
pub use text::{ProportionalMeasurer, TextMeasurer};
pub use types::{Axis, Direction, Font, Heading, Size};

#[derive(Parser)]
#[grammar = "stemma.pest"]
pub struct PromptParser;

/// Parse a prompt and render it to an SVG document in one step.
pub fn generate(source: &str) -> Result<String, miette::Report> {
    let document = parse::parse(source)?;
    Ok(document.chart.to_svg())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_renders_a_parsed_prompt() {
        let svg = generate("demo LR\nStart --> woop\nwoop --> waka\n").unwrap();
        assert!(svg.contains(">Start</text>"));
        assert!(svg.contains(">waka</text>"));
        assert_eq!(svg.matches("<polyline").count(), 2);
    }

    #[test]
    fn generate_surfaces_parse_diagnostics() {
        assert!(generate("demo XX\na --> b\n").is_err());
    }
}
