//! Pre-order SVG rendering of a chart.
//!
//! Every node contributes one group: its four edge-point markers, its
//! parent-anchor marker, one connector polyline per child, the child groups
//! themselves, then its outline and label. The outline comes after the
//! children so boxes overlay the connector stubs that run underneath them.

use glam::DVec2;

use crate::chart::Chart;
use crate::layout::{Node, connector};
use crate::log;
use crate::shape::Outline;
use crate::svg::SvgDocument;
use crate::types::{Direction, Heading};

const STROKE: &str = "black";
const STROKE_WIDTH: f64 = 1.0;
const FILL: &str = "lightgray";
const MARKER_FILL: &str = "orangered";
const MARKER_RADIUS: f64 = 2.0;
/// Downward baseline nudge, in em, that optically centers a label.
const LABEL_BASELINE_EM: f64 = 0.3;

pub(crate) fn chart_to_svg(chart: &Chart) -> String {
    log::debug!(
        direction = ?chart.direction,
        nodes = chart.nodes.len(),
        "rendering chart"
    );
    let mut doc = SvgDocument::new(view_box(chart));
    if let Some(root) = chart.root() {
        emit_node(&mut doc, chart, root);
    }
    doc.finish()
}

/// The visible viewport: the root's total size plus the document padding on
/// all sides. The tree extends toward negative coordinates for bottom-up
/// and right-to-left growth, so the origin shifts by the total extent on
/// the primary axis, and the secondary axis recenters around the root box.
fn view_box(chart: &Chart) -> [f64; 4] {
    let padding = chart.document_padding;
    let Some(root) = chart.root() else {
        return [0.0, 0.0, 2.0 * padding, 2.0 * padding];
    };
    let origin = root.origin();
    let size = root.size();
    let total = root.total_size();
    let (min_x, min_y) = match chart.direction {
        Direction::TopDown => (
            origin.x - total.width / 2.0 + size.width / 2.0 - padding,
            origin.y - padding,
        ),
        Direction::BottomUp => (
            origin.x - total.width / 2.0 + size.width / 2.0 - padding,
            origin.y - total.height - padding,
        ),
        Direction::LeftToRight => (
            origin.x - padding,
            origin.y - total.height / 2.0 + size.height / 2.0 - padding,
        ),
        Direction::RightToLeft => (
            origin.x - total.width - padding,
            origin.y - total.height / 2.0 + size.height / 2.0 - padding,
        ),
    };
    [
        min_x,
        min_y,
        total.width + 2.0 * padding,
        total.height + 2.0 * padding,
    ]
}

fn emit_node(doc: &mut SvgDocument, chart: &Chart, node: Node<'_>) {
    doc.open_group();
    for heading in Heading::ALL {
        doc.circle(node.edge_point(heading), MARKER_RADIUS, MARKER_FILL);
    }
    doc.circle(node.parent_anchor(), MARKER_RADIUS, MARKER_FILL);
    for child in node.children() {
        doc.polyline(&connector(node, child), STROKE, STROKE_WIDTH);
    }
    for child in node.children() {
        emit_node(doc, chart, child);
    }
    emit_outline(doc, &node.outline());
    doc.text(node.center(), node.content(), &chart.font, LABEL_BASELINE_EM);
    doc.close_group();
}

fn emit_outline(doc: &mut SvgDocument, outline: &Outline) {
    match outline {
        Outline::Rect { origin, size } => doc.rect(*origin, *size, FILL, STROKE, STROKE_WIDTH),
        Outline::Polygon(points) => doc.polygon(points, FILL, STROKE, STROKE_WIDTH),
    }
}

/// Connector points for every parent/child pair, in render order.
/// Exposed for callers that consume geometry without serializing.
pub fn connectors(chart: &Chart) -> Vec<[DVec2; 4]> {
    let mut out = Vec::new();
    if let Some(root) = chart.root() {
        collect_connectors(root, &mut out);
    }
    out
}

fn collect_connectors(node: Node<'_>, out: &mut Vec<[DVec2; 4]>) {
    for child in node.children() {
        out.push(connector(node, child));
    }
    for child in node.children() {
        collect_connectors(child, out);
    }
}
