//! The layout engine: direction-generic recursive geometry.
//!
//! Nothing in this module is stored. Every accessor derives its value from
//! the chart configuration, the node's intrinsic data, its ancestor chain,
//! and the total sizes of earlier siblings. Positions are expressed in
//! terms of the parent's anchor point, so position and anchor formulas are
//! mutually recursive up the ancestor chain; evaluating one node costs time
//! proportional to its depth. The dependency rule that keeps this
//! well-founded: a formula may read ancestors and earlier siblings, never
//! descendants of other subtrees or later siblings.
//!
//! Each formula is written once against the primary/secondary axis
//! decomposition of [`Direction`]; the four directions are parameter
//! combinations, which is also what makes the 180-degree rotation symmetry
//! hold structurally.

use glam::{DVec2, dvec2};

use crate::chart::{Chart, NodeId};
use crate::shape::{Outline, Shape, ShapeKind};
use crate::types::{Axis, Direction, Heading, Size};

/// Borrowed view of one node; all geometry accessors live here.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    chart: &'a Chart,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub(crate) fn new(chart: &'a Chart, id: NodeId) -> Node<'a> {
        Node { chart, id }
    }

    fn data(&self) -> &'a crate::chart::NodeData {
        &self.chart.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn content(&self) -> &'a str {
        &self.data().content
    }

    pub fn shape(&self) -> ShapeKind {
        self.data().shape
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.data().parent.map(|id| Node::new(self.chart, id))
    }

    /// Direct children in insertion order. Restartable: each call yields a
    /// fresh iterator over the same ordered sequence.
    pub fn children(self) -> impl Iterator<Item = Node<'a>> + 'a {
        self.data()
            .children
            .iter()
            .map(move |&id| Node::new(self.chart, id))
    }

    pub fn has_children(&self) -> bool {
        !self.data().children.is_empty()
    }

    // ------------------------------------------------------------------
    // Own size
    // ------------------------------------------------------------------

    /// The node's own box size: explicit if set, otherwise derived from the
    /// measured label extent, with shape-specific adjustments.
    pub fn size(&self) -> Size {
        let data = self.data();
        let measured = self.chart.measurer.measure(&data.content, &self.chart.font);
        data.shape
            .size(measured, data.explicit, self.chart.text_padding)
    }

    pub fn width(&self) -> f64 {
        self.size().width
    }

    pub fn height(&self) -> f64 {
        self.size().height
    }

    fn own(&self, axis: Axis) -> f64 {
        self.size().along(axis)
    }

    // ------------------------------------------------------------------
    // Total (subtree bounding) size
    // ------------------------------------------------------------------

    /// Bounding extent of this node's subtree along `axis`.
    ///
    /// Children stack outward along the primary axis (the deepest subtree
    /// dominates) and pack side by side along the secondary axis (their
    /// totals accumulate, but never below the node's own footprint).
    fn total(&self, axis: Axis) -> f64 {
        let padding = self.chart.neighbor_padding;
        let own = self.own(axis);
        if !self.has_children() {
            return own + padding;
        }
        if axis == self.chart.direction.primary_axis() {
            let deepest = self
                .children()
                .map(|child| child.total(axis))
                .fold(0.0, f64::max);
            own + 2.0 * padding + deepest
        } else {
            let packed: f64 = self.children().map(|child| child.total(axis)).sum();
            packed.max(own + padding)
        }
    }

    pub fn total_width(&self) -> f64 {
        self.total(Axis::Horizontal)
    }

    pub fn total_height(&self) -> f64 {
        self.total(Axis::Vertical)
    }

    pub fn total_size(&self) -> Size {
        Size::new(self.total_width(), self.total_height())
    }

    // ------------------------------------------------------------------
    // Position
    // ------------------------------------------------------------------

    /// Top-left corner of the node's box.
    pub fn origin(&self) -> DVec2 {
        dvec2(
            self.position(Axis::Horizontal),
            self.position(Axis::Vertical),
        )
    }

    pub fn x(&self) -> f64 {
        self.position(Axis::Horizontal)
    }

    pub fn y(&self) -> f64 {
        self.position(Axis::Vertical)
    }

    fn position(&self, axis: Axis) -> f64 {
        let Some(parent) = self.parent() else {
            // The root sits at the document padding for every direction;
            // the viewport origin compensates for negative growth.
            return self.chart.document_padding;
        };
        let direction = self.chart.direction;
        let padding = self.chart.neighbor_padding;
        let anchor = axis.component(parent.anchor(direction));
        if axis == direction.primary_axis() {
            if direction.growth() > 0.0 {
                anchor + padding
            } else {
                anchor - padding - self.own(axis)
            }
        } else {
            anchor - parent.total(axis) / 2.0 + self.total(axis) / 2.0 - self.own(axis) / 2.0
                + parent.bleed(axis)
                + self.earlier_siblings_extent(axis)
        }
    }

    /// Combined secondary extent of the siblings inserted before this node:
    /// siblings pack contiguously, earliest first, each claiming a slice
    /// equal to its own total extent.
    fn earlier_siblings_extent(&self, axis: Axis) -> f64 {
        let Some(parent) = self.parent() else {
            return 0.0;
        };
        parent
            .children()
            .take_while(|sibling| sibling.id != self.id)
            .map(|sibling| sibling.total(axis))
            .sum()
    }

    /// Slack that recenters the packed children when this node's footprint
    /// is wider than their combined extent. Applied once per level, for the
    /// direct children only.
    fn bleed(&self, axis: Axis) -> f64 {
        let packed: f64 = self.children().map(|child| child.total(axis)).sum();
        let total = self.total(axis);
        if total < packed {
            0.0
        } else {
            (total - packed) / 2.0
        }
    }

    // ------------------------------------------------------------------
    // Anchors and edge points
    // ------------------------------------------------------------------

    /// Midpoint of the box edge facing `heading`, shape-adjusted.
    pub fn edge_point(&self, heading: Heading) -> DVec2 {
        self.data()
            .shape
            .edge_point(heading, self.origin(), self.size())
    }

    /// The edge point facing `direction`, extended outward by the neighbor
    /// padding: where a connector leaves this node toward children placed
    /// in that direction.
    pub fn anchor(&self, direction: Direction) -> DVec2 {
        self.edge_point(direction.heading()) + direction.unit() * self.chart.neighbor_padding
    }

    /// Where connectors leave this node toward its children.
    pub fn parent_anchor(&self) -> DVec2 {
        self.anchor(self.chart.direction)
    }

    /// Where the connector from this node's parent arrives.
    pub fn child_anchor(&self) -> DVec2 {
        self.anchor(self.chart.direction.opposite())
    }

    /// Edge point under [`parent_anchor`](Node::parent_anchor).
    pub fn parent_edge_point(&self) -> DVec2 {
        self.edge_point(self.chart.direction.heading())
    }

    /// Edge point under [`child_anchor`](Node::child_anchor).
    pub fn child_edge_point(&self) -> DVec2 {
        self.edge_point(self.chart.direction.opposite().heading())
    }

    /// Renderable outline of the node's box.
    pub fn outline(&self) -> Outline {
        self.data().shape.outline(self.origin(), self.size())
    }

    /// Center of the node's box, where its label is drawn.
    pub fn center(&self) -> DVec2 {
        self.origin() + dvec2(self.width() / 2.0, self.height() / 2.0)
    }
}

/// The four-point polyline connecting a parent to one of its children:
/// parent edge point, parent anchor, child anchor, child edge point.
pub fn connector(parent: Node<'_>, child: Node<'_>) -> [DVec2; 4] {
    [
        parent.parent_edge_point(),
        parent.parent_anchor(),
        child.child_anchor(),
        child.child_edge_point(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Chart;
    use crate::shape::{Parallelogram, Rectangle};

    const DOC: f64 = 40.0;
    const NEIGHBOR: f64 = 20.0;

    fn chart(direction: Direction) -> Chart {
        Chart::new(direction).with_paddings(DOC, NEIGHBOR, 10.0)
    }

    /// Root plus `children` explicit-size 100x40 children.
    fn fan(direction: Direction, children: usize) -> Chart {
        let mut chart = chart(direction);
        let root = chart
            .add_sized_node("root", Rectangle.into(), 100.0, 40.0)
            .unwrap();
        for i in 0..children {
            chart
                .add_sized_child(root, format!("c{i}"), Rectangle.into(), 100.0, 40.0)
                .unwrap();
        }
        chart
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn root_sits_at_document_padding_in_every_direction() {
        for direction in Direction::ALL {
            let chart = fan(direction, 3);
            let root = chart.root().unwrap();
            assert_eq!(root.x(), DOC);
            assert_eq!(root.y(), DOC);
        }
    }

    #[test]
    fn leaf_total_is_own_plus_neighbor_padding_on_both_axes() {
        for direction in Direction::ALL {
            let chart = fan(direction, 0);
            let root = chart.root().unwrap();
            assert_eq!(root.total_width(), 100.0 + NEIGHBOR);
            assert_eq!(root.total_height(), 40.0 + NEIGHBOR);
        }
    }

    #[test]
    fn parent_totals_follow_the_two_axis_rules() {
        let chart = fan(Direction::TopDown, 3);
        let root = chart.root().unwrap();
        // Secondary: children pack side by side, 3 x (100 + 20).
        assert_eq!(root.total_width(), 360.0);
        // Primary: own + 2 paddings + deepest child subtree.
        assert_eq!(root.total_height(), 40.0 + 2.0 * NEIGHBOR + 60.0);
    }

    #[test]
    fn sibling_slices_are_contiguous() {
        for direction in Direction::ALL {
            let chart = fan(direction, 4);
            let root = chart.root().unwrap();
            let secondary = direction.primary_axis().other();
            let slices: Vec<(f64, f64)> = root
                .children()
                .map(|child| {
                    let start = child.position(secondary) - child.total(secondary) / 2.0
                        + child.own(secondary) / 2.0;
                    (start, child.total(secondary))
                })
                .collect();
            for pair in slices.windows(2) {
                let (start, extent) = pair[0];
                let (next_start, _) = pair[1];
                assert_close(next_start, start + extent);
            }
        }
    }

    #[test]
    fn single_child_is_centered_under_its_parent() {
        let mut chart = chart(Direction::TopDown);
        let root = chart
            .add_sized_node("Start", Rectangle.into(), 100.0, 40.0)
            .unwrap();
        let a = chart
            .add_sized_child(root, "A", Rectangle.into(), 100.0, 40.0)
            .unwrap();
        let b = chart
            .add_sized_child(a, "B", Rectangle.into(), 100.0, 40.0)
            .unwrap();

        let a = chart.node(a).unwrap();
        let b = chart.node(b).unwrap();
        // A's subtree height closes over B's.
        assert_eq!(
            a.total_height(),
            a.height() + 2.0 * NEIGHBOR + b.total_height()
        );
        // An only child centers under its parent.
        assert_close(b.x() + b.width() / 2.0, a.x() + a.width() / 2.0);
    }

    #[test]
    fn wide_parent_bleeds_children_toward_its_center() {
        let mut chart = chart(Direction::TopDown);
        let root = chart
            .add_sized_node("root", Rectangle.into(), 400.0, 40.0)
            .unwrap();
        chart
            .add_sized_child(root, "only", Rectangle.into(), 100.0, 40.0)
            .unwrap();
        let root = chart.root().unwrap();
        let child = chart.find("only").unwrap();
        // Parent footprint 420 vs packed children 120: the child group is
        // recentered inside the parent's span.
        assert_close(
            child.x() + child.width() / 2.0,
            root.x() + root.width() / 2.0,
        );
    }

    #[test]
    fn rotating_the_direction_mirrors_primary_and_keeps_secondary() {
        for direction in [Direction::TopDown, Direction::LeftToRight] {
            let build = |dir: Direction| {
                let mut chart = chart(dir);
                let root = chart
                    .add_sized_node("root", Rectangle.into(), 100.0, 40.0)
                    .unwrap();
                let a = chart
                    .add_sized_child(root, "a", Rectangle.into(), 100.0, 40.0)
                    .unwrap();
                chart
                    .add_sized_child(root, "b", Rectangle.into(), 100.0, 40.0)
                    .unwrap();
                chart
                    .add_sized_child(a, "a1", Rectangle.into(), 100.0, 40.0)
                    .unwrap();
                chart
            };
            let forward = build(direction);
            let reversed = build(direction.opposite());
            let primary = direction.primary_axis();
            let secondary = primary.other();

            let forward_root = forward.root().unwrap().center();
            let reversed_root = reversed.root().unwrap().center();
            for label in ["root", "a", "b", "a1"] {
                let f = forward.find(label).unwrap().center();
                let r = reversed.find(label).unwrap().center();
                assert_close(
                    primary.component(r) - primary.component(reversed_root),
                    -(primary.component(f) - primary.component(forward_root)),
                );
                assert_close(secondary.component(r), secondary.component(f));
            }
        }
    }

    #[test]
    fn anchors_extend_edge_points_by_neighbor_padding() {
        for direction in Direction::ALL {
            let chart = fan(direction, 1);
            let root = chart.root().unwrap();
            let anchor = root.parent_anchor();
            let edge = root.parent_edge_point();
            let delta = anchor - edge;
            assert_eq!(delta, direction.unit() * NEIGHBOR);
        }
    }

    #[test]
    fn connector_runs_edge_anchor_anchor_edge() {
        let chart = fan(Direction::TopDown, 1);
        let root = chart.root().unwrap();
        let child = chart.find("c0").unwrap();
        let points = connector(root, child);
        assert_eq!(points[0], dvec2(90.0, 80.0));
        assert_eq!(points[1], dvec2(90.0, 100.0));
        assert_eq!(points[2], dvec2(90.0, 100.0));
        assert_eq!(points[3], dvec2(90.0, 120.0));
    }

    #[test]
    fn parallelogram_edge_points_follow_the_slant() {
        let mut chart = chart(Direction::LeftToRight);
        chart
            .add_sized_node("skewed", Parallelogram { skew: 10.0 }.into(), 100.0, 40.0)
            .unwrap();
        let node = chart.root().unwrap();
        // Explicit width still gains the skew.
        assert_eq!(node.width(), 110.0);
        assert_eq!(node.edge_point(Heading::Left), dvec2(DOC + 5.0, DOC + 20.0));
        assert_eq!(
            node.edge_point(Heading::Right),
            dvec2(DOC + 105.0, DOC + 20.0)
        );
        assert_eq!(node.edge_point(Heading::Top), dvec2(DOC + 55.0, DOC));
    }
}
