//! Chart and tree model.
//!
//! A chart owns its nodes in an arena indexed by [`NodeId`]: each node
//! stores its parent index and an ordered list of child indices, so the
//! tree is acyclic by construction and insertion order is the only sibling
//! order. Nodes store intrinsic data only; no computed coordinate is ever
//! kept, geometry is derived on access through [`Node`](crate::layout::Node)
//! views.

use glam::DVec2;

use crate::errors::ChartError;
use crate::layout::Node;
use crate::log;
use crate::render;
use crate::shape::ShapeKind;
use crate::text::{ProportionalMeasurer, TextMeasurer};
use crate::types::{Direction, Font, Size};

/// Index of a node within its chart's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) content: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) explicit: Option<Size>,
    pub(crate) shape: ShapeKind,
}

/// A free-standing connection between two nodes, referenced by content.
///
/// Connections outside the parent/child tree are declared for API parity
/// with the chart operations below but are rejected by all of them.
#[derive(Debug, Clone, Default)]
pub struct Connection {
    pub id: String,
    pub source: String,
    pub target: String,
    pub path: Vec<DVec2>,
}

/// One document: a tree of labeled boxes plus the layout configuration.
pub struct Chart {
    pub(crate) direction: Direction,
    pub(crate) document_padding: f64,
    pub(crate) neighbor_padding: f64,
    pub(crate) text_padding: f64,
    pub(crate) font: Font,
    pub(crate) measurer: Box<dyn TextMeasurer>,
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) root: Option<NodeId>,
}

impl std::fmt::Debug for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chart")
            .field("direction", &self.direction)
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

impl Chart {
    /// Create an empty chart growing in `direction`, with the default
    /// paddings (40 document, 20 neighbor, 10 text) and font.
    pub fn new(direction: Direction) -> Chart {
        Chart {
            direction,
            document_padding: 40.0,
            neighbor_padding: 20.0,
            text_padding: 10.0,
            font: Font::default(),
            measurer: Box::new(ProportionalMeasurer),
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Override the layout paddings.
    pub fn with_paddings(mut self, document: f64, neighbor: f64, text: f64) -> Chart {
        self.document_padding = document;
        self.neighbor_padding = neighbor;
        self.text_padding = text;
        self
    }

    /// Override the label font.
    pub fn with_font(mut self, font: Font) -> Chart {
        self.font = font;
        self
    }

    /// Replace the text measurer (e.g. with one backed by real font
    /// rasterization).
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Chart {
        self.measurer = Box::new(measurer);
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    /// The root node, if any node has been added yet.
    pub fn root(&self) -> Option<Node<'_>> {
        self.root.map(|id| Node::new(self, id))
    }

    /// Look up a node view by id.
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then(|| Node::new(self, id))
    }

    /// Add a node without an explicit parent: the first one becomes the
    /// root, later ones attach under the root.
    pub fn add_node(
        &mut self,
        content: impl Into<String>,
        shape: ShapeKind,
    ) -> Result<NodeId, ChartError> {
        match self.root {
            None => self.insert(None, content.into(), shape, None),
            Some(root) => self.insert(Some(root), content.into(), shape, None),
        }
    }

    /// [`add_node`](Chart::add_node) with an explicit size instead of a
    /// measured one.
    pub fn add_sized_node(
        &mut self,
        content: impl Into<String>,
        shape: ShapeKind,
        width: f64,
        height: f64,
    ) -> Result<NodeId, ChartError> {
        let explicit = validated_size(width, height)?;
        match self.root {
            None => self.insert(None, content.into(), shape, Some(explicit)),
            Some(root) => self.insert(Some(root), content.into(), shape, Some(explicit)),
        }
    }

    /// Append a child under `parent`, after its existing children.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        content: impl Into<String>,
        shape: ShapeKind,
    ) -> Result<NodeId, ChartError> {
        self.insert(Some(parent), content.into(), shape, None)
    }

    /// [`add_child`](Chart::add_child) with an explicit size instead of a
    /// measured one.
    pub fn add_sized_child(
        &mut self,
        parent: NodeId,
        content: impl Into<String>,
        shape: ShapeKind,
        width: f64,
        height: f64,
    ) -> Result<NodeId, ChartError> {
        let explicit = validated_size(width, height)?;
        self.insert(Some(parent), content.into(), shape, Some(explicit))
    }

    fn insert(
        &mut self,
        parent: Option<NodeId>,
        content: String,
        shape: ShapeKind,
        explicit: Option<Size>,
    ) -> Result<NodeId, ChartError> {
        if content.trim().is_empty() {
            return Err(ChartError::EmptyContent);
        }
        if let Some(parent) = parent {
            if parent.0 >= self.nodes.len() {
                return Err(ChartError::UnknownNode { id: parent.0 });
            }
        }

        log::debug!(content = %content, parent = ?parent, "adding node");

        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            content,
            parent,
            children: Vec::new(),
            explicit,
            shape,
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.root = Some(id),
        }
        Ok(id)
    }

    /// Pre-order search for the first node whose content equals `content`.
    pub fn find(&self, content: &str) -> Option<Node<'_>> {
        self.find_from(self.root?, content)
    }

    fn find_from(&self, id: NodeId, content: &str) -> Option<Node<'_>> {
        if self.nodes[id.0].content == content {
            return Some(Node::new(self, id));
        }
        self.nodes[id.0]
            .children
            .iter()
            .find_map(|&child| self.find_from(child, content))
    }

    /// Serialize the chart to an SVG document.
    pub fn to_svg(&self) -> String {
        render::chart_to_svg(self)
    }

    pub fn update_node(&mut self, _id: NodeId) -> Result<(), ChartError> {
        Err(ChartError::Unsupported {
            operation: "update node",
        })
    }

    pub fn remove_node(&mut self, _content: &str) -> Result<(), ChartError> {
        Err(ChartError::Unsupported {
            operation: "remove node",
        })
    }

    pub fn add_connection(&mut self, _connection: Connection) -> Result<(), ChartError> {
        Err(ChartError::Unsupported {
            operation: "add connection",
        })
    }

    pub fn update_connection(&mut self, _connection: Connection) -> Result<(), ChartError> {
        Err(ChartError::Unsupported {
            operation: "update connection",
        })
    }

    pub fn remove_connection(&mut self, _id: &str) -> Result<(), ChartError> {
        Err(ChartError::Unsupported {
            operation: "remove connection",
        })
    }
}

fn validated_size(width: f64, height: f64) -> Result<Size, ChartError> {
    if !width.is_finite() || width <= 0.0 {
        return Err(ChartError::InvalidDimension {
            dimension: "width",
            value: width,
        });
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(ChartError::InvalidDimension {
            dimension: "height",
            value: height,
        });
    }
    Ok(Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Parallelogram, Rectangle};

    fn chart() -> Chart {
        Chart::new(Direction::TopDown)
    }

    #[test]
    fn first_add_becomes_root_later_adds_attach_under_it() {
        let mut chart = chart();
        let root = chart.add_node("root", Rectangle.into()).unwrap();
        let second = chart.add_node("second", Rectangle.into()).unwrap();
        assert_eq!(chart.root().unwrap().id(), root);
        let parent = chart.node(second).unwrap().parent().unwrap();
        assert_eq!(parent.id(), root);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut chart = chart();
        let root = chart.add_node("root", Rectangle.into()).unwrap();
        chart.add_child(root, "a", Rectangle.into()).unwrap();
        chart.add_child(root, "b", Parallelogram::default().into()).unwrap();
        chart.add_child(root, "c", Rectangle.into()).unwrap();
        let labels: Vec<&str> = chart
            .root()
            .unwrap()
            .children()
            .map(|child| child.content())
            .collect();
        assert_eq!(labels, ["a", "b", "c"]);
    }

    #[test]
    fn find_searches_pre_order_and_misses_cleanly() {
        let mut chart = chart();
        let root = chart.add_node("root", Rectangle.into()).unwrap();
        let a = chart.add_child(root, "a", Rectangle.into()).unwrap();
        chart.add_child(a, "deep", Rectangle.into()).unwrap();
        assert_eq!(chart.find("deep").unwrap().content(), "deep");
        assert!(chart.find("absent").is_none());
    }

    #[test]
    fn empty_content_is_rejected() {
        let mut chart = chart();
        let err = chart.add_node("   ", Rectangle.into()).unwrap_err();
        assert!(matches!(err, ChartError::EmptyContent));
    }

    #[test]
    fn explicit_dimensions_are_validated() {
        let mut chart = chart();
        let err = chart
            .add_sized_node("root", Rectangle.into(), -1.0, 40.0)
            .unwrap_err();
        assert!(matches!(
            err,
            ChartError::InvalidDimension {
                dimension: "width",
                ..
            }
        ));
        let err = chart
            .add_sized_node("root", Rectangle.into(), 100.0, f64::NAN)
            .unwrap_err();
        assert!(matches!(
            err,
            ChartError::InvalidDimension {
                dimension: "height",
                ..
            }
        ));
    }

    #[test]
    fn child_of_foreign_id_is_rejected() {
        let mut chart = chart();
        let err = chart
            .add_child(NodeId(7), "orphan", Rectangle.into())
            .unwrap_err();
        assert!(matches!(err, ChartError::UnknownNode { id: 7 }));
    }

    #[test]
    fn mutating_operations_report_unsupported_distinctly() {
        let mut chart = chart();
        let root = chart.add_node("root", Rectangle.into()).unwrap();
        for err in [
            chart.update_node(root).unwrap_err(),
            chart.remove_node("root").unwrap_err(),
            chart.add_connection(Connection::default()).unwrap_err(),
            chart.update_connection(Connection::default()).unwrap_err(),
            chart.remove_connection("c1").unwrap_err(),
        ] {
            assert!(matches!(err, ChartError::Unsupported { .. }));
        }
    }
}
