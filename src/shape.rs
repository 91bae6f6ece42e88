//! Node shape strategies.
//!
//! Each shape knows three things: how to turn a measured label into its own
//! box size, where its edge midpoints sit, and what outline to draw. The
//! rest of the layout and connector logic is shape-agnostic, so adding a
//! shape means implementing exactly these three methods.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use crate::types::{Heading, Size};

/// Default slant distance for parallelogram nodes.
pub const DEFAULT_SKEW: f64 = 10.0;

/// Outline geometry handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    Rect { origin: DVec2, size: Size },
    Polygon(Vec<DVec2>),
}

/// Common behavior for all shapes.
#[enum_dispatch]
pub trait Shape {
    /// Box size given the measured label extent, an optional explicit
    /// override, and the chart's text padding.
    fn size(&self, measured: Size, explicit: Option<Size>, text_padding: f64) -> Size;

    /// Midpoint of the edge facing `heading`, for a box at `origin`.
    fn edge_point(&self, heading: Heading, origin: DVec2, size: Size) -> DVec2;

    /// Renderable outline for a box at `origin`.
    fn outline(&self, origin: DVec2, size: Size) -> Outline;
}

/// A plain rectangle.
///
/// Width gets a text padding on both sides; height only below the baseline,
/// since a box needs clearance left and right but not above the cap height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle;

impl Shape for Rectangle {
    fn size(&self, measured: Size, explicit: Option<Size>, text_padding: f64) -> Size {
        match explicit {
            Some(size) => size,
            None => Size::new(
                measured.width + 2.0 * text_padding,
                measured.height + text_padding,
            ),
        }
    }

    fn edge_point(&self, heading: Heading, origin: DVec2, size: Size) -> DVec2 {
        let Size { width, height } = size;
        match heading {
            Heading::Top => origin + dvec2(width / 2.0, 0.0),
            Heading::Bottom => origin + dvec2(width / 2.0, height),
            Heading::Left => origin + dvec2(0.0, height / 2.0),
            Heading::Right => origin + dvec2(width, height / 2.0),
        }
    }

    fn outline(&self, origin: DVec2, size: Size) -> Outline {
        Outline::Rect { origin, size }
    }
}

/// A quadrilateral whose top edge is shifted right by `skew` relative to the
/// bottom edge.
///
/// The skew widens the box (even when an explicit width is given), and the
/// left/right edge points move inward by half the skew so they land on the
/// slanted edges instead of the bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallelogram {
    pub skew: f64,
}

impl Default for Parallelogram {
    fn default() -> Parallelogram {
        Parallelogram { skew: DEFAULT_SKEW }
    }
}

impl Shape for Parallelogram {
    fn size(&self, measured: Size, explicit: Option<Size>, text_padding: f64) -> Size {
        let base = Rectangle.size(measured, explicit, text_padding);
        Size::new(base.width + self.skew, base.height)
    }

    fn edge_point(&self, heading: Heading, origin: DVec2, size: Size) -> DVec2 {
        let Size { width, height } = size;
        match heading {
            Heading::Left => origin + dvec2(self.skew / 2.0, height / 2.0),
            Heading::Right => origin + dvec2(width - self.skew / 2.0, height / 2.0),
            Heading::Top | Heading::Bottom => Rectangle.edge_point(heading, origin, size),
        }
    }

    fn outline(&self, origin: DVec2, size: Size) -> Outline {
        let Size { width, height } = size;
        Outline::Polygon(vec![
            origin + dvec2(self.skew, 0.0),
            origin + dvec2(width, 0.0),
            origin + dvec2(width - self.skew, height),
            origin + dvec2(0.0, height),
        ])
    }
}

/// The closed set of shapes a node can take.
#[enum_dispatch(Shape)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Rectangle,
    Parallelogram,
}

impl Default for ShapeKind {
    fn default() -> ShapeKind {
        ShapeKind::Rectangle(Rectangle)
    }
}
