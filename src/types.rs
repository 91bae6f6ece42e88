//! Closed vocabulary types shared by the layout engine and renderer.
//!
//! Directions and headings are closed sets fixed at compile time; every
//! formula matches them exhaustively, so an out-of-range value cannot exist.

use glam::{DVec2, dvec2};

/// Growth direction of a chart, fixed at construction.
///
/// The direction decomposes into two orthogonal parameters: the primary
/// [`Axis`] (which axis the tree grows along) and a growth sign (whether
/// children sit at larger or smaller coordinates than their parent). Every
/// layout formula is written once against that decomposition; the four
/// directions fall out of the parameter combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    TopDown,
    BottomUp,
    LeftToRight,
    RightToLeft,
}

impl Direction {
    /// All directions, in declaration order.
    pub const ALL: [Direction; 4] = [
        Direction::TopDown,
        Direction::BottomUp,
        Direction::LeftToRight,
        Direction::RightToLeft,
    ];

    /// The direction rotated by 180 degrees.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::TopDown => Direction::BottomUp,
            Direction::BottomUp => Direction::TopDown,
            Direction::LeftToRight => Direction::RightToLeft,
            Direction::RightToLeft => Direction::LeftToRight,
        }
    }

    /// Heading of the box edge where connectors leave toward children.
    pub fn heading(self) -> Heading {
        match self {
            Direction::TopDown => Heading::Bottom,
            Direction::BottomUp => Heading::Top,
            Direction::LeftToRight => Heading::Right,
            Direction::RightToLeft => Heading::Left,
        }
    }

    /// Axis the tree grows along.
    pub fn primary_axis(self) -> Axis {
        match self {
            Direction::TopDown | Direction::BottomUp => Axis::Vertical,
            Direction::LeftToRight | Direction::RightToLeft => Axis::Horizontal,
        }
    }

    /// Sign of growth along the primary axis: positive when children sit at
    /// larger coordinates than their parent.
    pub fn growth(self) -> f64 {
        match self {
            Direction::TopDown | Direction::LeftToRight => 1.0,
            Direction::BottomUp | Direction::RightToLeft => -1.0,
        }
    }

    /// Unit vector pointing from a parent toward its children.
    pub fn unit(self) -> DVec2 {
        match self {
            Direction::TopDown => dvec2(0.0, 1.0),
            Direction::BottomUp => dvec2(0.0, -1.0),
            Direction::LeftToRight => dvec2(1.0, 0.0),
            Direction::RightToLeft => dvec2(-1.0, 0.0),
        }
    }

    /// Two-letter keyword used by the prompt syntax (TD, BT, LR, RL).
    pub fn from_keyword(word: &str) -> Option<Direction> {
        match word.to_ascii_uppercase().as_str() {
            "TD" => Some(Direction::TopDown),
            "BT" => Some(Direction::BottomUp),
            "LR" => Some(Direction::LeftToRight),
            "RL" => Some(Direction::RightToLeft),
            _ => None,
        }
    }
}

/// Compass heading of one of a node's box edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Top,
    Bottom,
    Left,
    Right,
}

impl Heading {
    /// All headings, in declaration order.
    pub const ALL: [Heading; 4] = [
        Heading::Top,
        Heading::Bottom,
        Heading::Left,
        Heading::Right,
    ];

    /// The heading facing the other way.
    pub fn opposite(self) -> Heading {
        match self {
            Heading::Top => Heading::Bottom,
            Heading::Bottom => Heading::Top,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// One of the two coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// This axis' component of a point.
    pub fn component(self, point: DVec2) -> f64 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Size {
        Size { width, height }
    }

    /// The extent along one axis.
    pub fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Font used for every label in a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f64,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64) -> Font {
        Font {
            family: family.into(),
            size,
        }
    }
}

impl Default for Font {
    fn default() -> Font {
        Font::new("sans-serif", 24.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_flips_growth_and_keeps_axis() {
        for dir in Direction::ALL {
            let opp = dir.opposite();
            assert_eq!(dir.primary_axis(), opp.primary_axis());
            assert_eq!(dir.growth(), -opp.growth());
            assert_eq!(dir.heading(), opp.heading().opposite());
            assert_eq!(opp.opposite(), dir);
        }
    }

    #[test]
    fn unit_points_along_primary_axis() {
        for dir in Direction::ALL {
            let unit = dir.unit();
            assert_eq!(dir.primary_axis().component(unit), dir.growth());
            assert_eq!(dir.primary_axis().other().component(unit), 0.0);
        }
    }

    #[test]
    fn direction_keywords() {
        assert_eq!(Direction::from_keyword("td"), Some(Direction::TopDown));
        assert_eq!(Direction::from_keyword("BT"), Some(Direction::BottomUp));
        assert_eq!(Direction::from_keyword("Lr"), Some(Direction::LeftToRight));
        assert_eq!(Direction::from_keyword("RL"), Some(Direction::RightToLeft));
        assert_eq!(Direction::from_keyword("NE"), None);
    }
}
