use serde::Serialize;

use crate::point2d::Point2D;
use crate::style::Style;

/// Corner of a rectangle, numbered the way [`Rect::corners`] orders them.
///
/// ```text
/// 0--1
/// |  |
/// 2--3
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::TopLeft, Corner::TopRight, Corner::BottomLeft, Corner::BottomRight];

    pub fn from_index(index: usize) -> Option<Corner> {
        Corner::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Axis-aligned rectangle with normalized (non-negative) extents and the
/// style snapshot it was created with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub style: Style,
}

// Amount a signed extent pushes the anchor back, 0 when growing forward.
fn neg(extent: f64) -> f64 {
    if extent < 0.0 { -extent } else { 0.0 }
}

impl Rect {
    /// Builds a rectangle from an anchor and signed extents. A negative width
    /// grows left of the anchor, a negative height grows up from it.
    pub fn new(position: Point2D, width: f64, height: f64, style: Style) -> Self {
        Self {
            x: position.x - neg(width),
            y: position.y - neg(height),
            width: width.abs(),
            height: height.abs(),
            style,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Corners in fixed order: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Point2D; 4] {
        [
            Point2D::new(self.x, self.y),
            Point2D::new(self.right(), self.y),
            Point2D::new(self.x, self.bottom()),
            Point2D::new(self.right(), self.bottom()),
        ]
    }

    pub fn corner(&self, corner: Corner) -> Point2D {
        self.corners()[corner.index()]
    }

    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn stroke_width(&self) -> f64 {
        self.style.stroke_width().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_width_shifts_anchor_left() {
        let r = Rect::new(Point2D::new(10.0, 10.0), -5.0, 20.0, Style::new());
        assert_eq!((r.x, r.y, r.width, r.height), (5.0, 10.0, 5.0, 20.0));
    }

    #[test]
    fn negative_height_shifts_anchor_up() {
        let r = Rect::new(Point2D::new(0.0, 0.0), 4.0, -3.0, Style::new());
        assert_eq!((r.x, r.y, r.width, r.height), (0.0, -3.0, 4.0, 3.0));
    }

    #[test]
    fn extents_are_always_non_negative() {
        for &(w, h) in &[(1.5, 2.5), (-1.5, 2.5), (1.5, -2.5), (-1.5, -2.5), (0.0, -0.0)] {
            let p = Point2D::new(3.0, -7.0);
            let r = Rect::new(p, w, h, Style::new());
            assert_eq!(r.width, w.abs());
            assert_eq!(r.height, h.abs());
            assert_eq!(r.x, p.x - (-w).max(0.0));
            assert_eq!(r.y, p.y - (-h).max(0.0));
        }
    }

    #[test]
    fn corners_in_fixed_order() {
        let r = Rect::new(Point2D::new(1.0, 2.0), 3.0, 4.0, Style::new());
        let [tl, tr, bl, br] = r.corners();
        assert_eq!(tl, Point2D::new(1.0, 2.0));
        assert_eq!(tr, Point2D::new(4.0, 2.0));
        assert_eq!(bl, Point2D::new(1.0, 6.0));
        assert_eq!(br, Point2D::new(4.0, 6.0));
        assert_eq!(r.corner(Corner::BottomRight), br);
    }

    #[test]
    fn corner_indices() {
        for (i, c) in Corner::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
            assert_eq!(Corner::from_index(i), Some(*c));
        }
        assert_eq!(Corner::from_index(4), None);
    }

    #[test]
    fn zero_size_rectangle_is_allowed() {
        let r = Rect::new(Point2D::new(2.0, 2.0), 0.0, 0.0, Style::new());
        assert!(r.corners().iter().all(|c| *c == Point2D::new(2.0, 2.0)));
        assert!(r.contains(Point2D::new(2.0, 2.0)));
    }
}
