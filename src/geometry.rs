//! 2D integer geometry shared by the cel engine
//!
//! Points, quads and rectangles carry either pixel or 16.16 values;
//! which one is up to the caller. Rectangle bounds are inclusive.
//! Point arithmetic wraps, like the 16.16 conversions.

use std::ops::{Add, Index, IndexMut, Sub};

use serde::{Deserialize, Serialize};

use crate::fixed::{from_f16, mul_f16, to_f16, I16F16};

/// 2D point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Point halfway between two points
    pub fn midpoint(a: Point, b: Point) -> Point {
        let mid = |a: i32, b: i32| ((a as i64 + b as i64) / 2) as i32;
        Point::new(mid(a.x, b.x), mid(a.y, b.y))
    }

    /// Shift the point in place
    pub fn offset(&mut self, by: Point) {
        *self = *self + by;
    }

    /// Both components converted from pixels to 16.16
    pub fn to_f16(self) -> Point {
        Point::new(to_f16(self.x), to_f16(self.y))
    }

    /// Both components converted from 16.16 to pixels
    pub fn to_pixels(self) -> Point {
        Point::new(from_f16(self.x), from_f16(self.y))
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Point {
        Point::new(self.x.wrapping_add(other.x), self.y.wrapping_add(other.y))
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Point {
        Point::new(self.x.wrapping_sub(other.x), self.y.wrapping_sub(other.y))
    }
}

/// Corners of a quad, in storage order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];
}

/// Four corners: top-left, top-right, bottom-right, bottom-left
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quad {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl Quad {
    pub fn new(top_left: Point, top_right: Point, bottom_right: Point, bottom_left: Point) -> Self {
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    /// Axis-aligned quad of the given size anchored at `origin`
    pub fn from_rect(origin: Point, width: i32, height: i32) -> Self {
        Self {
            top_left: origin,
            top_right: origin + Point::new(width, 0),
            bottom_right: origin + Point::new(width, height),
            bottom_left: origin + Point::new(0, height),
        }
    }

    /// Every corner converted from pixels to 16.16
    pub fn to_f16(&self) -> Quad {
        Quad::new(
            self.top_left.to_f16(),
            self.top_right.to_f16(),
            self.bottom_right.to_f16(),
            self.bottom_left.to_f16(),
        )
    }

    /// Bilinear term: (TL + BR) - (TR + BL). Zero for any parallelogram.
    pub fn skew(&self) -> Point {
        (self.top_left + self.bottom_right) - (self.top_right + self.bottom_left)
    }
}

impl Index<Corner> for Quad {
    type Output = Point;
    fn index(&self, corner: Corner) -> &Point {
        match corner {
            Corner::TopLeft => &self.top_left,
            Corner::TopRight => &self.top_right,
            Corner::BottomRight => &self.bottom_right,
            Corner::BottomLeft => &self.bottom_left,
        }
    }
}

impl IndexMut<Corner> for Quad {
    fn index_mut(&mut self, corner: Corner) -> &mut Point {
        match corner {
            Corner::TopLeft => &mut self.top_left,
            Corner::TopRight => &mut self.top_right,
            Corner::BottomRight => &mut self.bottom_right,
            Corner::BottomLeft => &mut self.bottom_left,
        }
    }
}

/// Horizontal alignment reference for `Rectangle::position_in`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignX {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment reference for `Rectangle::position_in`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignY {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Rectangle {
    pub const fn new(top_left: Point, bottom_right: Point) -> Self {
        Self { top_left, bottom_right }
    }

    pub fn width(&self) -> i32 {
        self.bottom_right.x.wrapping_sub(self.top_left.x)
    }

    pub fn height(&self) -> i32 {
        self.bottom_right.y.wrapping_sub(self.top_left.y)
    }

    /// Smallest rectangle enclosing all points
    pub fn enclosing(points: &[Point]) -> Rectangle {
        let Some(first) = points.first() else {
            return Rectangle::default();
        };
        let mut rect = Rectangle::new(*first, *first);
        for p in &points[1..] {
            rect.top_left.x = rect.top_left.x.min(p.x);
            rect.top_left.y = rect.top_left.y.min(p.y);
            rect.bottom_right.x = rect.bottom_right.x.max(p.x);
            rect.bottom_right.y = rect.bottom_right.y.max(p.y);
        }
        rect
    }

    pub fn center(&self) -> Point {
        self.top_left + Point::new(self.width() / 2, self.height() / 2)
    }

    /// Re-anchor the rectangle so its center sits on `point`
    pub fn center_over(&mut self, point: Point) {
        let half = Point::new(self.width() / 2, self.height() / 2);
        self.top_left = point - half;
        self.bottom_right = point + half;
    }

    /// Place this rectangle inside `parent` using an alignment reference.
    ///
    /// The resulting position is relative to the parent's frame: `Left`/`Top`
    /// puts the rectangle at the offset, `Right`/`Bottom` measure the offset
    /// inward from the parent's far edge, `Center` adds it to the centered
    /// position.
    pub fn position_in(&mut self, parent: &Rectangle, align_x: AlignX, align_y: AlignY, offset: Point) {
        let (width, height) = (self.width(), self.height());

        self.top_left.x = match align_x {
            AlignX::Left => offset.x,
            AlignX::Center => (parent.width() - width) / 2 + offset.x,
            AlignX::Right => parent.bottom_right.x - width - offset.x,
        };
        self.top_left.y = match align_y {
            AlignY::Top => offset.y,
            AlignY::Center => (parent.height() - height) / 2 + offset.y,
            AlignY::Bottom => parent.bottom_right.y - height - offset.y,
        };

        self.bottom_right = Point::new(self.top_left.x + width, self.top_left.y + height);
    }

    /// Slide the rectangle back inside `boundary`, one axis at a time.
    /// The near edge wins when the rectangle is larger than the boundary.
    pub fn constrain_within(&mut self, boundary: &Rectangle) {
        let mut shift = Point::ZERO;

        if self.top_left.x < boundary.top_left.x {
            shift.x = boundary.top_left.x - self.top_left.x;
        } else if self.bottom_right.x > boundary.bottom_right.x {
            shift.x = boundary.bottom_right.x - self.bottom_right.x;
        }

        if self.top_left.y < boundary.top_left.y {
            shift.y = boundary.top_left.y - self.top_left.y;
        } else if self.bottom_right.y > boundary.bottom_right.y {
            shift.y = boundary.bottom_right.y - self.bottom_right.y;
        }

        self.offset(shift);
    }

    /// Shift the rectangle in place
    pub fn offset(&mut self, by: Point) {
        self.top_left.offset(by);
        self.bottom_right.offset(by);
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.top_left.x
            && point.x <= self.bottom_right.x
            && point.y >= self.top_left.y
            && point.y <= self.bottom_right.y
    }

    /// True if the rectangles overlap or touch
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.bottom_right.x >= other.top_left.x
            && self.top_left.x <= other.bottom_right.x
            && self.bottom_right.y >= other.top_left.y
            && self.top_left.y <= other.bottom_right.y
    }
}

/// Rotate a pixel point about `center`
pub fn rotate_point(point: Point, center: Point, sin: I16F16, cos: I16F16) -> Point {
    let d = (point - center).to_f16();
    let dx = I16F16::from_bits(d.x);
    let dy = I16F16::from_bits(d.y);

    let rx = mul_f16(dx, cos).wrapping_sub(mul_f16(dy, sin));
    let ry = mul_f16(dx, sin).wrapping_add(mul_f16(dy, cos));

    Point::new(from_f16(rx.to_bits()), from_f16(ry.to_bits())) + center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::{cos_f16, sin_f16};

    #[test]
    fn test_midpoint() {
        assert_eq!(Point::midpoint(Point::new(0, 0), Point::new(10, 4)), Point::new(5, 2));
    }

    #[test]
    fn test_quad_indexing() {
        let mut quad = Quad::from_rect(Point::new(1, 2), 3, 4);
        assert_eq!(quad[Corner::BottomRight], Point::new(4, 6));
        quad[Corner::TopLeft] = Point::new(9, 9);
        assert_eq!(quad.top_left, Point::new(9, 9));
    }

    #[test]
    fn test_skew_zero_for_parallelogram() {
        let quad = Quad::new(
            Point::new(0, 0),
            Point::new(10, 2),
            Point::new(13, 12),
            Point::new(3, 10),
        );
        assert_eq!(quad.skew(), Point::ZERO);
    }

    #[test]
    fn test_contains_inclusive() {
        let rect = Rectangle::new(Point::new(0, 0), Point::new(10, 10));
        assert!(rect.contains(Point::new(10, 0)));
        assert!(!rect.contains(Point::new(11, 5)));
    }

    #[test]
    fn test_intersects() {
        let a = Rectangle::new(Point::new(0, 0), Point::new(10, 10));
        let b = Rectangle::new(Point::new(10, 10), Point::new(20, 20));
        let c = Rectangle::new(Point::new(11, 0), Point::new(20, 5));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_center_over() {
        let mut rect = Rectangle::new(Point::new(0, 0), Point::new(10, 6));
        rect.center_over(Point::new(50, 50));
        assert_eq!(rect, Rectangle::new(Point::new(45, 47), Point::new(55, 53)));
    }

    #[test]
    fn test_constrain_within() {
        let boundary = Rectangle::new(Point::new(0, 0), Point::new(100, 100));
        let mut rect = Rectangle::new(Point::new(-5, 95), Point::new(5, 105));
        rect.constrain_within(&boundary);
        assert_eq!(rect, Rectangle::new(Point::new(0, 90), Point::new(10, 100)));
    }

    #[test]
    fn test_position_in() {
        let parent = Rectangle::new(Point::new(0, 0), Point::new(100, 50));
        let mut child = Rectangle::new(Point::new(0, 0), Point::new(20, 10));

        child.position_in(&parent, AlignX::Center, AlignY::Bottom, Point::new(0, 2));
        assert_eq!(child, Rectangle::new(Point::new(40, 38), Point::new(60, 48)));

        child.position_in(&parent, AlignX::Right, AlignY::Top, Point::new(5, 5));
        assert_eq!(child, Rectangle::new(Point::new(75, 5), Point::new(95, 15)));
    }

    #[test]
    fn test_rotate_point_quarter_turn() {
        let p = rotate_point(Point::new(10, 0), Point::ZERO, sin_f16(64), cos_f16(64));
        assert_eq!(p, Point::new(0, 10));
    }

    #[test]
    fn test_point_arithmetic_wraps() {
        let mut p = Point::new(i32::MAX - 1, 0);
        p.offset(Point::new(5, -1));
        assert_eq!(p, Point::new(i32::MIN + 3, -1));
        assert_eq!(Point::new(i32::MIN, 0) - Point::new(1, 0), Point::new(i32::MAX, 0));
    }

    #[test]
    fn test_enclosing() {
        let rect = Rectangle::enclosing(&[Point::new(3, -1), Point::new(-2, 4), Point::new(0, 0)]);
        assert_eq!(rect, Rectangle::new(Point::new(-2, -1), Point::new(3, 4)));
    }
}
