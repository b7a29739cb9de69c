//! Per-corner composition of stretch, rotation and translation
//!
//! Everything here works in 16.16, in group-local space until the final
//! translation. Each stage is optional and degrades to identity when off.

use crate::fixed::{cos_f16, mul_f16, sin_f16, I16F16};
use crate::geometry::{Corner, Point, Quad};

/// Bilinear patch mapping the group's nominal frame onto a stretch quad.
///
/// For a local point (x, y) in a frame of size (w, h) with u = x / w and
/// v = y / h, the image is A + B·u + C·v + D·u·v. The normalized
/// coordinates are kept as exact ratios over the frame size, so stretching
/// onto the frame's own corners reproduces the input bit for bit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StretchBasis {
    width: i128,
    height: i128,
    /// Top-left corner
    a: Point,
    /// Top edge
    b: Point,
    /// Left edge
    c: Point,
    /// Bilinear term, zero for parallelograms
    d: Point,
}

impl StretchBasis {
    /// `size` is in pixels and at least 1 on both axes; `stretching` is in
    /// group-local pixels.
    pub fn new(size: Point, stretching: &Quad) -> Self {
        Self {
            width: size.x.max(1) as i128,
            height: size.y.max(1) as i128,
            a: stretching.top_left.to_f16(),
            b: (stretching.top_right - stretching.top_left).to_f16(),
            c: (stretching.bottom_left - stretching.top_left).to_f16(),
            d: stretching.skew().to_f16(),
        }
    }

    /// Map a local pixel point to its stretched position, 16.16
    pub fn apply(&self, local: Point) -> Point {
        Point::new(
            self.axis(self.a.x, self.b.x, self.c.x, self.d.x, local),
            self.axis(self.a.y, self.b.y, self.c.y, self.d.y, local),
        )
    }

    fn axis(&self, a: i32, b: i32, c: i32, d: i32, local: Point) -> i32 {
        let (x, y) = (local.x as i128, local.y as i128);
        let area = self.width * self.height;
        let numerator = b as i128 * x * self.height + c as i128 * y * self.width + d as i128 * x * y;
        (a as i128 + numerator.div_euclid(area)) as i32
    }
}

/// Rotation about a group-relative pivot
#[derive(Debug, Clone, Copy)]
pub(crate) struct RotationBasis {
    sin: I16F16,
    cos: I16F16,
    /// Pivot relative to the group position, 16.16
    pivot: Point,
}

impl RotationBasis {
    /// `pivot` is in absolute screen pixels; it is stored relative to
    /// `position`, the group origin.
    pub fn new(angle: u32, pivot: Point, position: Point) -> Self {
        Self {
            sin: sin_f16(angle),
            cos: cos_f16(angle),
            pivot: (pivot - position).to_f16(),
        }
    }

    /// Rotate a 16.16 group-local point
    pub fn apply(&self, p: Point) -> Point {
        let d = p - self.pivot;
        let dx = I16F16::from_bits(d.x);
        let dy = I16F16::from_bits(d.y);
        let rx = mul_f16(self.cos, dx).wrapping_sub(mul_f16(self.sin, dy));
        let ry = mul_f16(self.sin, dx).wrapping_add(mul_f16(self.cos, dy));
        Point::new(rx.to_bits(), ry.to_bits()) + self.pivot
    }
}

/// Stretch, then rotate, then translate to the group position
#[derive(Debug, Clone, Copy)]
pub(crate) struct CornerTransform {
    pub stretch: Option<StretchBasis>,
    pub rotation: Option<RotationBasis>,
    /// Group position, 16.16
    pub translation: Point,
}

impl CornerTransform {
    pub fn map_point(&self, local: Point) -> Point {
        let stretched = match &self.stretch {
            Some(basis) => basis.apply(local),
            None => local.to_f16(),
        };
        let rotated = match &self.rotation {
            Some(basis) => basis.apply(stretched),
            None => stretched,
        };
        rotated + self.translation
    }

    /// Map the member rectangle at `offset` of `width` x `height` pixels
    /// into `quad`, corner by corner.
    pub fn map_rect(&self, offset: Point, width: i32, height: i32, quad: &mut Quad) {
        let local = Quad::from_rect(offset, width, height);
        for corner in Corner::ALL {
            quad[corner] = self.map_point(local[corner]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::to_f16;

    fn identity_frame(w: i32, h: i32) -> Quad {
        Quad::from_rect(Point::ZERO, w, h)
    }

    #[test]
    fn test_stretch_identity_is_exact() {
        let basis = StretchBasis::new(Point::new(20, 30), &identity_frame(20, 30));
        for p in [Point::new(0, 0), Point::new(16, 16), Point::new(7, 29), Point::new(-3, 45)] {
            assert_eq!(basis.apply(p), p.to_f16());
        }
    }

    #[test]
    fn test_stretch_double_width() {
        let basis = StretchBasis::new(Point::new(10, 10), &identity_frame(20, 10));
        assert_eq!(basis.apply(Point::new(5, 3)), Point::new(to_f16(10), to_f16(3)));
    }

    #[test]
    fn test_stretch_bilinear_corner() {
        // Only the bottom-right corner moves; the centre moves a quarter of it.
        let mut quad = identity_frame(10, 10);
        quad.bottom_right = Point::new(14, 10);
        let basis = StretchBasis::new(Point::new(10, 10), &quad);
        assert_eq!(basis.apply(Point::new(10, 10)), Point::new(to_f16(14), to_f16(10)));
        assert_eq!(basis.apply(Point::new(10, 0)), Point::new(to_f16(10), 0));
        assert_eq!(basis.apply(Point::new(5, 5)), Point::new(to_f16(6), to_f16(5)));
    }

    #[test]
    fn test_rotation_half_turn_about_pivot() {
        let basis = RotationBasis::new(128, Point::new(15, 15), Point::new(10, 10));
        // Local (0, 0) is 5 px up-left of the pivot at local (5, 5)
        assert_eq!(basis.apply(Point::ZERO), Point::new(to_f16(10), to_f16(10)));
    }

    #[test]
    fn test_identity_transform_is_translation() {
        let transform = CornerTransform {
            stretch: None,
            rotation: None,
            translation: Point::new(10, 20).to_f16(),
        };
        let mut quad = Quad::default();
        transform.map_rect(Point::new(1, 2), 3, 4, &mut quad);
        assert_eq!(quad, Quad::from_rect(Point::new(11, 22), 3, 4).to_f16());
    }
}
