//! Quad projection: map a cel's bitmap onto four screen corners
//!
//! The rasterizer draws a cel by stepping from its origin: `hd` per source
//! pixel along a row, `vd` per row, with `hdd` added to `hd` after every
//! row. Any quad (not just parallelograms) can be expressed that way; the
//! cross term `hdd` carries the non-affine part.

use tracing::error;

use super::descriptor::{Cel, CelArena, CelFlags, CelId};
use crate::error::{CelGroupError, Result};
use crate::fixed::F16_TO_F20_SHIFT;
use crate::geometry::{Point, Quad, Rectangle};

/// Write the step values that warp `cel` onto `quad` (16.16 screen units).
///
/// Zero-sized cels get zero steps on the degenerate axis.
pub fn quad_map(cel: &mut Cel, quad: &Quad) {
    let width = cel.width() as i64;
    let height = cel.height() as i64;

    let tl = quad.top_left;
    let tr = quad.top_right;
    let br = quad.bottom_right;
    let bl = quad.bottom_left;

    // Horizontal steps, 12.20
    if width > 0 {
        cel.hdx = ((delta(tr.x, tl.x) << F16_TO_F20_SHIFT) / width) as i32;
        cel.hdy = ((delta(tr.y, tl.y) << F16_TO_F20_SHIFT) / width) as i32;
    } else {
        cel.hdx = 0;
        cel.hdy = 0;
    }

    // Vertical steps, 16.16
    if height > 0 {
        cel.vdx = (delta(bl.x, tl.x) / height) as i32;
        cel.vdy = (delta(bl.y, tl.y) / height) as i32;
    } else {
        cel.vdx = 0;
        cel.vdy = 0;
    }

    // Cross steps, 12.20
    if width > 0 && height > 0 {
        let area = width * height;
        let skew_x = (tl.x as i64 + br.x as i64) - (tr.x as i64 + bl.x as i64);
        let skew_y = (tl.y as i64 + br.y as i64) - (tr.y as i64 + bl.y as i64);
        cel.hddx = ((skew_x << F16_TO_F20_SHIFT) / area) as i32;
        cel.hddy = ((skew_y << F16_TO_F20_SHIFT) / area) as i32;
    } else {
        cel.hddx = 0;
        cel.hddy = 0;
    }

    cel.x_pos = tl.x;
    cel.y_pos = tl.y;

    cel.flags.insert(CelFlags::RELOAD);
}

fn delta(to: i32, from: i32) -> i64 {
    to as i64 - from as i64
}

/// `quad_map` for a cel held in an arena
pub fn project_cel(arena: &mut CelArena, id: CelId, quad: &Quad) -> Result<()> {
    match arena.get_mut(id) {
        Some(cel) => {
            quad_map(cel, quad);
            Ok(())
        }
        None => {
            error!(?id, "cannot project unknown cel");
            Err(CelGroupError::UnknownCel(id))
        }
    }
}

/// Corner offsets from the origin, 16.16: (full row, full column)
fn extents(cel: &Cel) -> (i64, i64, i64, i64) {
    let width = cel.width() as i64;
    let height = cel.height() as i64;
    let row_x = (cel.hdx as i64 * width) >> F16_TO_F20_SHIFT;
    let row_y = (cel.hdy as i64 * width) >> F16_TO_F20_SHIFT;
    let col_x = cel.vdx as i64 * height;
    let col_y = cel.vdy as i64 * height;
    (row_x, row_y, col_x, col_y)
}

fn f16_to_pixel(origin: i32, offset: i64) -> i32 {
    ((origin as i64 + offset) >> 16) as i32
}

/// Axis-aligned pixel rectangle the cel currently covers.
///
/// Rebuilt from the step values alone: origin, origin + row, origin +
/// column and origin + row + column, enclosed by their min/max.
pub fn projection(cel: &Cel) -> Rectangle {
    let (row_x, row_y, col_x, col_y) = extents(cel);
    let corners = [(0, 0), (row_x, row_y), (col_x, col_y), (row_x + col_x, row_y + col_y)]
        .map(|(dx, dy)| Point::new(f16_to_pixel(cel.x_pos, dx), f16_to_pixel(cel.y_pos, dy)));
    Rectangle::enclosing(&corners)
}

/// The four screen corners the cel draws to, 16.16, cross term included
pub fn projected_quad(cel: &Cel) -> Quad {
    let (row_x, row_y, col_x, col_y) = extents(cel);
    let area = cel.width() as i64 * cel.height() as i64;
    let skew_x = (cel.hddx as i64 * area) >> F16_TO_F20_SHIFT;
    let skew_y = (cel.hddy as i64 * area) >> F16_TO_F20_SHIFT;

    let at = |dx: i64, dy: i64| {
        Point::new((cel.x_pos as i64 + dx) as i32, (cel.y_pos as i64 + dy) as i32)
    };

    Quad::new(
        at(0, 0),
        at(row_x, row_y),
        at(row_x + col_x + skew_x, row_y + col_y + skew_y),
        at(col_x, col_y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::{to_f16, ONE_F16, ONE_F20};

    fn rect_quad(x: i32, y: i32, w: i32, h: i32) -> Quad {
        Quad::from_rect(Point::new(x, y), w, h).to_f16()
    }

    #[test]
    fn test_unit_rect_steps() {
        let mut cel = Cel::new(16, 16);
        quad_map(&mut cel, &rect_quad(10, 10, 16, 16));
        assert_eq!((cel.hdx, cel.hdy), (ONE_F20, 0));
        assert_eq!((cel.vdx, cel.vdy), (0, ONE_F16));
        assert_eq!((cel.hddx, cel.hddy), (0, 0));
        assert_eq!(cel.origin(), Point::new(to_f16(10), to_f16(10)));
        assert!(cel.flags.contains(CelFlags::RELOAD));
    }

    #[test]
    fn test_rect_projection_roundtrip() {
        for (w, h, x, y, qw, qh) in [(16, 16, 10, 10, 16, 16), (8, 4, -3, 7, 24, 2), (5, 9, 0, 0, 10, 27)] {
            let mut cel = Cel::new(w, h);
            quad_map(&mut cel, &rect_quad(x, y, qw, qh));
            assert_eq!((cel.hddx, cel.hddy), (0, 0));
            assert_eq!(
                projection(&cel),
                Rectangle::new(Point::new(x, y), Point::new(x + qw, y + qh))
            );
        }
    }

    #[test]
    fn test_zero_size_cel() {
        let mut cel = Cel::new(0, 0);
        quad_map(&mut cel, &rect_quad(1, 2, 30, 40));
        assert_eq!((cel.hdx, cel.hdy, cel.vdx, cel.vdy, cel.hddx, cel.hddy), (0, 0, 0, 0, 0, 0));
        assert_eq!(cel.origin(), Point::new(to_f16(1), to_f16(2)));

        let mut flat = Cel::new(10, 0);
        quad_map(&mut flat, &rect_quad(0, 0, 20, 20));
        assert_eq!(flat.hdx, 2 * ONE_F20);
        assert_eq!((flat.vdx, flat.vdy, flat.hddx, flat.hddy), (0, 0, 0, 0));
    }

    #[test]
    fn test_trapezoid_cross_term() {
        let mut cel = Cel::new(10, 10);
        let quad = Quad::new(
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(15, 10),
            Point::new(-5, 10),
        )
        .to_f16();
        quad_map(&mut cel, &quad);
        // (0 + 15) - (10 - 5) = 10 pixels spread over 10 x 10
        assert_eq!(cel.hddx, (to_f16(10) << 4) / 100);
        assert_eq!(cel.hddy, 0);
        assert_eq!(cel.vdx, to_f16(-5) / 10);

        let rebuilt = projected_quad(&cel);
        assert_eq!(rebuilt.top_left, quad.top_left);
        assert_eq!(rebuilt.top_right, quad.top_right);
        assert_eq!(rebuilt.bottom_left, quad.bottom_left);
        assert!((rebuilt.bottom_right.x - quad.bottom_right.x).abs() <= 16);
    }

    #[test]
    fn test_mirrored_projection() {
        let mut cel = Cel::new(4, 4);
        let quad = Quad::new(
            Point::new(8, 0),
            Point::new(0, 0),
            Point::new(0, 4),
            Point::new(8, 4),
        )
        .to_f16();
        quad_map(&mut cel, &quad);
        assert!(cel.hdx < 0);
        assert_eq!(projection(&cel), Rectangle::new(Point::new(0, 0), Point::new(8, 4)));
    }

    #[test]
    fn test_project_unknown_cel() {
        let mut arena = CelArena::with_key();
        let id = arena.insert(Cel::new(4, 4));
        arena.remove(id);
        assert!(project_cel(&mut arena, id, &Quad::default()).is_err());
    }
}
