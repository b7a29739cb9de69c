//! Cel drawing: walk a descriptor's steps the way a cel engine does

use slotmap::SecondaryMap;

use super::bitmap::{Bitmap, Color};
use super::framebuffer::Framebuffer;
use crate::cel::{chain, Cel, CelArena, CelFlags, CelId};
use crate::fixed::{f16_to_f32, f20_to_f32};
use crate::geometry::Quad;

/// Sub-steps per texel so a magnified or rotated texel leaves no holes
fn subdivisions(step_x: f32, step_y: f32) -> usize {
    let len = (step_x * step_x + step_y * step_y).sqrt();
    let skewed = step_x != 0.0 && step_y != 0.0;
    (len.ceil() as usize).max(1) + usize::from(skewed)
}

/// Draw one cel. Source row `r` starts at origin + r·vd and advances by
/// hd per texel, where hd itself grows by hdd per row. Transparent texels
/// are skipped; without a bitmap the cel is filled with `fallback`.
pub fn draw_cel(fb: &mut Framebuffer, cel: &Cel, bitmap: Option<&Bitmap>, fallback: Color) {
    let (width, height) = (cel.width(), cel.height());
    if width == 0 || height == 0 {
        return;
    }

    let origin = (f16_to_f32(cel.x_pos), f16_to_f32(cel.y_pos));
    let hd = (f20_to_f32(cel.hdx), f20_to_f32(cel.hdy));
    let vd = (f16_to_f32(cel.vdx), f16_to_f32(cel.vdy));
    let hdd = (f20_to_f32(cel.hddx), f20_to_f32(cel.hddy));

    let along = subdivisions(hd.0.abs() + hdd.0.abs() * height as f32, hd.1.abs() + hdd.1.abs() * height as f32);
    let down = subdivisions(vd.0, vd.1);

    for sy in 0..height {
        for j in 0..down {
            // Multiply before dividing so whole-pixel steps land exactly
            let row = sy as f32 + j as f32 / down as f32;
            let row_start = (
                origin.0 + vd.0 * sy as f32 + vd.0 * j as f32 / down as f32,
                origin.1 + vd.1 * sy as f32 + vd.1 * j as f32 / down as f32,
            );
            let step = (hd.0 + hdd.0 * row, hd.1 + hdd.1 * row);

            for sx in 0..width {
                let color = match bitmap {
                    Some(bmp) => bmp.get_pixel(sx as usize, sy as usize),
                    None => fallback,
                };
                if color.a == 0 {
                    continue;
                }
                let texel = (row_start.0 + step.0 * sx as f32, row_start.1 + step.1 * sx as f32);
                for i in 0..along {
                    let x = texel.0 + step.0 * i as f32 / along as f32;
                    let y = texel.1 + step.1 * i as f32 / along as f32;
                    fb.plot(x.floor() as i32, y.floor() as i32, color);
                }
            }
        }
    }
}

/// Draw every cel linked from `first`, in chain order, and acknowledge
/// their reload flags. Returns how many cels were drawn.
pub fn draw_chain(
    fb: &mut Framebuffer,
    arena: &mut CelArena,
    bitmaps: &SecondaryMap<CelId, Bitmap>,
    first: CelId,
    fallback: Color,
) -> usize {
    let ids: Vec<CelId> = chain(arena, first).map(|(id, _)| id).collect();
    for &id in &ids {
        if let Some(cel) = arena.get_mut(id) {
            draw_cel(fb, cel, bitmaps.get(id), fallback);
            cel.flags.remove(CelFlags::RELOAD);
        }
    }
    ids.len()
}

/// Outline a 16.16 quad
pub fn draw_quad_outline(fb: &mut Framebuffer, quad: &Quad, color: Color) {
    let corners = [quad.top_left, quad.top_right, quad.bottom_right, quad.bottom_left]
        .map(|p| p.to_pixels());
    fb.draw_polygon(&corners, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cel::{projection, quad_map};
    use crate::geometry::Point;

    fn painted(fb: &Framebuffer, color: Color) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..fb.height {
            for x in 0..fb.width {
                if fb.get_pixel(x, y) == Some(color) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_axis_aligned_cel_fills_footprint() {
        let mut fb = Framebuffer::new(64, 64);
        let mut cel = Cel::new(16, 16);
        quad_map(&mut cel, &Quad::from_rect(Point::new(10, 10), 16, 16).to_f16());
        draw_cel(&mut fb, &cel, None, Color::RED);

        let footprint = projection(&cel);
        let pixels = painted(&fb, Color::RED);
        assert_eq!(pixels.len(), 16 * 16);
        assert!(pixels.iter().all(|&(x, y)| {
            (x as i32) >= footprint.top_left.x
                && (x as i32) < footprint.bottom_right.x
                && (y as i32) >= footprint.top_left.y
                && (y as i32) < footprint.bottom_right.y
        }));
    }

    #[test]
    fn test_magnified_cel_has_no_holes() {
        let mut fb = Framebuffer::new(64, 64);
        let mut cel = Cel::new(4, 4);
        quad_map(&mut cel, &Quad::from_rect(Point::new(2, 2), 12, 8).to_f16());
        draw_cel(&mut fb, &cel, None, Color::GREEN);
        assert_eq!(painted(&fb, Color::GREEN).len(), 12 * 8);
    }

    #[test]
    fn test_transparent_texels_skipped() {
        let mut fb = Framebuffer::new(8, 8);
        let mut bmp = Bitmap::solid(2, 1, Color::WHITE);
        bmp.pixels[1] = Color::TRANSPARENT;
        let cel = Cel::new(2, 1);
        draw_cel(&mut fb, &cel, Some(&bmp), Color::RED);
        assert_eq!(fb.get_pixel(0, 0), Some(Color::WHITE));
        assert_eq!(fb.get_pixel(1, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_draw_chain_clears_reload() {
        let mut arena = CelArena::with_key();
        let a = arena.insert(Cel::new(2, 2));
        let b = arena.insert(Cel::new(2, 2));
        crate::cel::link_cel(&mut arena, a, b).unwrap();
        quad_map(&mut arena[a], &Quad::from_rect(Point::ZERO, 2, 2).to_f16());
        quad_map(&mut arena[b], &Quad::from_rect(Point::new(4, 4), 2, 2).to_f16());

        let mut fb = Framebuffer::new(8, 8);
        let drawn = draw_chain(&mut fb, &mut arena, &SecondaryMap::new(), a, Color::BLUE);
        assert_eq!(drawn, 2);
        assert_eq!(fb.get_pixel(5, 5), Some(Color::BLUE));
        assert!(arena[a].flags.is_empty());
        assert!(arena[b].flags.is_empty());
    }
}
