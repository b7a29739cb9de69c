//! RGBA framebuffer for the preview

use super::bitmap::Color;
use crate::geometry::Point;

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&bytes);
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    /// `set_pixel` for signed coordinates; off-screen points are dropped
    pub fn plot(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize, color);
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let p = &self.pixels[idx..idx + 4];
            Some(Color::with_alpha(p[0], p[1], p[2], p[3]))
        } else {
            None
        }
    }

    /// Plus-shaped marker with arms of `arm` pixels, for pivots and anchors
    pub fn draw_cross(&mut self, center: Point, arm: i32, color: Color) {
        for d in -arm..=arm {
            for p in [center + Point::new(d, 0), center + Point::new(0, d)] {
                self.plot(p.x, p.y, color);
            }
        }
    }

    /// Straight line between two pixel points, endpoints included.
    /// Steps along the longer axis and rounds the other.
    pub fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        let (w, h) = (self.width as i32, self.height as i32);
        let off_screen = (from.x < 0 && to.x < 0)
            || (from.y < 0 && to.y < 0)
            || (from.x >= w && to.x >= w)
            || (from.y >= h && to.y >= h);
        if off_screen {
            return;
        }

        let dx = to.x as i64 - from.x as i64;
        let dy = to.y as i64 - from.y as i64;
        let steps = dx.abs().max(dy.abs());
        if steps == 0 {
            self.plot(from.x, from.y, color);
            return;
        }
        for i in 0..=steps {
            let x = from.x as i64 + (2 * dx * i + steps).div_euclid(2 * steps);
            let y = from.y as i64 + (2 * dy * i + steps).div_euclid(2 * steps);
            self.plot(x as i32, y as i32, color);
        }
    }

    /// Closed outline through `points`
    pub fn draw_polygon(&mut self, points: &[Point], color: Color) {
        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.draw_line(from, to, color);
        }
    }
}
