//! Direct scale and flip helpers for a single cel

use super::descriptor::Cel;
use crate::fixed::{I12F20, I16F16, F16_TO_F20_SHIFT, ONE_F16, ONE_F20};

impl Cel {
    /// Integer scale factors. X is limited to the 12-bit integer part of
    /// 12.20, Y to the 16-bit integer part of 16.16.
    pub fn scale(&mut self, scale_x: i32, scale_y: i32) {
        let scale_x = scale_x.clamp(I12F20::MIN.to_num(), I12F20::MAX.to_num());
        let scale_y = scale_y.clamp(I16F16::MIN.to_num(), I16F16::MAX.to_num());
        self.hdx = I12F20::from_num(scale_x).to_bits();
        self.vdy = I16F16::from_num(scale_y).to_bits();
    }

    /// Scale so the cel covers `size_x` x `size_y` pixels.
    /// No-op for zero-sized cels; zero targets become one pixel.
    pub fn pixel_scale(&mut self, size_x: u32, size_y: u32) {
        if self.width() <= 0 || self.height() <= 0 {
            return;
        }
        let size_x = size_x.max(1) as i64;
        let size_y = size_y.max(1) as i64;
        self.hdx = ((size_x << 20) / self.width() as i64) as i32;
        self.vdy = ((size_y << 16) / self.height() as i64) as i32;
    }

    /// Back to 1:1 on the requested axes
    pub fn unscale(&mut self, x: bool, y: bool) {
        if x {
            self.hdx = ONE_F20;
        }
        if y {
            self.vdy = ONE_F16;
        }
    }

    /// True when the cel draws right-to-left
    pub fn is_flipped_horizontal(&self) -> bool {
        self.hdx < 0
    }

    /// True when the cel draws bottom-to-top
    pub fn is_flipped_vertical(&self) -> bool {
        self.vdy < 0
    }

    /// Set the horizontal orientation. With `keep_in_place` the origin moves
    /// by the drawn width so the cel keeps covering the same pixels.
    pub fn flip_horizontal(&mut self, flipped: bool, keep_in_place: bool) {
        if self.is_flipped_horizontal() == flipped {
            return;
        }
        let span = ((self.hdx as i64 * self.width() as i64) >> F16_TO_F20_SHIFT) as i32;
        if keep_in_place {
            self.x_pos = self.x_pos.wrapping_add(span);
        }
        self.hdx = -self.hdx;
    }

    /// Set the vertical orientation. With `keep_in_place` the origin moves
    /// by the drawn height so the cel keeps covering the same pixels.
    pub fn flip_vertical(&mut self, flipped: bool, keep_in_place: bool) {
        if self.is_flipped_vertical() == flipped {
            return;
        }
        let span = (self.vdy as i64 * self.height() as i64) as i32;
        if keep_in_place {
            self.y_pos = self.y_pos.wrapping_add(span);
        }
        self.vdy = -self.vdy;
    }
}
