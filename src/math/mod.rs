pub mod rng;
mod vec2;

pub use std::f32::consts::{FRAC_1_SQRT_2, SQRT_2, TAU};

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

pub type P2 = Vec2<i32>;

pub fn distance(a: Vec2<f32>, b: Vec2<f32>) -> f32 {
    (a - b).mag()
}

pub mod interpolate {
    pub fn linearf(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Maps `v` from `[in_lo, in_hi]` onto `[out_lo, out_hi]` without clamping.
    pub fn map(v: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
        if in_hi == in_lo {
            return out_lo;
        }
        linearf(out_lo, out_hi, (v - in_lo) / (in_hi - in_lo))
    }
}
