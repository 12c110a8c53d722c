//! Math entry points for the hosted application.
//!
//! Transcendentals come from `libm`; the integer helpers are const and used
//! on kernel paths too.

use core::ffi::{c_int, c_long};

pub const fn abs_i32(value: c_int) -> c_int {
    if value < 0 { -value } else { value }
}

pub const fn abs_i64(value: c_long) -> c_long {
    if value < 0 { -value } else { value }
}

pub const fn min_usize(a: usize, b: usize) -> usize {
    if a < b { a } else { b }
}

pub const fn max_usize(a: usize, b: usize) -> usize {
    if a > b { a } else { b }
}

#[inline]
pub fn sin(x: f64) -> f64 {
    libm::sin(x)
}

#[inline]
pub fn cos(x: f64) -> f64 {
    libm::cos(x)
}

#[inline]
pub fn tan(x: f64) -> f64 {
    libm::tan(x)
}

#[inline]
pub fn atan2(y: f64, x: f64) -> f64 {
    libm::atan2(y, x)
}

#[inline]
pub fn pow(base: f64, exp: f64) -> f64 {
    libm::pow(base, exp)
}

#[inline]
pub fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

#[inline]
pub fn floor(x: f64) -> f64 {
    libm::floor(x)
}

#[inline]
pub fn ceil(x: f64) -> f64 {
    libm::ceil(x)
}

#[inline]
pub fn fmod(x: f64, y: f64) -> f64 {
    libm::fmod(x, y)
}

#[inline]
pub fn fabs(x: f64) -> f64 {
    libm::fabs(x)
}

#[inline]
pub fn fabsf(x: f32) -> f32 {
    libm::fabsf(x)
}
