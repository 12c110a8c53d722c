//! `math.h` exports, forwarding to the shared math module.

#[unsafe(no_mangle)]
pub extern "C" fn sin(x: f64) -> f64 {
    hearth_lib::math::sin(x)
}

#[unsafe(no_mangle)]
pub extern "C" fn cos(x: f64) -> f64 {
    hearth_lib::math::cos(x)
}

#[unsafe(no_mangle)]
pub extern "C" fn tan(x: f64) -> f64 {
    hearth_lib::math::tan(x)
}

#[unsafe(no_mangle)]
pub extern "C" fn atan2(y: f64, x: f64) -> f64 {
    hearth_lib::math::atan2(y, x)
}

#[unsafe(no_mangle)]
pub extern "C" fn pow(base: f64, exp: f64) -> f64 {
    hearth_lib::math::pow(base, exp)
}

#[unsafe(no_mangle)]
pub extern "C" fn sqrt(x: f64) -> f64 {
    hearth_lib::math::sqrt(x)
}

#[unsafe(no_mangle)]
pub extern "C" fn floor(x: f64) -> f64 {
    hearth_lib::math::floor(x)
}

#[unsafe(no_mangle)]
pub extern "C" fn ceil(x: f64) -> f64 {
    hearth_lib::math::ceil(x)
}

#[unsafe(no_mangle)]
pub extern "C" fn fmod(x: f64, y: f64) -> f64 {
    hearth_lib::math::fmod(x, y)
}

#[unsafe(no_mangle)]
pub extern "C" fn fabs(x: f64) -> f64 {
    hearth_lib::math::fabs(x)
}

#[unsafe(no_mangle)]
pub extern "C" fn fabsf(x: f32) -> f32 {
    hearth_lib::math::fabsf(x)
}
