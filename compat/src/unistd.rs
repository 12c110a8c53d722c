//! `unistd.h` exports.

use core::ffi::{c_int, c_uint};

use hearth_rt::time::{sleep_ms, sleep_s, sleep_us};

#[unsafe(no_mangle)]
pub extern "C" fn sleep(seconds: c_uint) -> c_uint {
    sleep_s(seconds as u64);
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn usleep(microseconds: c_uint) -> c_int {
    sleep_us(microseconds as u64);
    0
}

/// Millisecond sleep the legacy port calls directly.
#[unsafe(no_mangle)]
pub extern "C" fn msleep(milliseconds: c_uint) -> c_int {
    sleep_ms(milliseconds as u64);
    0
}

/// One hosted process, one pid.
#[unsafe(no_mangle)]
pub extern "C" fn getpid() -> c_int {
    1
}
