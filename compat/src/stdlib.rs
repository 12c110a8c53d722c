//! `stdlib.h` exports: the allocator bridge, numeric conversions and
//! process control.

use core::ffi::{c_char, c_int, c_long, c_void};
use core::ptr;

use hearth_lib::errno::set_last_error;
use hearth_lib::klog_error;
use hearth_lib::numfmt::{parse_f64, parse_i64, parse_i64_radix};
use hearth_lib::services;
use hearth_mm::bridge;

use crate::cstr::cstr_bytes;
use crate::errno::sync_errno;

#[unsafe(no_mangle)]
pub extern "C" fn malloc(size: usize) -> *mut c_void {
    let ptr = bridge::allocate(size);
    if ptr.is_null() && size != 0 {
        sync_errno();
    }
    ptr as *mut c_void
}

#[unsafe(no_mangle)]
pub extern "C" fn calloc(nmemb: usize, size: usize) -> *mut c_void {
    let ptr = bridge::allocate_zeroed(nmemb, size);
    if ptr.is_null() && nmemb != 0 && size != 0 {
        sync_errno();
    }
    ptr as *mut c_void
}

#[unsafe(no_mangle)]
pub extern "C" fn realloc(ptr: *mut c_void, size: usize) -> *mut c_void {
    let moved = bridge::reallocate(ptr as *mut u8, size);
    if moved.is_null() && size != 0 {
        sync_errno();
    }
    moved as *mut c_void
}

#[unsafe(no_mangle)]
pub extern "C" fn free(ptr: *mut c_void) {
    bridge::release(ptr as *mut u8);
}

#[unsafe(no_mangle)]
pub extern "C" fn abs(value: c_int) -> c_int {
    hearth_lib::math::abs_i32(value)
}

#[unsafe(no_mangle)]
pub extern "C" fn labs(value: c_long) -> c_long {
    hearth_lib::math::abs_i64(value)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn atoi(s: *const c_char) -> c_int {
    let Some(bytes) = cstr_bytes(s) else {
        return 0;
    };
    parse_i64(bytes).value as c_int
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn atol(s: *const c_char) -> c_long {
    let Some(bytes) = cstr_bytes(s) else {
        return 0;
    };
    parse_i64(bytes).value as c_long
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn atof(s: *const c_char) -> f64 {
    let Some(bytes) = cstr_bytes(s) else {
        return 0.0;
    };
    parse_f64(bytes).value
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn strtol(
    s: *const c_char,
    endptr: *mut *mut c_char,
    base: c_int,
) -> c_long {
    let Some(bytes) = cstr_bytes(s) else {
        if !endptr.is_null() {
            *endptr = s as *mut c_char;
        }
        return 0;
    };
    let parsed = parse_i64_radix(bytes, base as u32);
    if !endptr.is_null() {
        *endptr = s.add(parsed.consumed) as *mut c_char;
    }
    parsed.value as c_long
}

/// No environment exists on this kernel.
#[unsafe(no_mangle)]
pub extern "C" fn getenv(_name: *const c_char) -> *mut c_char {
    ptr::null_mut()
}

/// No shell to hand the command to; report "handled".
#[unsafe(no_mangle)]
pub extern "C" fn system(_command: *const c_char) -> c_int {
    0
}

fn park() -> ! {
    loop {
        match services::scheduler() {
            Some(sched) => sched.yield_now(),
            None => core::hint::spin_loop(),
        }
    }
}

/// The hosted application has no process to return to; log the status and
/// park the task forever.
#[unsafe(no_mangle)]
pub extern "C" fn exit(status: c_int) -> ! {
    klog_error!("hosted application exited with status {}", status);
    park()
}

#[unsafe(no_mangle)]
pub extern "C" fn abort() -> ! {
    set_last_error(hearth_abi::errno::EIO);
    klog_error!("hosted application aborted");
    park()
}
