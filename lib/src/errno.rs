//! Process-wide error cell.
//!
//! Shim calls record their failure code here before returning; the compat
//! layer mirrors the cell into the C `errno` symbol the hosted application
//! reads. Successful calls leave the cell untouched, matching libc.

use core::ffi::c_int;
use core::sync::atomic::{AtomicI32, Ordering};

use hearth_abi::errno::ESUCCESS;

static LAST_ERROR: AtomicI32 = AtomicI32::new(ESUCCESS);

#[inline]
pub fn set_last_error(code: c_int) {
    LAST_ERROR.store(code, Ordering::Relaxed);
}

#[inline]
pub fn last_error() -> c_int {
    LAST_ERROR.load(Ordering::Relaxed)
}

#[inline]
pub fn clear_last_error() {
    LAST_ERROR.store(ESUCCESS, Ordering::Relaxed);
}
