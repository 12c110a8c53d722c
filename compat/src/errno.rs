//! The C `errno` symbol.
//!
//! The runtime tracks failures in an atomic cell; the shims mirror that
//! cell into this symbol on their error paths, right before returning to C.
//! Single hosted thread, so a plain static is sound in practice.

use core::ffi::c_int;

use hearth_lib::errno::last_error;

#[unsafe(no_mangle)]
#[allow(non_upper_case_globals)]
pub static mut errno: c_int = 0;

pub(crate) fn sync_errno() {
    unsafe {
        errno = last_error();
    }
}
