//! NUL-terminated string views.

use core::ffi::c_char;
use core::slice;

use hearth_lib::string::strlen_internal;

/// Borrow the bytes of a C string, excluding the terminator. Null yields
/// `None`. The caller vouches for the pointer and the lifetime.
pub(crate) unsafe fn cstr_bytes<'a>(ptr: *const c_char) -> Option<&'a [u8]> {
    if ptr.is_null() {
        return None;
    }
    let len = strlen_internal(ptr);
    Some(slice::from_raw_parts(ptr as *const u8, len))
}
