//! `string.h` and `ctype.h` exports.

use core::ffi::{c_char, c_int};
use core::ptr;

use hearth_lib::memory::{
    memchr_internal, memcmp_internal, memcpy_internal, memmove_internal, memset_internal,
};
use hearth_lib::string::{
    self, strcasecmp_internal, strcat_internal, strchr_internal, strcmp_internal, strcpy_internal,
    strlen_internal, strncasecmp_internal, strncmp_internal, strncpy_internal, strrchr_internal,
    strstr_internal,
};

#[inline(always)]
fn from_bool(val: bool) -> c_int {
    if val { 1 } else { 0 }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn strlen(str: *const c_char) -> usize {
    strlen_internal(str)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn strcmp(lhs: *const c_char, rhs: *const c_char) -> c_int {
    strcmp_internal(lhs, rhs)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn strncmp(lhs: *const c_char, rhs: *const c_char, n: usize) -> c_int {
    strncmp_internal(lhs, rhs, n)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn strcasecmp(lhs: *const c_char, rhs: *const c_char) -> c_int {
    strcasecmp_internal(lhs, rhs)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn strncasecmp(lhs: *const c_char, rhs: *const c_char, n: usize) -> c_int {
    strncasecmp_internal(lhs, rhs, n)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn strcpy(dest: *mut c_char, src: *const c_char) -> *mut c_char {
    strcpy_internal(dest, src)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn strncpy(dest: *mut c_char, src: *const c_char, n: usize) -> *mut c_char {
    strncpy_internal(dest, src, n)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn strcat(dest: *mut c_char, src: *const c_char) -> *mut c_char {
    strcat_internal(dest, src)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn strchr(str: *const c_char, c: c_int) -> *mut c_char {
    strchr_internal(str, c)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn strrchr(str: *const c_char, c: c_int) -> *mut c_char {
    strrchr_internal(str, c)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn strstr(haystack: *const c_char, needle: *const c_char) -> *mut c_char {
    strstr_internal(haystack, needle)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn strdup(src: *const c_char) -> *mut c_char {
    if src.is_null() {
        return ptr::null_mut();
    }
    let len = strlen_internal(src);
    let copy = hearth_mm::bridge::allocate(len + 1);
    if copy.is_null() {
        crate::errno::sync_errno();
        return ptr::null_mut();
    }
    memcpy_internal(copy, src as *const u8, len + 1);
    copy as *mut c_char
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn memcpy(dest: *mut u8, src: *const u8, n: usize) -> *mut u8 {
    memcpy_internal(dest, src, n)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn memmove(dest: *mut u8, src: *const u8, n: usize) -> *mut u8 {
    memmove_internal(dest, src, n)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn memset(dest: *mut u8, value: c_int, n: usize) -> *mut u8 {
    memset_internal(dest, value, n)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn memcmp(s1: *const u8, s2: *const u8, n: usize) -> c_int {
    memcmp_internal(s1, s2, n)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn memchr(s: *const u8, value: c_int, n: usize) -> *mut u8 {
    memchr_internal(s, value, n)
}

#[unsafe(no_mangle)]
pub extern "C" fn isspace(c: c_int) -> c_int {
    from_bool(string::isspace(c as u8))
}

#[unsafe(no_mangle)]
pub extern "C" fn isdigit(c: c_int) -> c_int {
    from_bool(string::isdigit(c as u8))
}

#[unsafe(no_mangle)]
pub extern "C" fn isxdigit(c: c_int) -> c_int {
    from_bool(string::isxdigit(c as u8))
}

#[unsafe(no_mangle)]
pub extern "C" fn isalpha(c: c_int) -> c_int {
    from_bool(string::isalpha(c as u8))
}

#[unsafe(no_mangle)]
pub extern "C" fn isalnum(c: c_int) -> c_int {
    from_bool(string::isalnum(c as u8))
}

#[unsafe(no_mangle)]
pub extern "C" fn isupper(c: c_int) -> c_int {
    from_bool(string::isupper(c as u8))
}

#[unsafe(no_mangle)]
pub extern "C" fn islower(c: c_int) -> c_int {
    from_bool(string::islower(c as u8))
}

#[unsafe(no_mangle)]
pub extern "C" fn isprint(c: c_int) -> c_int {
    from_bool(string::isprint(c as u8))
}

#[unsafe(no_mangle)]
pub extern "C" fn tolower(c: c_int) -> c_int {
    string::tolower(c as u8) as c_int
}

#[unsafe(no_mangle)]
pub extern "C" fn toupper(c: c_int) -> c_int {
    string::toupper(c as u8) as c_int
}
