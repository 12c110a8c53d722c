//! NUL-terminated byte-string primitives.
//!
//! The `*_internal` functions operate on raw C pointers and back the
//! `extern "C"` exports in the compat crate. All of them tolerate null
//! inputs instead of faulting; the hosted application is not trusted to
//! always pass valid pointers.

use core::ffi::{c_char, c_int};
use core::ptr;

#[inline(always)]
fn to_u8(c: c_char) -> u8 {
    c as u8
}

pub fn isspace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' | b'\x0b')
}

pub fn isdigit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

pub fn isxdigit(byte: u8) -> bool {
    byte.is_ascii_hexdigit()
}

pub fn isalpha(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

pub fn isalnum(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
}

pub fn isupper(byte: u8) -> bool {
    byte.is_ascii_uppercase()
}

pub fn islower(byte: u8) -> bool {
    byte.is_ascii_lowercase()
}

pub fn isprint(byte: u8) -> bool {
    (0x20..0x7f).contains(&byte)
}

pub fn tolower(byte: u8) -> u8 {
    byte.to_ascii_lowercase()
}

pub fn toupper(byte: u8) -> u8 {
    byte.to_ascii_uppercase()
}

pub unsafe fn strlen_internal(ptr: *const c_char) -> usize {
    unsafe {
        if ptr.is_null() {
            return 0;
        }

        let mut len = 0usize;
        while *ptr.add(len) != 0 {
            len += 1;
        }
        len
    }
}

pub unsafe fn strcmp_internal(lhs: *const c_char, rhs: *const c_char) -> c_int {
    unsafe {
        if lhs == rhs {
            return 0;
        }
        if lhs.is_null() {
            return -1;
        }
        if rhs.is_null() {
            return 1;
        }

        let mut l = lhs;
        let mut r = rhs;
        while *l != 0 && *l == *r {
            l = l.add(1);
            r = r.add(1);
        }

        to_u8(*l) as c_int - to_u8(*r) as c_int
    }
}

pub unsafe fn strncmp_internal(lhs: *const c_char, rhs: *const c_char, n: usize) -> c_int {
    unsafe {
        if n == 0 {
            return 0;
        }
        if lhs.is_null() {
            return if rhs.is_null() { 0 } else { -1 };
        }
        if rhs.is_null() {
            return 1;
        }

        let mut idx = 0usize;
        while idx < n {
            let a = *lhs.add(idx);
            let b = *rhs.add(idx);
            if a != b {
                return to_u8(a) as c_int - to_u8(b) as c_int;
            }
            if a == 0 {
                break;
            }
            idx += 1;
        }
        0
    }
}

pub unsafe fn strcasecmp_internal(lhs: *const c_char, rhs: *const c_char) -> c_int {
    unsafe {
        if lhs == rhs {
            return 0;
        }
        if lhs.is_null() {
            return -1;
        }
        if rhs.is_null() {
            return 1;
        }

        let mut l = lhs;
        let mut r = rhs;
        loop {
            let a = tolower(to_u8(*l));
            let b = tolower(to_u8(*r));
            if a != b || a == 0 {
                return a as c_int - b as c_int;
            }
            l = l.add(1);
            r = r.add(1);
        }
    }
}

pub unsafe fn strncasecmp_internal(lhs: *const c_char, rhs: *const c_char, n: usize) -> c_int {
    unsafe {
        if n == 0 {
            return 0;
        }
        if lhs.is_null() {
            return if rhs.is_null() { 0 } else { -1 };
        }
        if rhs.is_null() {
            return 1;
        }

        let mut idx = 0usize;
        while idx < n {
            let a = tolower(to_u8(*lhs.add(idx)));
            let b = tolower(to_u8(*rhs.add(idx)));
            if a != b {
                return a as c_int - b as c_int;
            }
            if a == 0 {
                break;
            }
            idx += 1;
        }
        0
    }
}

pub unsafe fn strcpy_internal(dest: *mut c_char, src: *const c_char) -> *mut c_char {
    unsafe {
        if dest.is_null() || src.is_null() {
            return dest;
        }

        let mut d = dest;
        let mut s = src;
        loop {
            let ch = *s;
            *d = ch;
            if ch == 0 {
                break;
            }
            d = d.add(1);
            s = s.add(1);
        }
        dest
    }
}

pub unsafe fn strncpy_internal(dest: *mut c_char, src: *const c_char, n: usize) -> *mut c_char {
    unsafe {
        if dest.is_null() || n == 0 {
            return dest;
        }

        let mut i = 0usize;
        while i < n {
            let ch = if src.is_null() { 0 } else { *src.add(i) };
            *dest.add(i) = ch;
            i += 1;
            if ch == 0 {
                break;
            }
        }

        // Pad with NULs like the C contract requires.
        while i < n {
            *dest.add(i) = 0;
            i += 1;
        }

        dest
    }
}

pub unsafe fn strcat_internal(dest: *mut c_char, src: *const c_char) -> *mut c_char {
    unsafe {
        if dest.is_null() || src.is_null() {
            return dest;
        }

        let tail = dest.add(strlen_internal(dest));
        strcpy_internal(tail, src);
        dest
    }
}

pub unsafe fn strchr_internal(str: *const c_char, c: c_int) -> *mut c_char {
    unsafe {
        if str.is_null() {
            return ptr::null_mut();
        }
        let target = c as u8;
        let mut cursor = str;
        while *cursor != 0 {
            if to_u8(*cursor) == target {
                return cursor as *mut c_char;
            }
            cursor = cursor.add(1);
        }
        // The terminator itself is searchable.
        if target == 0 {
            cursor as *mut c_char
        } else {
            ptr::null_mut()
        }
    }
}

pub unsafe fn strrchr_internal(str: *const c_char, c: c_int) -> *mut c_char {
    unsafe {
        if str.is_null() {
            return ptr::null_mut();
        }
        let target = c as u8;
        let mut cursor = str;
        let mut found = ptr::null_mut();
        loop {
            let ch = to_u8(*cursor);
            if ch == target {
                found = cursor as *mut c_char;
            }
            if ch == 0 {
                return found;
            }
            cursor = cursor.add(1);
        }
    }
}

pub unsafe fn strstr_internal(haystack: *const c_char, needle: *const c_char) -> *mut c_char {
    unsafe {
        if haystack.is_null() || needle.is_null() {
            return ptr::null_mut();
        }
        if *needle == 0 {
            return haystack as *mut c_char;
        }

        let needle_len = strlen_internal(needle);
        let mut h = haystack;
        while *h != 0 {
            if *h == *needle && strncmp_internal(h, needle, needle_len) == 0 {
                return h as *mut c_char;
            }
            h = h.add(1);
        }
        ptr::null_mut()
    }
}
