//! Raw memory primitives backing the `mem*` exports in the compat crate.

use core::ffi::c_int;
use core::ptr;

pub unsafe fn memcpy_internal(dest: *mut u8, src: *const u8, n: usize) -> *mut u8 {
    unsafe {
        let mut i = 0usize;
        while i < n {
            *dest.add(i) = *src.add(i);
            i += 1;
        }
        dest
    }
}

pub unsafe fn memmove_internal(dest: *mut u8, src: *const u8, n: usize) -> *mut u8 {
    unsafe {
        if dest as *const u8 == src || n == 0 {
            return dest;
        }

        if (dest as *const u8) < src {
            let mut i = 0usize;
            while i < n {
                *dest.add(i) = *src.add(i);
                i += 1;
            }
        } else {
            let mut i = n;
            while i > 0 {
                i -= 1;
                *dest.add(i) = *src.add(i);
            }
        }

        dest
    }
}

pub unsafe fn memset_internal(dest: *mut u8, value: c_int, n: usize) -> *mut u8 {
    unsafe {
        let fill = value as u8;
        let mut i = 0usize;
        while i < n {
            *dest.add(i) = fill;
            i += 1;
        }
        dest
    }
}

pub unsafe fn memcmp_internal(s1: *const u8, s2: *const u8, n: usize) -> c_int {
    unsafe {
        let mut i = 0usize;
        while i < n {
            let a = *s1.add(i);
            let b = *s2.add(i);
            if a != b {
                return a as c_int - b as c_int;
            }
            i += 1;
        }
        0
    }
}

pub unsafe fn memchr_internal(s: *const u8, value: c_int, n: usize) -> *mut u8 {
    unsafe {
        let target = value as u8;
        let mut i = 0usize;
        while i < n {
            if *s.add(i) == target {
                return s.add(i) as *mut u8;
            }
            i += 1;
        }
        ptr::null_mut()
    }
}
