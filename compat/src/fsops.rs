//! Path metadata exports: `stat`, `fstat`, `mkdir`, `remove`, `rename`.

use core::ffi::{c_char, c_int, c_uint};

use hearth_abi::stat::Stat;
use hearth_fs::{StreamId, make_dir, metadata, remove_path, rename_path, stream_stat};

use crate::cstr::cstr_bytes;
use crate::errno::sync_errno;
use crate::stdio::invalid_handle;

#[unsafe(no_mangle)]
pub unsafe extern "C" fn stat(path: *const c_char, out: *mut Stat) -> c_int {
    let Some(path) = cstr_bytes(path) else {
        invalid_handle();
        return -1;
    };
    if out.is_null() {
        invalid_handle();
        return -1;
    }
    match metadata(path) {
        Ok(info) => {
            *out = info;
            0
        }
        Err(_) => {
            sync_errno();
            -1
        }
    }
}

/// `fd` is the stream token the application got from `fileno`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fstat(fd: c_int, out: *mut Stat) -> c_int {
    if out.is_null() || fd < 0 {
        invalid_handle();
        return -1;
    }
    let Some(id) = StreamId::from_token(fd as usize) else {
        invalid_handle();
        return -1;
    };
    match stream_stat(id) {
        Ok(info) => {
            *out = info;
            0
        }
        Err(_) => {
            sync_errno();
            -1
        }
    }
}

/// The mode argument is accepted and ignored; the store has no permission
/// bits.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mkdir(path: *const c_char, _mode: c_uint) -> c_int {
    let Some(path) = cstr_bytes(path) else {
        invalid_handle();
        return -1;
    };
    match make_dir(path) {
        Ok(()) => 0,
        Err(_) => {
            sync_errno();
            -1
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn remove(path: *const c_char) -> c_int {
    let Some(path) = cstr_bytes(path) else {
        invalid_handle();
        return -1;
    };
    match remove_path(path) {
        Ok(()) => 0,
        Err(_) => {
            sync_errno();
            -1
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn unlink(path: *const c_char) -> c_int {
    remove(path)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn rename(from: *const c_char, to: *const c_char) -> c_int {
    let (Some(from), Some(to)) = (cstr_bytes(from), cstr_bytes(to)) else {
        invalid_handle();
        return -1;
    };
    match rename_path(from, to) {
        Ok(()) => 0,
        Err(_) => {
            sync_errno();
            -1
        }
    }
}
