//! `stdio.h` exports: streams, the printf family and the scanner.
//!
//! `FILE*` values are opaque tokens. The legacy headers hard-code `stdout`
//! as `(FILE*)1` and `stderr` as `(FILE*)2`; both route to the console
//! service. Everything else is a stream-table token minted by `fopen`.

use core::ffi::{CStr, VaList, c_char, c_int, c_long, c_uint, c_ulong, c_void};
use core::ptr;

use hearth_abi::errno::EINVAL;
use hearth_abi::file::OpenMode;
use hearth_fs::{
    StreamId, stream_close, stream_eof, stream_error, stream_flush, stream_open, stream_read,
    stream_seek, stream_tell, stream_write,
};
use hearth_lib::errno::set_last_error;
use hearth_lib::fmt::{ArgSource, BufferSink, ByteSink, format_into};
use hearth_lib::numfmt::{parse_f64, parse_i64_radix};
use hearth_lib::services;
use hearth_lib::string::isspace;

use crate::cstr::cstr_bytes;
use crate::errno::sync_errno;

pub const EOF: c_int = -1;

const STDOUT_TOKEN: usize = 1;
const STDERR_TOKEN: usize = 2;
const STDIN_TOKEN: usize = 3;

/// Opaque on both sides; only token values travel through it.
pub enum FILE {}

// The legacy headers hard-code the sentinel values; the statics exist for
// translation units that take them by symbol instead.
#[unsafe(no_mangle)]
#[allow(non_upper_case_globals)]
pub static mut stdout: *mut FILE = ptr::without_provenance_mut(STDOUT_TOKEN);

#[unsafe(no_mangle)]
#[allow(non_upper_case_globals)]
pub static mut stderr: *mut FILE = ptr::without_provenance_mut(STDERR_TOKEN);

#[unsafe(no_mangle)]
#[allow(non_upper_case_globals)]
pub static mut stdin: *mut FILE = ptr::without_provenance_mut(STDIN_TOKEN);

fn is_console(f: *mut FILE) -> bool {
    matches!(f as usize, STDOUT_TOKEN | STDERR_TOKEN)
}

fn is_stdin(f: *mut FILE) -> bool {
    f as usize == STDIN_TOKEN
}

fn stream_id(f: *mut FILE) -> Option<StreamId> {
    StreamId::from_token(f as usize)
}

pub(crate) fn invalid_handle() {
    set_last_error(EINVAL);
    sync_errno();
}

fn console_write(bytes: &[u8]) {
    if let Some(console) = services::console() {
        console.write_bytes(bytes);
    }
}

/// Batches formatted output so the console service sees chunks, not
/// single bytes.
struct ConsoleSink {
    buf: [u8; 64],
    len: usize,
}

impl ConsoleSink {
    fn new() -> Self {
        Self {
            buf: [0u8; 64],
            len: 0,
        }
    }

    fn flush(&mut self) {
        if self.len > 0 {
            console_write(&self.buf[..self.len]);
            self.len = 0;
        }
    }
}

impl ByteSink for ConsoleSink {
    fn put(&mut self, byte: u8) {
        if self.len == self.buf.len() {
            self.flush();
        }
        self.buf[self.len] = byte;
        self.len += 1;
    }
}

/// Formatted output into an open stream. The stream's own staging buffer
/// batches the bytes.
struct StreamSink {
    id: StreamId,
    failed: bool,
}

impl ByteSink for StreamSink {
    fn put(&mut self, byte: u8) {
        if self.failed {
            return;
        }
        if stream_write(self.id, &[byte]).is_err() {
            self.failed = true;
        }
    }
}

/// `sprintf` destination: caller-sized, no bound to enforce here.
struct RawSink {
    dest: *mut u8,
    len: usize,
}

impl ByteSink for RawSink {
    fn put(&mut self, byte: u8) {
        unsafe {
            *self.dest.add(self.len) = byte;
        }
        self.len += 1;
    }
}

/// Pulls printf arguments off a C variadic list. Sub-int types arrive
/// already promoted per the C calling convention.
struct VaArgs<'f> {
    list: VaList<'f>,
}

impl ArgSource for VaArgs<'_> {
    fn next_int(&mut self, long: bool) -> i64 {
        unsafe {
            if long {
                self.list.next_arg::<c_long>() as i64
            } else {
                self.list.next_arg::<c_int>() as i64
            }
        }
    }

    fn next_uint(&mut self, long: bool) -> u64 {
        unsafe {
            if long {
                self.list.next_arg::<c_ulong>() as u64
            } else {
                self.list.next_arg::<c_uint>() as u64
            }
        }
    }

    fn next_ptr(&mut self) -> usize {
        unsafe { self.list.next_arg::<usize>() }
    }

    fn next_char(&mut self) -> u8 {
        unsafe { self.list.next_arg::<c_int>() as u8 }
    }

    fn next_f64(&mut self) -> f64 {
        unsafe { self.list.next_arg::<f64>() }
    }

    fn next_str(&mut self) -> Option<&[u8]> {
        unsafe {
            let ptr = self.list.next_arg::<*const c_char>();
            if ptr.is_null() {
                None
            } else {
                Some(CStr::from_ptr(ptr).to_bytes())
            }
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn fopen(path: *const c_char, mode: *const c_char) -> *mut FILE {
    let (Some(path), Some(mode)) = (cstr_bytes(path), cstr_bytes(mode)) else {
        invalid_handle();
        return ptr::null_mut();
    };
    let Some(mode) = OpenMode::from_mode_str(mode) else {
        invalid_handle();
        return ptr::null_mut();
    };
    match stream_open(path, mode) {
        Ok(id) => ptr::without_provenance_mut(id.as_token()),
        Err(_) => {
            sync_errno();
            ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn fclose(f: *mut FILE) -> c_int {
    if is_console(f) || is_stdin(f) {
        return 0;
    }
    let Some(id) = stream_id(f) else {
        invalid_handle();
        return EOF;
    };
    match stream_close(id) {
        Ok(()) => 0,
        Err(_) => {
            sync_errno();
            EOF
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn fread(
    dest: *mut c_void,
    size: usize,
    nmemb: usize,
    f: *mut FILE,
) -> usize {
    if dest.is_null() || size == 0 || nmemb == 0 {
        return 0;
    }
    // No interactive input exists; stdin is permanently at end of file.
    if is_stdin(f) {
        return 0;
    }
    let Some(total) = size.checked_mul(nmemb) else {
        invalid_handle();
        return 0;
    };
    let Some(id) = stream_id(f) else {
        invalid_handle();
        return 0;
    };
    let out = core::slice::from_raw_parts_mut(dest as *mut u8, total);
    match stream_read(id, out) {
        Ok(n) => n / size,
        Err(_) => {
            sync_errno();
            0
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn fwrite(
    src: *const c_void,
    size: usize,
    nmemb: usize,
    f: *mut FILE,
) -> usize {
    if src.is_null() || size == 0 || nmemb == 0 {
        return 0;
    }
    let Some(total) = size.checked_mul(nmemb) else {
        invalid_handle();
        return 0;
    };
    let data = core::slice::from_raw_parts(src as *const u8, total);
    if is_console(f) {
        console_write(data);
        return nmemb;
    }
    let Some(id) = stream_id(f) else {
        invalid_handle();
        return 0;
    };
    match stream_write(id, data) {
        Ok(n) => n / size,
        Err(_) => {
            sync_errno();
            0
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn fseek(f: *mut FILE, offset: c_long, whence: c_int) -> c_int {
    let Some(id) = stream_id(f) else {
        invalid_handle();
        return -1;
    };
    match stream_seek(id, offset as i64, whence) {
        Ok(_) => 0,
        Err(_) => {
            sync_errno();
            -1
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ftell(f: *mut FILE) -> c_long {
    let Some(id) = stream_id(f) else {
        invalid_handle();
        return -1;
    };
    match stream_tell(id) {
        Ok(offset) => offset as c_long,
        Err(_) => {
            sync_errno();
            -1
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn fflush(f: *mut FILE) -> c_int {
    // Console output is unbuffered and a null argument has nothing staged.
    if f.is_null() || is_console(f) || is_stdin(f) {
        return 0;
    }
    let Some(id) = stream_id(f) else {
        invalid_handle();
        return EOF;
    };
    match stream_flush(id) {
        Ok(()) => 0,
        Err(_) => {
            sync_errno();
            EOF
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn feof(f: *mut FILE) -> c_int {
    if is_stdin(f) {
        return 1;
    }
    if is_console(f) {
        return 0;
    }
    match stream_id(f).and_then(|id| stream_eof(id).ok()) {
        Some(true) => 1,
        _ => 0,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ferror(f: *mut FILE) -> c_int {
    if is_console(f) || is_stdin(f) {
        return 0;
    }
    match stream_id(f).and_then(|id| stream_error(id).ok()) {
        Some(true) => 1,
        _ => 0,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn fileno(f: *mut FILE) -> c_int {
    f as usize as c_int
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn fgets(dest: *mut c_char, size: c_int, f: *mut FILE) -> *mut c_char {
    if dest.is_null() || size <= 0 || is_stdin(f) {
        return ptr::null_mut();
    }
    let Some(id) = stream_id(f) else {
        invalid_handle();
        return ptr::null_mut();
    };

    let cap = (size - 1) as usize;
    let mut wrote = 0usize;
    while wrote < cap {
        let mut byte = [0u8; 1];
        match stream_read(id, &mut byte) {
            Ok(0) => break,
            Ok(_) => {
                *dest.add(wrote) = byte[0] as c_char;
                wrote += 1;
                if byte[0] == b'\n' {
                    break;
                }
            }
            Err(_) => {
                sync_errno();
                if wrote == 0 {
                    return ptr::null_mut();
                }
                break;
            }
        }
    }

    if wrote == 0 && cap > 0 {
        return ptr::null_mut();
    }
    *dest.add(wrote) = 0;
    dest
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn fputc(c: c_int, f: *mut FILE) -> c_int {
    let byte = [c as u8];
    if is_console(f) {
        console_write(&byte);
        return c;
    }
    let Some(id) = stream_id(f) else {
        invalid_handle();
        return EOF;
    };
    match stream_write(id, &byte) {
        Ok(_) => c,
        Err(_) => {
            sync_errno();
            EOF
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn fputs(s: *const c_char, f: *mut FILE) -> c_int {
    let Some(bytes) = cstr_bytes(s) else {
        invalid_handle();
        return EOF;
    };
    if is_console(f) {
        console_write(bytes);
        return 0;
    }
    let Some(id) = stream_id(f) else {
        invalid_handle();
        return EOF;
    };
    match stream_write(id, bytes) {
        Ok(_) => 0,
        Err(_) => {
            sync_errno();
            EOF
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn puts(s: *const c_char) -> c_int {
    let Some(bytes) = cstr_bytes(s) else {
        invalid_handle();
        return EOF;
    };
    console_write(bytes);
    console_write(b"\n");
    bytes.len() as c_int + 1
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn putchar(c: c_int) -> c_int {
    console_write(&[c as u8]);
    c
}

unsafe fn console_format(fmt: *const c_char, args: VaList<'_>) -> c_int {
    let Some(fmt) = cstr_bytes(fmt) else {
        invalid_handle();
        return -1;
    };
    let mut source = VaArgs { list: args };
    let mut sink = ConsoleSink::new();
    let count = format_into(&mut sink, fmt, &mut source);
    sink.flush();
    count as c_int
}

unsafe fn stream_format(id: StreamId, fmt: *const c_char, args: VaList<'_>) -> c_int {
    let Some(fmt) = cstr_bytes(fmt) else {
        invalid_handle();
        return -1;
    };
    let mut source = VaArgs { list: args };
    let mut sink = StreamSink { id, failed: false };
    let count = format_into(&mut sink, fmt, &mut source);
    if sink.failed {
        sync_errno();
        return -1;
    }
    count as c_int
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn printf(fmt: *const c_char, mut args: ...) -> c_int {
    console_format(fmt, args)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn vprintf(fmt: *const c_char, args: VaList<'_>) -> c_int {
    console_format(fmt, args)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn fprintf(f: *mut FILE, fmt: *const c_char, mut args: ...) -> c_int {
    vfprintf(f, fmt, args)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn vfprintf(f: *mut FILE, fmt: *const c_char, args: VaList<'_>) -> c_int {
    if is_console(f) {
        return console_format(fmt, args);
    }
    let Some(id) = stream_id(f) else {
        invalid_handle();
        return -1;
    };
    stream_format(id, fmt, args)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn sprintf(dest: *mut c_char, fmt: *const c_char, mut args: ...) -> c_int {
    vsprintf(dest, fmt, args)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn vsprintf(
    dest: *mut c_char,
    fmt: *const c_char,
    args: VaList<'_>,
) -> c_int {
    let Some(fmt) = cstr_bytes(fmt) else {
        invalid_handle();
        return -1;
    };
    if dest.is_null() {
        invalid_handle();
        return -1;
    }
    let mut source = VaArgs { list: args };
    let mut sink = RawSink {
        dest: dest as *mut u8,
        len: 0,
    };
    let count = format_into(&mut sink, fmt, &mut source);
    *dest.add(count) = 0;
    count as c_int
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn snprintf(
    dest: *mut c_char,
    size: usize,
    fmt: *const c_char,
    mut args: ...
) -> c_int {
    vsnprintf(dest, size, fmt, args)
}

/// Returns the byte count actually placed in `dest`, not the untruncated
/// length; callers here only ever check for overflow by comparing against
/// `size`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vsnprintf(
    dest: *mut c_char,
    size: usize,
    fmt: *const c_char,
    args: VaList<'_>,
) -> c_int {
    let Some(fmt) = cstr_bytes(fmt) else {
        invalid_handle();
        return -1;
    };
    if dest.is_null() || size == 0 {
        return 0;
    }
    let buf = core::slice::from_raw_parts_mut(dest as *mut u8, size);
    let mut source = VaArgs { list: args };
    let mut sink = BufferSink::new(buf);
    format_into(&mut sink, fmt, &mut source);
    sink.finish() as c_int
}

fn scan_number_width(fmt: &[u8], mut i: usize) -> (usize, usize) {
    let mut width = 0usize;
    while let Some(&byte) = fmt.get(i) {
        if !byte.is_ascii_digit() {
            break;
        }
        width = width.saturating_mul(10) + (byte - b'0') as usize;
        i += 1;
    }
    (width, i)
}

unsafe fn scan_impl(input: &[u8], fmt: &[u8], list: &mut VaList<'_>) -> c_int {
    let mut matched: c_int = 0;
    let mut pos = 0usize;
    let mut i = 0usize;

    while i < fmt.len() {
        let byte = fmt[i];

        if isspace(byte) {
            while pos < input.len() && isspace(input[pos]) {
                pos += 1;
            }
            i += 1;
            continue;
        }

        if byte != b'%' {
            if input.get(pos) == Some(&byte) {
                pos += 1;
                i += 1;
                continue;
            }
            break;
        }

        i += 1;
        let (width, after_width) = scan_number_width(fmt, i);
        i = after_width;
        let mut long = false;
        while fmt.get(i) == Some(&b'l') {
            long = true;
            i += 1;
        }
        let Some(&conv) = fmt.get(i) else {
            break;
        };
        i += 1;

        match conv {
            b'%' => {
                if input.get(pos) == Some(&b'%') {
                    pos += 1;
                } else {
                    return matched;
                }
            }
            b'd' | b'i' | b'x' => {
                while pos < input.len() && isspace(input[pos]) {
                    pos += 1;
                }
                let base = match conv {
                    b'd' => 10,
                    b'i' => 0,
                    _ => 16,
                };
                let parsed = parse_i64_radix(&input[pos..], base);
                if parsed.consumed == 0 {
                    return matched;
                }
                pos += parsed.consumed;
                if long {
                    *list.next_arg::<*mut c_long>() = parsed.value as c_long;
                } else {
                    *list.next_arg::<*mut c_int>() = parsed.value as c_int;
                }
                matched += 1;
            }
            b'f' => {
                while pos < input.len() && isspace(input[pos]) {
                    pos += 1;
                }
                let parsed = parse_f64(&input[pos..]);
                if parsed.consumed == 0 {
                    return matched;
                }
                pos += parsed.consumed;
                if long {
                    *list.next_arg::<*mut f64>() = parsed.value;
                } else {
                    *list.next_arg::<*mut f32>() = parsed.value as f32;
                }
                matched += 1;
            }
            b's' => {
                while pos < input.len() && isspace(input[pos]) {
                    pos += 1;
                }
                let mut span = 0usize;
                let cap = if width == 0 { usize::MAX } else { width };
                while span < cap && pos + span < input.len() && !isspace(input[pos + span]) {
                    span += 1;
                }
                if span == 0 {
                    return matched;
                }
                let dest = list.next_arg::<*mut c_char>();
                if dest.is_null() {
                    return matched;
                }
                let mut k = 0usize;
                while k < span {
                    *dest.add(k) = input[pos + k] as c_char;
                    k += 1;
                }
                *dest.add(span) = 0;
                pos += span;
                matched += 1;
            }
            b'c' => {
                let Some(&ch) = input.get(pos) else {
                    return matched;
                };
                let dest = list.next_arg::<*mut c_char>();
                if dest.is_null() {
                    return matched;
                }
                *dest = ch as c_char;
                pos += 1;
                matched += 1;
            }
            _ => return matched,
        }
    }

    matched
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn sscanf(input: *const c_char, fmt: *const c_char, mut args: ...) -> c_int {
    let (Some(input), Some(fmt)) = (cstr_bytes(input), cstr_bytes(fmt)) else {
        invalid_handle();
        return -1;
    };
    let mut list = args;
    scan_impl(input, fmt, &mut list)
}
