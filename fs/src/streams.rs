//! Buffered stream registry.
//!
//! Streams hand the hosted application opaque tokens instead of pointers.
//! A token encodes the slot index plus the slot's generation counter, so a
//! stale token from a closed stream fails validation instead of touching
//! whatever reused the slot. Each stream carries one small buffer that is
//! either idle, a prefetched read window, or a staged run of write bytes;
//! it never holds both directions at once.

use core::ffi::c_int;

use hearth_abi::errno::{ShimError, ShimResult};
use hearth_abi::file::{MAX_OPEN_STREAMS, OpenMode, STREAM_BUF_SIZE, STREAM_TOKEN_BIAS};
use hearth_abi::services::{ObjectKind, StorageError, StorageObject, StorageService};
use hearth_abi::stat::{MODE_FILE_DEFAULT, SEEK_CUR, SEEK_END, SEEK_SET, Stat};
use hearth_lib::errno::set_last_error;
use hearth_lib::services;
use spin::Mutex;

/// Validated reference to an open stream slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamId {
    index: usize,
    generation: u16,
}

impl StreamId {
    fn new(index: usize, generation: u16) -> Self {
        Self { index, generation }
    }

    /// Decode a token from the hosted application. Tokens below the bias
    /// (null and the console sentinels included) and tokens outside the
    /// table never decode.
    pub fn from_token(token: usize) -> Option<Self> {
        let token = token as u64;
        if token >> 32 != 0 {
            return None;
        }
        let index = ((token & 0xffff) as usize).checked_sub(STREAM_TOKEN_BIAS)?;
        if index >= MAX_OPEN_STREAMS {
            return None;
        }
        Some(Self::new(index, (token >> 16) as u16))
    }

    /// Encode for the C side. The result is never 0, 1 or 2.
    pub fn as_token(self) -> usize {
        ((self.generation as usize) << 16) | (self.index + STREAM_TOKEN_BIAS)
    }
}

#[derive(Clone, Copy)]
enum BufState {
    Idle,
    /// Prefetched bytes covering `[start, start + len)` of the object, of
    /// which `consumed` have already been handed out.
    Read {
        start: u64,
        len: usize,
        consumed: usize,
    },
    /// Staged bytes destined for `[start, start + len)` of the object.
    Write {
        start: u64,
        len: usize,
    },
}

struct Stream {
    object: StorageObject,
    mode: OpenMode,
    position: u64,
    eof: bool,
    error: bool,
    state: BufState,
    buf: [u8; STREAM_BUF_SIZE],
}

struct StreamSlot {
    generation: u16,
    stream: Option<Stream>,
}

struct StreamTable {
    slots: [StreamSlot; MAX_OPEN_STREAMS],
}

const EMPTY_SLOT: StreamSlot = StreamSlot {
    generation: 0,
    stream: None,
};

static STREAMS: Mutex<StreamTable> = Mutex::new(StreamTable {
    slots: [EMPTY_SLOT; MAX_OPEN_STREAMS],
});

/// Record the errno for `err` and return it. Every error leaving this
/// module goes through here so the error cell never falls out of sync.
pub(crate) fn fail<T>(err: ShimError) -> ShimResult<T> {
    set_last_error(err.errno());
    Err(err)
}

pub(crate) fn storage() -> ShimResult<&'static dyn StorageService> {
    match services::storage() {
        Some(store) => Ok(store),
        None => fail(ShimError::IoError),
    }
}

fn with_stream<T>(
    id: StreamId,
    f: impl FnOnce(&mut Stream, &'static dyn StorageService) -> ShimResult<T>,
) -> ShimResult<T> {
    let store = storage()?;
    let mut table = STREAMS.lock();
    let Some(slot) = table.slots.get_mut(id.index) else {
        return fail(ShimError::InvalidArgument);
    };
    if slot.generation != id.generation {
        return fail(ShimError::InvalidArgument);
    }
    let Some(stream) = slot.stream.as_mut() else {
        return fail(ShimError::InvalidArgument);
    };
    f(stream, store)
}

/// Push any staged write run to storage. A short or failed write marks the
/// stream's error flag; the staged bytes are gone either way.
fn flush_staged(stream: &mut Stream, store: &'static dyn StorageService) -> ShimResult<()> {
    let BufState::Write { start, len } = stream.state else {
        return Ok(());
    };
    stream.state = BufState::Idle;
    match store.write_at(stream.object, start, &stream.buf[..len]) {
        Ok(n) if n == len => Ok(()),
        Ok(_) => {
            stream.error = true;
            fail(ShimError::IoError)
        }
        Err(err) => {
            stream.error = true;
            fail(err.into())
        }
    }
}

fn drop_read_window(stream: &mut Stream) {
    if let BufState::Read { .. } = stream.state {
        stream.state = BufState::Idle;
    }
}

/// Open a stream on `path`. Create/truncate/append dispositions have
/// already been decided by the mode flags; directories never open as
/// streams.
pub fn stream_open(path: &[u8], mode: OpenMode) -> ShimResult<StreamId> {
    if path.is_empty() || (!mode.readable() && !mode.writable()) {
        return fail(ShimError::InvalidArgument);
    }
    let store = storage()?;

    let object = match store.resolve(path) {
        Ok((object, ObjectKind::Regular)) => object,
        Ok((object, ObjectKind::Directory)) => {
            store.release(object);
            return fail(ShimError::IsADirectory);
        }
        Err(StorageError::NotFound) if mode.contains(OpenMode::CREATE) => {
            match store.create_file(path) {
                Ok(object) => object,
                Err(err) => return fail(err.into()),
            }
        }
        Err(err) => return fail(err.into()),
    };

    if mode.contains(OpenMode::TRUNCATE) {
        if let Err(err) = store.set_length(object, 0) {
            store.release(object);
            return fail(err.into());
        }
    }

    let position = if mode.contains(OpenMode::APPEND) {
        match store.length(object) {
            Ok(len) => len,
            Err(err) => {
                store.release(object);
                return fail(err.into());
            }
        }
    } else {
        0
    };

    let mut table = STREAMS.lock();
    let Some(index) = table.slots.iter().position(|slot| slot.stream.is_none()) else {
        drop(table);
        store.release(object);
        return fail(ShimError::IoError);
    };
    let slot = &mut table.slots[index];
    slot.stream = Some(Stream {
        object,
        mode,
        position,
        eof: false,
        error: false,
        state: BufState::Idle,
        buf: [0u8; STREAM_BUF_SIZE],
    });
    Ok(StreamId::new(index, slot.generation))
}

/// Read up to `out.len()` bytes at the cursor. A short count means end of
/// data was reached and latches the EOF flag; `Ok(0)` at end of data is
/// not an error.
pub fn stream_read(id: StreamId, out: &mut [u8]) -> ShimResult<usize> {
    with_stream(id, |stream, store| {
        if !stream.mode.readable() {
            return fail(ShimError::InvalidArgument);
        }
        if out.is_empty() {
            return Ok(0);
        }
        flush_staged(stream, store)?;

        let mut copied = 0usize;
        while copied < out.len() {
            if let BufState::Read {
                start,
                len,
                consumed,
            } = &mut stream.state
            {
                let window_pos = *start + *consumed as u64;
                if window_pos == stream.position && *consumed < *len {
                    let take = (out.len() - copied).min(*len - *consumed);
                    out[copied..copied + take]
                        .copy_from_slice(&stream.buf[*consumed..*consumed + take]);
                    *consumed += take;
                    stream.position += take as u64;
                    copied += take;
                    continue;
                }
                // Cursor moved away from the window; refetch below.
                stream.state = BufState::Idle;
            }

            let remaining = out.len() - copied;
            if remaining >= STREAM_BUF_SIZE {
                // Large requests go straight to storage.
                let n = match store.read_at(stream.object, stream.position, &mut out[copied..]) {
                    Ok(n) => n,
                    Err(err) => {
                        stream.error = true;
                        return fail(err.into());
                    }
                };
                stream.position += n as u64;
                copied += n;
                if n < remaining {
                    stream.eof = true;
                }
                break;
            }

            let filled = match store.read_at(stream.object, stream.position, &mut stream.buf) {
                Ok(n) => n,
                Err(err) => {
                    stream.error = true;
                    return fail(err.into());
                }
            };
            if filled == 0 {
                stream.eof = true;
                break;
            }
            stream.state = BufState::Read {
                start: stream.position,
                len: filled,
                consumed: 0,
            };
        }

        Ok(copied)
    })
}

/// Write `data` at the cursor. Small writes stage in the stream buffer;
/// buffer-sized and larger chunks go straight to storage after a flush.
pub fn stream_write(id: StreamId, data: &[u8]) -> ShimResult<usize> {
    with_stream(id, |stream, store| {
        if !stream.mode.writable() {
            return fail(ShimError::InvalidArgument);
        }
        if data.is_empty() {
            return Ok(0);
        }
        drop_read_window(stream);

        if stream.mode.contains(OpenMode::APPEND) {
            // Every append write lands at the current end, wherever the
            // cursor was seeked in between.
            flush_staged(stream, store)?;
            stream.position = match store.length(stream.object) {
                Ok(len) => len,
                Err(err) => {
                    stream.error = true;
                    return fail(err.into());
                }
            };
        }

        let mut written = 0usize;
        while written < data.len() {
            let chunk = &data[written..];

            if chunk.len() >= STREAM_BUF_SIZE {
                flush_staged(stream, store)?;
                let n = match store.write_at(stream.object, stream.position, chunk) {
                    Ok(n) => n,
                    Err(err) => {
                        stream.error = true;
                        return fail(err.into());
                    }
                };
                stream.position += n as u64;
                written += n;
                if n < chunk.len() {
                    stream.error = true;
                    return fail(ShimError::IoError);
                }
                continue;
            }

            let (run_start, run_len) = match stream.state {
                BufState::Write { start, len }
                    if start + len as u64 == stream.position && len < STREAM_BUF_SIZE =>
                {
                    (start, len)
                }
                _ => {
                    flush_staged(stream, store)?;
                    stream.state = BufState::Write {
                        start: stream.position,
                        len: 0,
                    };
                    (stream.position, 0)
                }
            };

            let take = chunk.len().min(STREAM_BUF_SIZE - run_len);
            stream.buf[run_len..run_len + take].copy_from_slice(&chunk[..take]);
            stream.state = BufState::Write {
                start: run_start,
                len: run_len + take,
            };
            stream.position += take as u64;
            written += take;

            if run_len + take == STREAM_BUF_SIZE {
                flush_staged(stream, store)?;
            }
        }

        stream.eof = false;
        Ok(data.len())
    })
}

/// Move the cursor. Seeking past the end is permitted; the gap materializes
/// as zeroes if it is later written over. Returns the new offset.
pub fn stream_seek(id: StreamId, offset: i64, whence: c_int) -> ShimResult<i64> {
    with_stream(id, |stream, store| {
        flush_staged(stream, store)?;
        drop_read_window(stream);

        let base: i64 = match whence {
            SEEK_SET => 0,
            SEEK_CUR => stream.position as i64,
            SEEK_END => match store.length(stream.object) {
                Ok(len) => len as i64,
                Err(err) => {
                    stream.error = true;
                    return fail(err.into());
                }
            },
            _ => return fail(ShimError::InvalidArgument),
        };

        let Some(target) = base.checked_add(offset).filter(|t| *t >= 0) else {
            return fail(ShimError::InvalidArgument);
        };

        stream.position = target as u64;
        stream.eof = false;
        Ok(target)
    })
}

/// Current cursor offset, counting staged bytes that have not hit storage
/// yet.
pub fn stream_tell(id: StreamId) -> ShimResult<i64> {
    with_stream(id, |stream, _| Ok(stream.position as i64))
}

pub fn stream_flush(id: StreamId) -> ShimResult<()> {
    with_stream(id, flush_staged)
}

/// Close the stream: flush staged bytes, retire the token generation and
/// drop the storage handle. The token is dead even if the flush fails.
pub fn stream_close(id: StreamId) -> ShimResult<()> {
    let store = storage()?;

    let mut stream = {
        let mut table = STREAMS.lock();
        let Some(slot) = table.slots.get_mut(id.index) else {
            return fail(ShimError::InvalidArgument);
        };
        if slot.generation != id.generation {
            return fail(ShimError::InvalidArgument);
        }
        let Some(stream) = slot.stream.take() else {
            return fail(ShimError::InvalidArgument);
        };
        slot.generation = slot.generation.wrapping_add(1);
        stream
    };

    let flushed = flush_staged(&mut stream, store);
    store.release(stream.object);
    flushed
}

/// Metadata for an open stream, sized after staged bytes are flushed.
pub fn stream_stat(id: StreamId) -> ShimResult<Stat> {
    with_stream(id, |stream, store| {
        flush_staged(stream, store)?;
        let len = match store.length(stream.object) {
            Ok(len) => len,
            Err(err) => return fail(err.into()),
        };
        Ok(Stat {
            st_dev: 0,
            st_ino: stream.object as u32,
            st_mode: MODE_FILE_DEFAULT,
            st_nlink: 1,
            st_uid: 0,
            st_gid: 0,
            st_size: len as i64,
        })
    })
}

pub fn stream_eof(id: StreamId) -> ShimResult<bool> {
    with_stream(id, |stream, _| Ok(stream.eof))
}

pub fn stream_error(id: StreamId) -> ShimResult<bool> {
    with_stream(id, |stream, _| Ok(stream.error))
}
