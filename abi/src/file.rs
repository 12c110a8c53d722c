//! Stream-table constants and the open-mode flags shared across the layer.

use bitflags::bitflags;

/// Fixed capacity of the opaque stream table.
pub const MAX_OPEN_STREAMS: usize = 32;

/// Per-stream staging/prefetch buffer size in bytes.
pub const STREAM_BUF_SIZE: usize = 512;

/// Added to the slot index when a stream token is handed out, keeping tokens
/// clear of NULL and of the legacy `(FILE*)1`/`(FILE*)2` console sentinels.
pub const STREAM_TOKEN_BIAS: usize = 0x10;

bitflags! {
    /// Open disposition for a stream, derived from a C `fopen` mode string.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct OpenMode: u32 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        const CREATE = 1 << 2;
        const TRUNCATE = 1 << 3;
        const APPEND = 1 << 4;
    }
}

impl OpenMode {
    #[inline]
    pub fn readable(self) -> bool {
        self.contains(Self::READ)
    }

    #[inline]
    pub fn writable(self) -> bool {
        self.contains(Self::WRITE)
    }

    /// Parse a C `fopen` mode string. `b` is accepted and ignored; `"w"`
    /// always truncates, append is only entered through an explicit `"a"`.
    pub fn from_mode_str(mode: &[u8]) -> Option<Self> {
        let mut flags = match mode.first()? {
            b'r' => Self::READ,
            b'w' => Self::WRITE | Self::CREATE | Self::TRUNCATE,
            b'a' => Self::WRITE | Self::CREATE | Self::APPEND,
            _ => return None,
        };
        for &byte in &mode[1..] {
            match byte {
                b'+' => flags |= Self::READ | Self::WRITE,
                b'b' => {}
                _ => return None,
            }
        }
        Some(flags)
    }
}
