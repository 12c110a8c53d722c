//! Metadata record layout and the stat/seek constants of the legacy surface.

use core::ffi::c_int;

pub const SEEK_SET: c_int = 0;
pub const SEEK_CUR: c_int = 1;
pub const SEEK_END: c_int = 2;

pub const S_IFMT: u32 = 0o170000;
pub const S_IFDIR: u32 = 0o040000;
pub const S_IFREG: u32 = 0o100000;

/// Mode bits reported for regular files. Permission bits are inert; the
/// kernel has no user model, but the legacy macros expect them present.
pub const MODE_FILE_DEFAULT: u32 = S_IFREG | 0o644;
/// Mode bits reported for directories.
pub const MODE_DIR_DEFAULT: u32 = S_IFDIR | 0o755;

/// The `struct stat` layout the hosted application was compiled against.
///
/// `st_mode` and `st_size` carry real information; the remaining fields hold
/// stable but semantically inert values (single device, single owner).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stat {
    pub st_dev: u32,
    pub st_ino: u32,
    pub st_mode: u32,
    pub st_nlink: u32,
    pub st_uid: u32,
    pub st_gid: u32,
    pub st_size: i64,
}

impl Stat {
    /// Check the directory bit the way the legacy `S_ISDIR` macro does.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.st_mode & S_IFMT == S_IFDIR
    }

    /// Check the regular-file bit the way the legacy `S_ISREG` macro does.
    #[inline]
    pub fn is_reg(&self) -> bool {
        self.st_mode & S_IFMT == S_IFREG
    }
}
