//! Kernel service traits.
//!
//! The shim crates never talk to kernel subsystems directly; the kernel
//! registers one implementation of each trait at boot and the shims resolve
//! them through the service cells. Keeping the traits here breaks the
//! dependency cycle between the shim crates and whoever provides the
//! services.

use crate::errno::ShimError;

/// Opaque handle to a resolved storage entry. Meaning is private to the
/// registered [`StorageService`].
pub type StorageObject = u64;

/// What a resolved path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Regular,
    Directory,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Failures the storage backend can report. The shim layer folds these into
/// [`ShimError`] before they reach the hosted application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    NotFound,
    Exists,
    IsDirectory,
    NotDirectory,
    InvalidPath,
    NoSpace,
    Io,
}

impl From<StorageError> for ShimError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => ShimError::NoSuchEntry,
            StorageError::Exists => ShimError::PermissionDenied,
            StorageError::IsDirectory => ShimError::IsADirectory,
            StorageError::NotDirectory => ShimError::NoSuchEntry,
            StorageError::InvalidPath => ShimError::InvalidArgument,
            StorageError::NoSpace => ShimError::IoError,
            StorageError::Io => ShimError::IoError,
        }
    }
}

/// Kernel heap access for the allocation bridge.
pub trait HeapService: Send + Sync {
    /// Allocate `size` bytes aligned to `align`. Null on exhaustion.
    fn allocate(&self, size: usize, align: usize) -> *mut u8;

    /// Return a block obtained from [`allocate`](Self::allocate) or
    /// [`resize`](Self::resize). Must tolerate every pointer previously
    /// handed out and not yet released.
    fn release(&self, ptr: *mut u8);

    /// Grow or shrink a block, preserving the common prefix. Null on
    /// exhaustion, in which case the original block stays valid.
    fn resize(&self, ptr: *mut u8, new_size: usize) -> *mut u8;
}

/// Byte-addressed storage access for the stream and metadata shims.
pub trait StorageService: Send + Sync {
    /// Resolve a path to an object handle and its kind.
    fn resolve(&self, path: &[u8]) -> StorageResult<(StorageObject, ObjectKind)>;

    /// Current byte length of a regular object.
    fn length(&self, object: StorageObject) -> StorageResult<u64>;

    /// Read up to `buf.len()` bytes at `offset`; short reads signal end of
    /// data.
    fn read_at(&self, object: StorageObject, offset: u64, buf: &mut [u8]) -> StorageResult<usize>;

    /// Write `buf` at `offset`, extending the object as needed. Gaps left by
    /// writes past the end read back as zeroes.
    fn write_at(&self, object: StorageObject, offset: u64, buf: &[u8]) -> StorageResult<usize>;

    /// Truncate or extend a regular object to exactly `len` bytes.
    fn set_length(&self, object: StorageObject, len: u64) -> StorageResult<()>;

    /// Create an empty regular file. `Exists` if the path is taken.
    fn create_file(&self, path: &[u8]) -> StorageResult<StorageObject>;

    /// Create an empty directory. `Exists` if the path is taken.
    fn create_dir(&self, path: &[u8]) -> StorageResult<()>;

    /// Remove a regular file. `IsDirectory` for directories.
    fn remove(&self, path: &[u8]) -> StorageResult<()>;

    /// Rename an entry, replacing any regular file at the destination.
    fn rename(&self, from: &[u8], to: &[u8]) -> StorageResult<()>;

    /// Drop a handle obtained from [`resolve`](Self::resolve) or
    /// [`create_file`](Self::create_file).
    fn release(&self, object: StorageObject);
}

/// Monotonic time and cooperative yielding for the sleep shim.
pub trait SchedulerService: Send + Sync {
    /// Microseconds since boot. Monotonic, never wraps in practice.
    fn uptime_us(&self) -> u64;

    /// Give up the CPU to other runnable tasks.
    fn yield_now(&self);
}

/// Console output sink for diagnostics and the stdout/stderr streams.
pub trait ConsoleService: Send + Sync {
    fn write_bytes(&self, bytes: &[u8]);
}
