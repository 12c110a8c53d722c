//! Error codes shared between the shim crates and the hosted application.
//!
//! The numeric values are the ones the legacy binary was compiled against;
//! they must never change.

use core::ffi::c_int;

/// The "no error" sentinel held by the error cell at startup.
pub const ESUCCESS: c_int = 0;
/// No such file or directory.
pub const ENOENT: c_int = 2;
/// I/O error.
pub const EIO: c_int = 5;
/// Out of memory.
pub const ENOMEM: c_int = 12;
/// Permission denied.
pub const EACCES: c_int = 13;
/// Is a directory.
pub const EISDIR: c_int = 21;
/// Invalid argument.
pub const EINVAL: c_int = 22;

/// Implement errno conversion methods for shim error enums.
///
/// Generates `errno()` and `from_errno()` for enums whose variants map onto
/// the legacy errno values.
macro_rules! impl_shim_error {
    ($ty:ty, fallback: $fallback:ident, variants: { $($val:ident => $variant:ident),* $(,)? }) => {
        impl $ty {
            /// The errno value the hosted application observes for this error.
            #[inline]
            pub fn errno(self) -> c_int {
                match self {
                    $(Self::$variant => $val,)*
                }
            }

            /// Map an errno value back onto the enum; unknown codes collapse
            /// to the fallback variant.
            #[inline]
            pub fn from_errno(val: c_int) -> Self {
                match val {
                    $($val => Self::$variant,)*
                    _ => Self::$fallback,
                }
            }
        }
    };
}

/// Shim operation result type.
pub type ShimResult<T> = Result<T, ShimError>;

/// Failures a shim call can report to the hosted application.
///
/// Every fallible shim operation stores the matching errno value in the
/// process-wide error cell before returning `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShimError {
    /// The path did not resolve to an entry.
    NoSuchEntry,
    /// The backing store failed or is not available.
    IoError,
    /// The kernel heap could not satisfy the request.
    OutOfMemory,
    /// The operation is not permitted on this entry.
    PermissionDenied,
    /// Byte I/O was requested on a directory.
    IsADirectory,
    /// Bad handle, bad whence, negative offset and friends.
    InvalidArgument,
}

impl_shim_error!(ShimError, fallback: IoError, variants: {
    ENOENT => NoSuchEntry,
    EIO => IoError,
    ENOMEM => OutOfMemory,
    EACCES => PermissionDenied,
    EISDIR => IsADirectory,
    EINVAL => InvalidArgument,
});
