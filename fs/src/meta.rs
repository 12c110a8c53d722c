//! Path-level metadata operations.
//!
//! These resolve fresh on every call; nothing here touches the stream
//! table, so metadata on a path stays truthful while a stream on the same
//! object is open (modulo its staged bytes).

use hearth_abi::errno::{ShimError, ShimResult};
use hearth_abi::services::{ObjectKind, StorageError};
use hearth_abi::stat::{MODE_DIR_DEFAULT, MODE_FILE_DEFAULT, Stat};

use crate::streams::{fail, storage};

/// `stat` by path.
pub fn metadata(path: &[u8]) -> ShimResult<Stat> {
    let store = storage()?;
    let (object, kind) = match store.resolve(path) {
        Ok(found) => found,
        Err(err) => return fail(err.into()),
    };

    let result = match kind {
        ObjectKind::Directory => Ok(Stat {
            st_dev: 0,
            st_ino: object as u32,
            st_mode: MODE_DIR_DEFAULT,
            st_nlink: 1,
            st_uid: 0,
            st_gid: 0,
            st_size: 0,
        }),
        ObjectKind::Regular => match store.length(object) {
            Ok(len) => Ok(Stat {
                st_dev: 0,
                st_ino: object as u32,
                st_mode: MODE_FILE_DEFAULT,
                st_nlink: 1,
                st_uid: 0,
                st_gid: 0,
                st_size: len as i64,
            }),
            Err(err) => fail(err.into()),
        },
    };

    store.release(object);
    result
}

/// `mkdir`. Creating a directory that already exists succeeds; the hosted
/// application re-creates its save directory on every launch.
pub fn make_dir(path: &[u8]) -> ShimResult<()> {
    let store = storage()?;
    match store.create_dir(path) {
        Ok(()) => Ok(()),
        Err(StorageError::Exists) => match store.resolve(path) {
            Ok((object, ObjectKind::Directory)) => {
                store.release(object);
                Ok(())
            }
            Ok((object, ObjectKind::Regular)) => {
                store.release(object);
                fail(ShimError::PermissionDenied)
            }
            Err(err) => fail(err.into()),
        },
        Err(err) => fail(err.into()),
    }
}

/// `remove`. Only regular files; directories report `EISDIR`.
pub fn remove_path(path: &[u8]) -> ShimResult<()> {
    let store = storage()?;
    match store.remove(path) {
        Ok(()) => Ok(()),
        Err(err) => fail(err.into()),
    }
}

/// `rename`. Replaces a regular file at the destination; a missing source
/// leaves the destination untouched.
pub fn rename_path(from: &[u8], to: &[u8]) -> ShimResult<()> {
    let store = storage()?;
    match store.rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) => fail(err.into()),
    }
}
