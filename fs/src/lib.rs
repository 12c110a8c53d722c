#![no_std]

#[cfg(test)]
extern crate std;

pub mod meta;
pub mod streams;

pub use streams::{
    StreamId, stream_close, stream_eof, stream_error, stream_flush, stream_open, stream_read,
    stream_seek, stream_stat, stream_tell, stream_write,
};

pub use meta::{make_dir, metadata, remove_path, rename_path};
