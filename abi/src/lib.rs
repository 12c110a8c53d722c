#![no_std]
#![forbid(unsafe_op_in_unsafe_fn)]

pub mod errno;
pub mod file;
pub mod services;
pub mod stat;
