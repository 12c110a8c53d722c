#![no_std]
#![allow(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
extern crate std;

pub mod errno;
pub mod fmt;
pub mod klog;
pub mod math;
pub mod memory;
pub mod numfmt;
pub mod service_cell;
pub mod services;
pub mod string;
