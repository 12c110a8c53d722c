//! The `extern "C"` surface the hosted application links against.
//!
//! Symbols here carry the exact names and ABIs of the libc subset the
//! legacy binary expects. Behavior lives in the backing crates; this crate
//! only translates pointers, variadics and return conventions.

#![no_std]
#![feature(c_variadic)]
#![allow(unsafe_op_in_unsafe_fn)]

mod cstr;
pub mod errno;
pub mod fsops;
pub mod math;
pub mod stdio;
pub mod stdlib;
pub mod string;
pub mod unistd;
