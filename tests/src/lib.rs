//! Test doubles for the kernel services plus the shared test environment.
//!
//! The shim crates are `no_std` and talk to the kernel only through the
//! service traits, so the whole layer runs on the host against the fakes in
//! this crate.

pub mod env;
pub mod ramstore;
