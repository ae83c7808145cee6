//! # dbusgen Bench
//!
//! Benchmarking fixtures for dbusgen.

pub mod fixtures;
