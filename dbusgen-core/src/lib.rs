//! # dbusgen Core
//!
//! D-Bus wire type signatures for the dbusgen code generator.
//!
//! This crate provides:
//! - Type descriptors for primitive and compound wire types
//! - A recursive-descent signature decoder
//! - Error types carrying the offending signature and byte offset

pub mod error;
pub mod signature;
pub mod types;

pub use error::{SignatureError, SignatureErrorKind};
pub use signature::{MAX_CONTAINER_DEPTH, MAX_DEPTH, MAX_SIGNATURE, decode_all, decode_one};
pub use types::{Primitive, Type};
