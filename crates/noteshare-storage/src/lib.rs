//! Noteshare storage library
//!
//! The object-store port the gateway depends on, plus its backends: S3
//! (and S3-compatible providers) and an in-process memory store used for
//! development and tests.
//!
//! # Keys
//!
//! The port works on flat string keys; folders exist only as `/`-delimited
//! key conventions. Callers are expected to hand over sanitized keys (see
//! `noteshare_core::sanitize_key`): no `..` segments, no leading `/`.
//! Whether `put` overwrites an existing key is backend-dependent; callers
//! that need uniqueness use `put_if_absent` or an `exists` check first.

pub mod factory;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_object_store;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryObjectStore;
pub use noteshare_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3ObjectStore;
pub use traits::{ObjectPage, ObjectStore, StorageError, StorageResult};
