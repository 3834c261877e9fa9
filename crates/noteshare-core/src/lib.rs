//! Noteshare core library
//!
//! Shared building blocks for the noteshare gateway: configuration, the
//! error taxonomy, the storage-key sanitizer, the content-type resolver,
//! and request/response models.
//!
//! # Storage key invariants
//!
//! Every key handed to the storage layer has been through
//! [`sanitize_key`]: no `../` segments, no leading `/`, backslashes
//! normalized to `/`, whitespace runs collapsed to `_`. Keys are
//! case-sensitive and unique within the bucket namespace.

pub mod config;
pub mod content_type;
pub mod error;
pub mod models;
pub mod sanitize;
pub mod storage_types;

pub use config::Config;
pub use content_type::{resolve_content_type, OCTET_STREAM};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use sanitize::sanitize_key;
pub use storage_types::StorageBackend;
