//! Noteshare gateway services
//!
//! The gateway core on top of the object-store port: upload orchestration
//! with pre-flight duplicate checks, namespace listing with search, the
//! folder-to-zip archiver, and the fire-and-forget activity log.

pub mod activity;
pub mod archive;
pub mod listing;
pub mod upload;

pub use activity::ActivityLog;
pub use archive::archive_folder;
pub use listing::list_keys;
pub use upload::{IncomingFile, UploadService};
