//! HTTP adapter for the noteshare gateway.
//!
//! Maps multipart uploads, listing, and download requests onto the
//! gateway services. The adapter itself is thin: all non-trivial
//! invariants live in `noteshare-services` and below.

pub mod actor;
pub mod api_doc;
pub mod client_ip;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
