pub mod activity;
pub mod upload;

pub use activity::{ActivityAction, ActivityEvent};
pub use upload::UploadResponse;
