//! Object reference resolution and the upload flow.

pub mod resolver;
pub mod upload;

pub use resolver::{ObjectUrlResolver, UploadTarget};
pub use upload::UploadService;
