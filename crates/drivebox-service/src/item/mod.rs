//! Tree operations over the Item Store.

pub mod service;
pub mod tree;

pub use service::ItemService;
pub use tree::TreeService;
