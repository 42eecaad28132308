//! Item entity: files and folders in the drive tree.

pub mod breadcrumb;
pub mod kind;
pub mod model;

pub use breadcrumb::{Breadcrumb, CrumbId, ROOT_CRUMB_ID, ROOT_CRUMB_NAME};
pub use kind::ItemKind;
pub use model::{CreateItem, Item, ItemPatch};
