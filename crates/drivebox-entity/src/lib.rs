//! # drivebox-entity
//!
//! Domain entity models for Drivebox. A single [`item::Item`] row type
//! represents both files and folders as nodes of an adjacency-list forest.

pub mod item;

pub use item::{Breadcrumb, CreateItem, CrumbId, Item, ItemKind, ItemPatch};
