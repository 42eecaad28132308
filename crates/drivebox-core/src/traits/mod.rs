//! Trait definitions for pluggable collaborators.

pub mod object_store;

pub use object_store::ObjectStore;
