//! Integration tests driving the full router in-process.
//!
//! The app is wired over the in-memory Item Store and the local object
//! provider in a temp directory, so the suite runs without PostgreSQL,
//! AWS, or a network listener.

mod helpers;

mod folder_test;
mod search_test;
mod share_test;
mod upload_test;
