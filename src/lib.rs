//! Notes and bookmarks library
//!
//! This library provides functionality for creating, storing, searching, and managing
//! tagged notes and web bookmarks, each kept as one collection in a durable key-value slot.

mod bookmark;
mod cli;
mod config;
mod errors;
mod form;
mod helper;
mod note;
mod query;
mod record;
mod storage;
mod store;
mod tags;
mod types;

// Re-export key components
pub use bookmark::*;
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use form::*;
pub use helper::*;
pub use note::*;
pub use query::*;
pub use record::{validate_for_create, Record};
pub use storage::*;
pub use store::*;
pub use tags::*;
pub use types::*;
