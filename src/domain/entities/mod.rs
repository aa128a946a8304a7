//! Core domain entities.
//!
//! The only entity is [`RedirectEntry`]: one row of the remote redirect table.

pub mod entry;

pub use entry::RedirectEntry;
