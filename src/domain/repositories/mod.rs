//! Repository trait definitions for the domain layer.
//!
//! [`EntryRepository`] abstracts where the redirect table comes from. The
//! production implementation is
//! [`crate::infrastructure::sheets::SheetsEntryRepository`]; a `mockall` mock
//! is generated for unit tests.

pub mod entry_repository;

pub use entry_repository::EntryRepository;

#[cfg(test)]
pub use entry_repository::MockEntryRepository;
