//! Google Sheets backed entry repository.
//!
//! - [`SheetsEntryRepository`] - Fetches columns `A:B` of a sheet via `values.get`
//! - [`ValueRange`] - Response body and its conversion into entries

mod client;
mod values;

pub use client::{DEFAULT_API_BASE, SheetsEntryRepository};
pub use values::ValueRange;
