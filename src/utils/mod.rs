//! Utility functions for request path and target processing.
//!
//! - [`url_normalizer`] - Request path and redirect target normalization

pub mod url_normalizer;
