//! Domain layer containing entities, repository contracts and observer hooks.
//!
//! Nothing in this layer knows about HTTP or Google APIs.
//!
//! # Architecture
//!
//! - [`entities`] - The redirect entry data structure
//! - [`repositories`] - Data access trait definitions
//! - [`observer`] - Observability interface called by the resolver
//! - [`resolution`] - Resolution result and outcome
//!
//! # Resolution Flow
//!
//! 1. HTTP handler receives any request
//! 2. [`crate::application::services::RedirectService`] fetches entries via [`repositories::EntryRepository`]
//! 3. The first entry matching the normalized path wins, otherwise the default target
//! 4. Each decision is reported to a [`observer::RedirectObserver`]

pub mod entities;
pub mod observer;
pub mod repositories;
pub mod resolution;
