//! Photofeed - infinite photo feed state for an Unsplash browser.
//!
//! This crate keeps the client-side feed: it pages random photos from the
//! provider, merges them into a deduplicated collection, persists that
//! collection in a time-bound cache and tracks local likes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing feed services and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "photofeed";
