//! Unsplash photo provider adapter.

mod client;
mod dto;

pub use client::{MAX_PAGE_SIZE, UNSPLASH_API_BASE, UnsplashClient};
