//! Unsplash photo search and download.
//!
//! Thin client over the search, random-photo, and download-accounting
//! endpoints, plus the local-file download path.

pub mod client;
pub mod types;

pub use client::UnsplashClient;
pub use types::{
    ColorFilter, DownloadedFile, OrderBy, Photo, PhotoSize, SearchOrientation, SearchQuery,
    SearchResult,
};
