//! snapsmith - generate lifestyle images via an AI endpoint and fetch stock
//! photos from Unsplash.
//!
//! Two independent clients share the HTTP plumbing: a generation client that
//! retries a messages-style endpoint and decodes base64 image payloads, and
//! an Unsplash client that searches photos and streams them to disk.

pub mod config;
pub mod download;
pub mod error;
pub mod generate;
pub mod http;
pub mod prompts;
pub mod retry;
pub mod unsplash;

pub use error::{Error, Result};
