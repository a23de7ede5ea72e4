//! Wire schema for the messages-style generation endpoint, plus the public
//! option/result types for generation calls.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prompt styling applied before the request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Style {
    Lifestyle,
    Realistic,
    Artistic,
    Custom,
}

/// Target aspect for generated images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Orientation {
    Portrait,
    Landscape,
    Square,
}

/// Declared encoding of a returned image, used to pick the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Png,
    Jpeg,
}

impl MediaType {
    /// PNG keeps its extension; everything else is treated as JPEG, matching
    /// what the endpoint actually returns.
    pub fn from_mime(mime: &str) -> Self {
        if mime == "image/png" {
            MediaType::Png
        } else {
            MediaType::Jpeg
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            MediaType::Png => "png",
            MediaType::Jpeg => "jpg",
        }
    }
}

/// Options for a single generation call.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub prompt: String,
    pub output_dir: PathBuf,
    pub filename: Option<String>,
    pub style: Style,
    pub orientation: Orientation,
    pub max_attempts: u32,
}

impl GenerateOptions {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            output_dir: PathBuf::from("generated-images"),
            style: Style::Lifestyle,
            orientation: Orientation::Portrait,
            filename: None,
            max_attempts: crate::retry::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// A successfully generated and persisted image.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub file_path: PathBuf,
    pub size: u64,
    pub media_type: MediaType,
    pub prompt: String,
    pub enhanced_prompt: String,
}

// Request/response payloads.

#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// Response content block. Anything that is not an image block is tolerated
/// during decoding but never treated as image data.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Image {
        source: ImageSource,
    },
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct ImageSource {
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub media_type: String,
}
