//! Query options and read-only snapshots of Unsplash API entities.

use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

/// Photo orientation filter. Unsplash calls the square-ish bucket "squarish".
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchOrientation {
    Landscape,
    Portrait,
    Squarish,
}

impl SearchOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchOrientation::Landscape => "landscape",
            SearchOrientation::Portrait => "portrait",
            SearchOrientation::Squarish => "squarish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorFilter {
    BlackAndWhite,
    Black,
    White,
    Yellow,
    Orange,
    Red,
    Purple,
    Magenta,
    Green,
    Teal,
    Blue,
}

impl ColorFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorFilter::BlackAndWhite => "black_and_white",
            ColorFilter::Black => "black",
            ColorFilter::White => "white",
            ColorFilter::Yellow => "yellow",
            ColorFilter::Orange => "orange",
            ColorFilter::Red => "red",
            ColorFilter::Purple => "purple",
            ColorFilter::Magenta => "magenta",
            ColorFilter::Green => "green",
            ColorFilter::Teal => "teal",
            ColorFilter::Blue => "blue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderBy {
    Relevant,
    Latest,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Relevant => "relevant",
            OrderBy::Latest => "latest",
        }
    }
}

/// Size variant offered per photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PhotoSize {
    Raw,
    Full,
    Regular,
    Small,
    Thumb,
}

impl PhotoSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoSize::Raw => "raw",
            PhotoSize::Full => "full",
            PhotoSize::Regular => "regular",
            PhotoSize::Small => "small",
            PhotoSize::Thumb => "thumb",
        }
    }
}

/// Parameters for a photo search.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    pub per_page: u32,
    pub page: u32,
    pub orientation: Option<SearchOrientation>,
    pub color: Option<ColorFilter>,
    pub order_by: Option<OrderBy>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            per_page: 10,
            page: 1,
            orientation: None,
            color: None,
            order_by: None,
        }
    }
}

/// Read-only snapshot of a photo owned by the remote service.
#[derive(Debug, Clone, Deserialize)]
pub struct Photo {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub color: Option<String>,
    pub blur_hash: Option<String>,
    pub description: Option<String>,
    pub alt_description: Option<String>,
    pub urls: PhotoUrls,
    pub links: PhotoLinks,
    pub user: PhotoUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoUrls {
    pub raw: String,
    pub full: String,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

impl PhotoUrls {
    pub fn for_size(&self, size: PhotoSize) -> &str {
        match size {
            PhotoSize::Raw => &self.raw,
            PhotoSize::Full => &self.full,
            PhotoSize::Regular => &self.regular,
            PhotoSize::Small => &self.small,
            PhotoSize::Thumb => &self.thumb,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub html: String,
    pub download: String,
    pub download_location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoUser {
    pub id: String,
    pub username: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub total: u64,
    pub total_pages: u64,
    pub results: Vec<Photo>,
}

/// A photo fully written to local storage.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub local_path: PathBuf,
    pub photo_id: String,
    pub size: PhotoSize,
}
