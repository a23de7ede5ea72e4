use super::types::{
    DownloadedFile, Photo, PhotoSize, SearchOrientation, SearchQuery, SearchResult,
};
use crate::config::UnsplashConfig;
use crate::download::FileDownloader;
use crate::http::RequestExecutor;
use crate::{Error, Result};
use reqwest::Url;
use std::path::Path;
use std::time::Duration;

const ACCEPT_VERSION: (&str, &str) = ("Accept-Version", "v1");
const MAX_PER_PAGE: u32 = 30;
const BATCH_PACING: Duration = Duration::from_secs(2);

/// Client for the Unsplash search, random-photo, and download APIs.
pub struct UnsplashClient {
    http: RequestExecutor,
    downloader: FileDownloader,
    config: UnsplashConfig,
    pacing: Duration,
}

impl UnsplashClient {
    pub fn new(config: UnsplashConfig) -> Self {
        Self {
            http: RequestExecutor::new(),
            downloader: FileDownloader::new(),
            config,
            pacing: BATCH_PACING,
        }
    }

    #[cfg(test)]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// The access key is a hard precondition; checked before any request so a
    /// misconfigured process fails without touching the network.
    fn auth_header(&self) -> Result<String> {
        if self.config.access_key.is_empty() {
            return Err(Error::MissingCredential(
                "UNSPLASH_ACCESS_KEY is empty. Get one at https://unsplash.com/developers"
                    .to_string(),
            ));
        }
        Ok(format!("Client-ID {}", self.config.access_key))
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{}", self.config.api_base, path))
            .map_err(|e| Error::Generic(format!("Invalid API URL: {}", e)))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        let auth = self.auth_header()?;
        let body = self
            .http
            .get_text(url.as_str(), &[("Authorization", auth.as_str()), ACCEPT_VERSION])
            .await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::MalformedResponse(format!("Unexpected Unsplash response: {}", e)))
    }

    /// Search photos by keyword.
    pub async fn search_photos(&self, query: &SearchQuery) -> Result<SearchResult> {
        let mut url = self.endpoint("/search/photos")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", &query.query);
            pairs.append_pair(
                "per_page",
                &query.per_page.clamp(1, MAX_PER_PAGE).to_string(),
            );
            pairs.append_pair("page", &query.page.max(1).to_string());
            if let Some(orientation) = query.orientation {
                pairs.append_pair("orientation", orientation.as_str());
            }
            if let Some(color) = query.color {
                pairs.append_pair("color", color.as_str());
            }
            if let Some(order_by) = query.order_by {
                pairs.append_pair("order_by", order_by.as_str());
            }
        }

        self.get_json(url).await
    }

    /// Fetch random photos. `count` is always sent (clamped to 30), so the
    /// response is uniformly a JSON array.
    pub async fn random_photos(
        &self,
        query: Option<&str>,
        orientation: Option<SearchOrientation>,
        count: u32,
    ) -> Result<Vec<Photo>> {
        let mut url = self.endpoint("/photos/random")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(query) = query {
                pairs.append_pair("query", query);
            }
            if let Some(orientation) = orientation {
                pairs.append_pair("orientation", orientation.as_str());
            }
            pairs.append_pair("count", &count.clamp(1, MAX_PER_PAGE).to_string());
        }

        self.get_json(url).await
    }

    /// Fire the download-accounting call the API guidelines require before a
    /// binary fetch. Callers treat failures as non-fatal.
    pub async fn track_download(&self, photo: &Photo) -> Result<()> {
        let auth = self.auth_header()?;
        self.http
            .get_text(
                &photo.links.download_location,
                &[("Authorization", auth.as_str()), ACCEPT_VERSION],
            )
            .await?;
        Ok(())
    }

    /// Download one photo into `dest_dir` as `unsplash_<id>_<size>.jpg`.
    ///
    /// An existing destination file short-circuits everything, including the
    /// accounting call: presence is treated as cached.
    pub async fn download_photo(
        &self,
        photo: &Photo,
        dest_dir: &Path,
        size: PhotoSize,
    ) -> Result<DownloadedFile> {
        std::fs::create_dir_all(dest_dir)?;

        let filename = format!("unsplash_{}_{}.jpg", photo.id, size.as_str());
        let dest = dest_dir.join(filename);

        if dest.exists() {
            tracing::info!("Photo already downloaded: {}", dest.display());
            return Ok(DownloadedFile {
                local_path: dest,
                photo_id: photo.id.clone(),
                size,
            });
        }

        if let Err(e) = self.track_download(photo).await {
            tracing::warn!("Download accounting call failed for {}: {}", photo.id, e);
        }

        let url = photo.urls.for_size(size);
        tracing::info!("Downloading {} ({})", photo.id, url);
        let local_path = self.downloader.download(url, &dest).await?;

        Ok(DownloadedFile {
            local_path,
            photo_id: photo.id.clone(),
            size,
        })
    }

    /// Search, then download the first `count` hits sequentially. Individual
    /// download failures are logged and excluded; the batch never aborts.
    pub async fn search_and_download(
        &self,
        query: &str,
        dest_dir: &Path,
        count: u32,
        orientation: Option<SearchOrientation>,
        size: PhotoSize,
    ) -> Result<Vec<DownloadedFile>> {
        let mut search = SearchQuery::new(query);
        search.per_page = count.clamp(1, MAX_PER_PAGE);
        search.orientation = orientation;

        let result = self.search_photos(&search).await?;
        if result.results.is_empty() {
            tracing::warn!("No photos found for \"{}\"", query);
            return Ok(Vec::new());
        }

        let photos: Vec<_> = result.results.into_iter().take(count as usize).collect();
        let mut downloaded = Vec::new();

        for (i, photo) in photos.iter().enumerate() {
            match self.download_photo(photo, dest_dir, size).await {
                Ok(file) => downloaded.push(file),
                Err(e) => tracing::error!("Failed to download photo {}: {}", photo.id, e),
            }

            if i + 1 < photos.len() {
                tokio::time::sleep(self.pacing).await;
            }
        }

        Ok(downloaded)
    }

    /// Fetch one random photo and download it.
    pub async fn download_random_photo(
        &self,
        dest_dir: &Path,
        query: Option<&str>,
        orientation: Option<SearchOrientation>,
        size: PhotoSize,
    ) -> Result<DownloadedFile> {
        let photos = self.random_photos(query, orientation, 1).await?;
        let photo = photos.first().ok_or_else(|| {
            Error::MalformedResponse("Random photo response was empty".to_string())
        })?;

        self.download_photo(photo, dest_dir, size).await
    }
}
