use super::types::{
    ContentBlock, GenerateOptions, GeneratedImage, MediaType, Message, MessagesRequest,
    MessagesResponse,
};
use crate::config::GeneratorConfig;
use crate::download::write_atomic;
use crate::http::RequestExecutor;
use crate::retry::{RetryPolicy, RetrySchedule, DEFAULT_BASE_DELAY};
use crate::{prompts, Error, Result};
use base64::Engine as _;
use std::time::Duration;

const GENERATION_TIMEOUT: Duration = Duration::from_secs(180);
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;
const BATCH_PACING: Duration = Duration::from_secs(2);
const SERIES_PACING: Duration = Duration::from_secs(3);

/// Client for the image generation endpoint.
pub struct GenerationClient {
    http: RequestExecutor,
    config: GeneratorConfig,
    retry_base: Duration,
    pacing: Duration,
    series_pacing: Duration,
}

impl GenerationClient {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::new_with_client(config, reqwest::Client::new())
    }

    pub fn new_with_client(config: GeneratorConfig, client: reqwest::Client) -> Self {
        Self {
            http: RequestExecutor::new_with_client(client),
            config,
            retry_base: DEFAULT_BASE_DELAY,
            pacing: BATCH_PACING,
            series_pacing: SERIES_PACING,
        }
    }

    #[cfg(test)]
    pub fn with_retry_base(mut self, retry_base: Duration) -> Self {
        self.retry_base = retry_base;
        self
    }

    #[cfg(test)]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self.series_pacing = pacing;
        self
    }

    pub(crate) fn series_pacing(&self) -> Duration {
        self.series_pacing
    }

    /// Generate a single image, retrying failed attempts with linear backoff,
    /// and persist it under the configured output directory.
    pub async fn generate(&self, options: &GenerateOptions) -> Result<GeneratedImage> {
        let enhanced_prompt =
            prompts::enhance(&options.prompt, options.style, options.orientation);

        tracing::info!(
            "Generating image (prompt: {:.80}...)",
            options.prompt.replace('\n', " ")
        );

        let request = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: enhanced_prompt.clone(),
            }],
        };

        let policy = RetryPolicy::new(options.max_attempts).with_base_delay(self.retry_base);
        let mut schedule = RetrySchedule::new(policy);

        while let Some(attempt) = schedule.next_attempt() {
            if let Some(delay) = attempt.delay {
                tracing::info!(
                    "Retrying attempt {}/{} after {:?}",
                    attempt.number,
                    policy.max_attempts(),
                    delay
                );
                tokio::time::sleep(delay).await;
            }

            match self.attempt_generation(&request).await {
                Ok((bytes, media_type)) => {
                    schedule.record_success();
                    return self.persist(bytes, media_type, options, enhanced_prompt);
                }
                Err(e) => {
                    tracing::warn!("Attempt {} failed: {}", attempt.number, e);
                    schedule.record_failure(e);
                }
            }
        }

        Err(schedule.into_last_error())
    }

    /// Generate one image per prompt, sequentially, with pacing between
    /// items. Failures are logged and skipped; successes come back in the
    /// original prompt order.
    pub async fn generate_batch(
        &self,
        prompts: &[String],
        base: &GenerateOptions,
    ) -> Vec<GeneratedImage> {
        let mut results = Vec::new();

        for (i, prompt) in prompts.iter().enumerate() {
            tracing::info!("Generating image {}/{}", i + 1, prompts.len());

            let mut options = base.clone();
            options.prompt = prompt.clone();
            options.filename = base
                .filename
                .as_ref()
                .map(|name| format!("{}_{}", name, i + 1));

            match self.generate(&options).await {
                Ok(image) => results.push(image),
                Err(e) => tracing::error!("Failed to generate image {}: {}", i + 1, e),
            }

            if i + 1 < prompts.len() {
                tokio::time::sleep(self.pacing).await;
            }
        }

        results
    }

    /// One request/response cycle. Succeeds only when the response carries an
    /// image block with decodable, non-empty base64 data.
    async fn attempt_generation(
        &self,
        request: &MessagesRequest,
    ) -> Result<(Vec<u8>, MediaType)> {
        let body = self
            .http
            .post_json(
                &self.config.api_url,
                &[
                    ("x-api-key", self.config.api_key.as_str()),
                    ("anthropic-version", API_VERSION),
                ],
                request,
                Some(GENERATION_TIMEOUT),
            )
            .await?;

        let response: MessagesResponse = serde_json::from_str(&body)
            .map_err(|e| Error::MalformedResponse(format!("Unexpected response shape: {}", e)))?;

        let source = response
            .content
            .iter()
            .find_map(|block| match block {
                ContentBlock::Image { source } if !source.data.is_empty() => Some(source),
                _ => None,
            })
            .ok_or_else(|| {
                Error::MalformedResponse("No image data in response".to_string())
            })?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&source.data)
            .map_err(|e| Error::MalformedResponse(format!("Invalid base64 image data: {}", e)))?;

        Ok((bytes, MediaType::from_mime(&source.media_type)))
    }

    fn persist(
        &self,
        bytes: Vec<u8>,
        media_type: MediaType,
        options: &GenerateOptions,
        enhanced_prompt: String,
    ) -> Result<GeneratedImage> {
        std::fs::create_dir_all(&options.output_dir)?;

        let name = options
            .filename
            .clone()
            .unwrap_or_else(|| format!("gen_{}", chrono::Utc::now().timestamp_millis()));
        let file_path = options
            .output_dir
            .join(format!("{}.{}", name, media_type.extension()));

        write_atomic(&file_path, &bytes)?;

        tracing::info!(
            "Saved image: {} ({:.1} KB)",
            file_path.display(),
            bytes.len() as f64 / 1024.0
        );

        Ok(GeneratedImage {
            file_path,
            size: bytes.len() as u64,
            media_type,
            prompt: options.prompt.clone(),
            enhanced_prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> GeneratorConfig {
        GeneratorConfig {
            api_url: format!("{}/v1/messages", server.uri()),
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
        }
    }

    fn make_client(server: &MockServer) -> GenerationClient {
        GenerationClient::new(test_config(server)).with_retry_base(Duration::from_millis(1))
    }

    fn image_response(data: &str, media_type: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [
                {"type": "image", "source": {"data": data, "media_type": media_type}}
            ]
        }))
    }

    fn options_in(dir: &std::path::Path) -> GenerateOptions {
        let mut options = GenerateOptions::new("a quiet harbor at dawn");
        options.output_dir = dir.to_path_buf();
        options
    }

    #[tokio::test]
    async fn test_generate_writes_png_with_declared_media_type() {
        let server = MockServer::start().await;
        let png = vec![0x89, 0x50, 0x4E, 0x47];
        let b64 = base64::engine::general_purpose::STANDARD.encode(&png);

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .respond_with(image_response(&b64, "image/png"))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = make_client(&server);
        let image = client.generate(&options_in(dir.path())).await.unwrap();

        assert_eq!(image.size, 4);
        assert_eq!(image.media_type, MediaType::Png);
        assert_eq!(image.file_path.extension().unwrap(), "png");
        assert_eq!(std::fs::read(&image.file_path).unwrap(), png);
    }

    #[tokio::test]
    async fn test_generate_defaults_to_jpg_extension() {
        let server = MockServer::start().await;
        let b64 = base64::engine::general_purpose::STANDARD.encode([0xFF, 0xD8]);

        Mock::given(method("POST"))
            .respond_with(image_response(&b64, "image/webp"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = make_client(&server);
        let image = client.generate(&options_in(dir.path())).await.unwrap();
        assert_eq!(image.file_path.extension().unwrap(), "jpg");
    }

    #[tokio::test]
    async fn test_generate_retries_twice_then_succeeds() {
        let server = MockServer::start().await;
        let b64 = base64::engine::general_purpose::STANDARD.encode([1, 2, 3]);

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(image_response(&b64, "image/png"))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = make_client(&server);
        let image = client.generate(&options_in(dir.path())).await.unwrap();

        assert!(image.size > 0);
        assert!(image.file_path.exists());
    }

    #[tokio::test]
    async fn test_permanent_failure_is_retried_exactly_max_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
            .expect(3)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = make_client(&server);
        let err = client.generate(&options_in(dir.path())).await.unwrap_err();
        assert!(matches!(err, Error::Transport { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_missing_image_block_surfaces_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "sorry, no image"}]
            })))
            .expect(3)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = make_client(&server);
        let err = client.generate(&options_in(dir.path())).await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_empty_payload_counts_as_failed_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(image_response("", "image/png"))
            .expect(3)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = make_client(&server);
        let err = client.generate(&options_in(dir.path())).await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_batch_skips_failing_items_and_keeps_order() {
        let server = MockServer::start().await;
        let b64 = base64::engine::general_purpose::STANDARD.encode([9]);

        // First prompt fails all three attempts, the rest succeed.
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(3)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(image_response(&b64, "image/png"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = make_client(&server).with_pacing(Duration::from_millis(1));

        let mut base = options_in(dir.path());
        base.filename = Some("batch".to_string());
        let prompts = vec![
            "first".to_string(),
            "second".to_string(),
            "third".to_string(),
        ];
        let results = client.generate_batch(&prompts, &base).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].prompt, "second");
        assert_eq!(results[1].prompt, "third");
        assert!(results[0]
            .file_path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("batch_2"));
    }
}
