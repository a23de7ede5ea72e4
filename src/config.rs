//! Configuration loaded from the process environment.
//!
//! Endpoints, credentials, and model identifiers are read once and passed
//! explicitly into client constructors, so tests can inject their own values.

use crate::{Error, Result};

const DEFAULT_GENERATION_URL: &str = "https://api.duojie.games/v1/messages";
const DEFAULT_GENERATION_MODEL: &str = "gemini-3-pro-image-preview";
const DEFAULT_UNSPLASH_API_BASE: &str = "https://api.unsplash.com";

/// Configuration for the image generation endpoint.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl GeneratorConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_url: std::env::var("IMAGEGEN_API_URL")
                .unwrap_or_else(|_| DEFAULT_GENERATION_URL.to_string()),
            api_key: std::env::var("IMAGEGEN_API_KEY")
                .map_err(|_| Error::MissingCredential("IMAGEGEN_API_KEY not set".to_string()))?,
            model: std::env::var("IMAGEGEN_MODEL")
                .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string()),
        })
    }
}

/// Configuration for the Unsplash API.
#[derive(Debug, Clone)]
pub struct UnsplashConfig {
    pub api_base: String,
    pub access_key: String,
}

impl UnsplashConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_base: std::env::var("UNSPLASH_API_BASE")
                .unwrap_or_else(|_| DEFAULT_UNSPLASH_API_BASE.to_string()),
            access_key: std::env::var("UNSPLASH_ACCESS_KEY").map_err(|_| {
                Error::MissingCredential(
                    "UNSPLASH_ACCESS_KEY not set. Get one at https://unsplash.com/developers"
                        .to_string(),
                )
            })?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_config_is_constructible() {
        let config = GeneratorConfig {
            api_url: "http://localhost:9999/v1/messages".to_string(),
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
        };
        assert_eq!(config.model, "test-model");
    }

    #[test]
    fn test_unsplash_config_is_constructible() {
        let config = UnsplashConfig {
            api_base: "http://localhost:9999".to_string(),
            access_key: "test-key".to_string(),
        };
        assert!(config.api_base.starts_with("http://"));
    }
}
