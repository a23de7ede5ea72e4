//! Consistent series generation: the same subject across several scenes,
//! angles, or viewpoints.
//!
//! The subject description is frozen once and prepended to every variation
//! prompt, together with a per-kind consistency constraint, so the endpoint
//! keeps faces, dishes, or products stable across the batch.

use super::client::GenerationClient;
use super::types::{GenerateOptions, GeneratedImage, Orientation, Style};
use crate::prompts;
use std::path::PathBuf;

/// What kind of subject the series holds constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Model,
    Food,
    Product,
    Scene,
}

impl SeriesKind {
    fn emphasis(&self) -> &'static str {
        match self {
            SeriesKind::Model => prompts::SERIES_MODEL,
            SeriesKind::Food => prompts::SERIES_FOOD,
            SeriesKind::Product => prompts::SERIES_PRODUCT,
            SeriesKind::Scene => prompts::SERIES_SCENE,
        }
    }
}

/// Configuration for one series run.
#[derive(Debug, Clone)]
pub struct SeriesConfig {
    pub subject_description: String,
    pub variations: Vec<String>,
    pub output_dir: PathBuf,
    pub filename_prefix: String,
    pub kind: SeriesKind,
    pub orientation: Orientation,
}

impl SeriesConfig {
    pub fn new(
        subject_description: impl Into<String>,
        variations: Vec<String>,
        kind: SeriesKind,
    ) -> Self {
        Self {
            subject_description: subject_description.into(),
            variations,
            output_dir: PathBuf::from("generated-images"),
            filename_prefix: "series".to_string(),
            kind,
            orientation: Orientation::Portrait,
        }
    }
}

/// Fixed appearance of a model, composed into one subject description.
#[derive(Debug, Clone, Default)]
pub struct ModelSpec {
    pub face: String,
    pub hair: String,
    pub body_type: Option<String>,
    pub outfit: String,
    pub makeup: Option<String>,
    pub accessories: Option<String>,
    pub overall_style: Option<String>,
}

impl ModelSpec {
    pub fn description(&self) -> String {
        let mut parts = vec![
            "The same model with fixed appearance:".to_string(),
            format!("Facial features: {}", self.face),
            format!("Hair: {}", self.hair),
        ];
        if let Some(body_type) = &self.body_type {
            parts.push(format!("Build: {}", body_type));
        }
        parts.push(format!("Outfit: {}", self.outfit));
        if let Some(makeup) = &self.makeup {
            parts.push(format!("Makeup: {}", makeup));
        }
        if let Some(accessories) = &self.accessories {
            parts.push(format!("Accessories: {}", accessories));
        }
        if let Some(style) = &self.overall_style {
            parts.push(format!("Overall style: {}", style));
        }
        parts.push(
            "IMPORTANT: keep the model's appearance and outfit identical in every image."
                .to_string(),
        );
        parts.join(" ")
    }
}

/// Fixed appearance of a dish or product.
#[derive(Debug, Clone, Default)]
pub struct ProductSpec {
    pub product: String,
    pub presentation: String,
    pub color_tone: Option<String>,
    pub background_elements: Option<String>,
}

impl ProductSpec {
    pub fn description(&self) -> String {
        let mut parts = vec![
            "The same product with fixed characteristics:".to_string(),
            format!("Subject: {}", self.product),
            format!("Presentation: {}", self.presentation),
        ];
        if let Some(tone) = &self.color_tone {
            parts.push(format!("Color tone: {}", tone));
        }
        if let Some(background) = &self.background_elements {
            parts.push(format!("Background elements: {}", background));
        }
        parts.push(
            "IMPORTANT: keep the product's appearance and presentation identical in every image."
                .to_string(),
        );
        parts.join(" ")
    }
}

impl GenerationClient {
    /// Generate one image per variation, holding the subject fixed. Each
    /// failure is logged and skipped; a partial series is a valid outcome.
    pub async fn generate_series(&self, config: &SeriesConfig) -> Vec<GeneratedImage> {
        tracing::info!(
            "Generating consistent series ({} variations) into {}",
            config.variations.len(),
            config.output_dir.display()
        );

        let mut results = Vec::new();

        for (i, variation) in config.variations.iter().enumerate() {
            tracing::info!(
                "Series image {}/{}: {}",
                i + 1,
                config.variations.len(),
                variation
            );

            let full_prompt = format!(
                "{}\n\nCurrent scene / variation: {}\n\n{}\n\nUltra realistic photography, natural color grading, lifestyle editorial mood",
                config.subject_description,
                variation,
                config.kind.emphasis().trim_end(),
            );

            let mut options = GenerateOptions::new(full_prompt);
            options.output_dir = config.output_dir.clone();
            options.filename = Some(format!("{}_{}", config.filename_prefix, i + 1));
            options.style = Style::Lifestyle;
            options.orientation = config.orientation;

            match self.generate(&options).await {
                Ok(image) => results.push(image),
                Err(e) => tracing::error!("Failed to generate series image {}: {}", i + 1, e),
            }

            if i + 1 < config.variations.len() {
                tokio::time::sleep(self.series_pacing()).await;
            }
        }

        tracing::info!(
            "Series complete: {}/{} images generated",
            results.len(),
            config.variations.len()
        );
        results
    }

    /// Model series: same model across different scenes.
    pub async fn generate_model_series(
        &self,
        spec: &ModelSpec,
        scenes: Vec<String>,
        output_dir: PathBuf,
    ) -> Vec<GeneratedImage> {
        let mut config = SeriesConfig::new(spec.description(), scenes, SeriesKind::Model);
        config.output_dir = output_dir;
        config.filename_prefix = "model_series".to_string();
        self.generate_series(&config).await
    }

    /// Food series: same dish across different angles.
    pub async fn generate_food_series(
        &self,
        spec: &ProductSpec,
        angles: Vec<String>,
        output_dir: PathBuf,
    ) -> Vec<GeneratedImage> {
        let mut config = SeriesConfig::new(spec.description(), angles, SeriesKind::Food);
        config.output_dir = output_dir;
        config.filename_prefix = "food_series".to_string();
        config.orientation = Orientation::Square;
        self.generate_series(&config).await
    }

    /// Three shots of one outfit on one model, in three street scenes.
    pub async fn outfit_triptych(
        &self,
        outfit: &str,
        output_dir: PathBuf,
    ) -> Vec<GeneratedImage> {
        let spec = ModelSpec {
            face: "the same young woman, small face, large double-lidded eyes, straight nose, heart-shaped lips".to_string(),
            hair: "soft dark brown hair, airy bangs, medium length".to_string(),
            body_type: Some("ordinary build, natural proportions".to_string()),
            outfit: outfit.to_string(),
            makeup: Some("light makeup, bright glowing skin, faint blush".to_string()),
            accessories: None,
            overall_style: Some("sweet girl-next-door, friendly warm smile".to_string()),
        };

        let scenes = vec![
            "turning back mid-walk on a city street, sweet smile".to_string(),
            "outside a coffee shop, looking down with a soft laugh, sunlight from the side".to_string(),
            "crossing at a zebra crossing with a light step, clothes moving with the stride".to_string(),
        ];

        self.generate_model_series(&spec, scenes, output_dir).await
    }

    /// Three shots of one cup of coffee from three angles.
    pub async fn coffee_triptych(
        &self,
        description: &str,
        output_dir: PathBuf,
    ) -> Vec<GeneratedImage> {
        let spec = ProductSpec {
            product: description.to_string(),
            presentation: "an ordinary coffee shop cup, nothing fancy, true to life".to_string(),
            color_tone: Some("natural warm tones, straight-off-the-phone color, no heavy grading".to_string()),
            background_elements: Some(
                "a real coffee shop table, a little cluttered; menu, napkins, or a phone may be in frame"
                    .to_string(),
            ),
        };

        let angles = vec![
            "just served, shot from a seated angle, a hand may be in frame".to_string(),
            "one sip taken and set down, a phone or book beside it, everyday feel".to_string(),
            "top-down over the whole table, the coffee central but surrounded by other objects".to_string(),
        ];

        self.generate_food_series(&spec, angles, output_dir).await
    }
}
