//! Preset prompt builders for common shot types.

use super::client::GenerationClient;
use super::types::{GenerateOptions, GeneratedImage, Orientation, Style};
use crate::{prompts, Result};
use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Outfit,
    Food,
    Travel,
    Home,
}

const SELFIE_KEYWORDS: &[&str] = &["selfie", "mirror"];

fn is_selfie(description: &str) -> bool {
    let lower = description.to_lowercase();
    SELFIE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Expand a bare description into the preset's full prompt, and pick the
/// orientation that suits the shot type.
pub fn preset_prompt(preset: Preset, description: &str) -> (String, Orientation) {
    let vars = [("description", description)];
    match preset {
        Preset::Outfit => {
            let template = if is_selfie(description) {
                prompts::PRESET_OUTFIT_SELFIE
            } else {
                prompts::PRESET_OUTFIT_STREET
            };
            (prompts::render(template, &vars), Orientation::Portrait)
        }
        Preset::Food => (
            prompts::render(prompts::PRESET_FOOD, &vars),
            Orientation::Square,
        ),
        Preset::Travel => (
            prompts::render(prompts::PRESET_TRAVEL, &vars),
            Orientation::Portrait,
        ),
        Preset::Home => (
            prompts::render(prompts::PRESET_HOME, &vars),
            Orientation::Portrait,
        ),
    }
}

impl GenerationClient {
    /// Generate one image from a preset prompt.
    pub async fn generate_preset(
        &self,
        preset: Preset,
        description: &str,
        output_dir: PathBuf,
    ) -> Result<GeneratedImage> {
        let (prompt, orientation) = preset_prompt(preset, description);

        let mut options = GenerateOptions::new(prompt);
        options.output_dir = output_dir;
        options.style = Style::Lifestyle;
        options.orientation = orientation;

        self.generate(&options).await
    }
}
