//! AI image generation: prompt assembly, the retry-wrapped endpoint call,
//! batches, presets, and consistent series.

pub mod client;
pub mod presets;
pub mod series;
pub mod types;

pub use client::GenerationClient;
pub use presets::{preset_prompt, Preset};
pub use series::{ModelSpec, ProductSpec, SeriesConfig, SeriesKind};
pub use types::{GenerateOptions, GeneratedImage, MediaType, Orientation, Style};
