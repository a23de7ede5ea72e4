//! Prompt template assembly.
//!
//! All template text lives under `data/prompts/` and is compiled in with
//! `include_str!`. The enhancement logic composes style fragments around the
//! caller's base prompt; the fragments themselves are static data.

use crate::generate::{Orientation, Style};

pub const STYLE_MOBILE: &str = include_str!("../data/prompts/style_mobile.txt");
pub const STYLE_LIFESTYLE: &str = include_str!("../data/prompts/style_lifestyle.txt");
pub const STYLE_STREET: &str = include_str!("../data/prompts/style_street.txt");
pub const STYLE_PORTRAIT: &str = include_str!("../data/prompts/style_portrait.txt");
pub const STYLE_FEMININE: &str = include_str!("../data/prompts/style_feminine.txt");
pub const SUBJECT_CONSISTENCY: &str = include_str!("../data/prompts/subject_consistency.txt");
pub const AVOID: &str = include_str!("../data/prompts/avoid.txt");

pub const PRESET_OUTFIT_STREET: &str = include_str!("../data/prompts/preset_outfit_street.txt");
pub const PRESET_OUTFIT_SELFIE: &str = include_str!("../data/prompts/preset_outfit_selfie.txt");
pub const PRESET_FOOD: &str = include_str!("../data/prompts/preset_food.txt");
pub const PRESET_TRAVEL: &str = include_str!("../data/prompts/preset_travel.txt");
pub const PRESET_HOME: &str = include_str!("../data/prompts/preset_home.txt");

pub const SERIES_MODEL: &str = include_str!("../data/prompts/series_model.txt");
pub const SERIES_FOOD: &str = include_str!("../data/prompts/series_food.txt");
pub const SERIES_PRODUCT: &str = include_str!("../data/prompts/series_product.txt");
pub const SERIES_SCENE: &str = include_str!("../data/prompts/series_scene.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

fn orientation_guide(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Portrait => {
            "vertical 9:16 phone screen ratio, full body or 3/4 shot, leave headroom"
        }
        Orientation::Landscape => "horizontal 16:9, environmental wide shot, subject off-center",
        Orientation::Square => "square 1:1 crop, tight framing, subject centered",
    }
}

const PERSON_KEYWORDS: &[&str] = &[
    "girl", "woman", "model", "outfit", "ootd", "portrait", "selfie", "street", "travel",
];

/// Whether the base prompt describes a person, which pulls in the
/// subject-consistency block so faces stay stable across generations.
fn mentions_person(prompt: &str) -> bool {
    let lower = prompt.to_lowercase();
    PERSON_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Assemble the effective prompt sent to the generation endpoint.
pub fn enhance(base: &str, style: Style, orientation: Orientation) -> String {
    let guide = orientation_guide(orientation);

    match style {
        Style::Lifestyle => {
            if mentions_person(base) {
                format!(
                    "{base}\n\n{consistency}\n\nStyle requirements:\n{mobile}\n{lifestyle}\n{street}\n{feminine}\n{guide}\n\n{avoid}",
                    base = base,
                    consistency = SUBJECT_CONSISTENCY.trim_end(),
                    mobile = STYLE_MOBILE.trim_end(),
                    lifestyle = STYLE_LIFESTYLE.trim_end(),
                    street = STYLE_STREET.trim_end(),
                    feminine = STYLE_FEMININE.trim_end(),
                    guide = guide,
                    avoid = AVOID.trim_end(),
                )
            } else {
                format!(
                    "{base}\n\nStyle requirements:\n{mobile}\n{lifestyle}\n{guide}\n\n{avoid}",
                    base = base,
                    mobile = STYLE_MOBILE.trim_end(),
                    lifestyle = STYLE_LIFESTYLE.trim_end(),
                    guide = guide,
                    avoid = AVOID.trim_end(),
                )
            }
        }
        Style::Realistic => format!(
            "{base}\n\nStyle: {portrait}, {mobile}\nComposition: {guide}\n{avoid}",
            base = base,
            portrait = STYLE_PORTRAIT.trim_end(),
            mobile = STYLE_MOBILE.trim_end(),
            guide = guide,
            avoid = AVOID.trim_end(),
        ),
        Style::Artistic => format!(
            "{base}\n\nStyle: artistic street photography, creative angles, dramatic lighting, cinematic mood\n{guide}",
            base = base,
            guide = guide,
        ),
        Style::Custom => format!(
            "{base}\n{mobile}\n{guide}",
            base = base,
            mobile = STYLE_MOBILE.trim_end(),
            guide = guide,
        ),
    }
}
