use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VariantType {
    Curiosity,
    Contrarian,
    Relatable,
}

impl VariantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantType::Curiosity => "Curiosity",
            VariantType::Contrarian => "Contrarian",
            VariantType::Relatable => "Relatable",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CtaType {
    Comment,
    Tag,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    pub variant_type: VariantType,
    pub headline_text: String,
    pub overlay_line: String,
    pub cta_text: String,
    pub cta_type: CtaType,
}

/// Subtitle styling every exported clip must follow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SubtitleSpec {
    pub font_size_min: u32,
    pub font_size_max: u32,
    pub font_style: String,
    pub font_color: String,
    pub outline_size: u32,
    pub outline_color: String,
    pub max_lines: u32,
    pub max_chars_per_line: u32,
    pub pause_break_threshold: f64,
}

impl Default for SubtitleSpec {
    fn default() -> Self {
        Self {
            font_size_min: 70,
            font_size_max: 90,
            font_style: "bold".into(),
            font_color: "white".into(),
            outline_size: 8,
            outline_color: "black".into(),
            max_lines: 3,
            max_chars_per_line: 32,
            pause_break_threshold: 0.4,
        }
    }
}

/// Presentation metadata attached by the packager. `variants[0]` is the
/// primary variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Packaging {
    pub variants: Vec<Variant>,
    pub primary: VariantType,
    pub subtitle_spec: SubtitleSpec,
    pub cta_frame_duration: f64,
}
