const ENABLE_LOGS: bool = true;

use crate::log_info;
use crate::models::{Candidate, CtaType, Packaging, Variant, VariantType};
use crate::packaging::config::PackagingConfig;
use crate::utils::text::split_sentences;

/// Words dropped when a headline is cut from the clip's own opening.
const HEADLINE_FILLER: [&str; 12] = [
    "um", "uh", "so", "like", "well", "and", "but", "hey", "ok", "okay", "a", "the",
];

const COMMENT_CTAS: [&str; 3] = [
    "Agree or disagree? Comment YES or NO.",
    "Comment your biggest mistake below.",
    "Drop your answer in the comments.",
];
const TAG_CTAS: [&str; 2] = [
    "Tag someone who needs to see this.",
    "Tag a friend who does this.",
];

impl CtaType {
    fn library(&self) -> &'static [&'static str] {
        match self {
            CtaType::Comment => &COMMENT_CTAS,
            CtaType::Tag => &TAG_CTAS,
        }
    }
}

impl VariantType {
    pub fn overlay_line(&self) -> &'static str {
        match self {
            VariantType::Curiosity => "What they don't tell you",
            VariantType::Contrarian => "The myth nobody talks about",
            VariantType::Relatable => "If you've ever failed at this…",
        }
    }

    fn cta_type(&self) -> CtaType {
        match self {
            VariantType::Relatable => CtaType::Tag,
            VariantType::Curiosity | VariantType::Contrarian => CtaType::Comment,
        }
    }
}

/// The polarising comment prompt for controversial clips, otherwise the
/// last entry of the type's library.
pub fn select_cta(cta_type: CtaType, controversy: f64, config: &PackagingConfig) -> &'static str {
    let library = cta_type.library();
    if cta_type == CtaType::Comment && controversy > config.contrarian_threshold {
        return library[0];
    }
    library[library.len() - 1]
}

/// Headline overlay text.
///
/// A judge title of at most `max_title_words` words is used as is.
/// Otherwise the first `headline_words` non-filler words of the hook text
/// are used, turned into a question when `curiosity` is high.
pub fn derive_headline(
    suggested_title: Option<&str>,
    hook_text: &str,
    curiosity: f64,
    config: &PackagingConfig,
) -> String {
    if let Some(title) = suggested_title.map(str::trim).filter(|t| !t.is_empty()) {
        if title.split_whitespace().count() <= config.max_title_words {
            return title.to_string();
        }
    }

    let mut headline = hook_text
        .split_whitespace()
        .filter(|w| !HEADLINE_FILLER.contains(&w.to_lowercase().as_str()))
        .take(config.headline_words)
        .collect::<Vec<_>>()
        .join(" ");
    if !headline.is_empty() && curiosity > config.question_threshold && !headline.ends_with('?') {
        headline.push('?');
    }
    headline
}

fn primary_variant(controversy: f64, emotion: f64, relatability: f64, config: &PackagingConfig) -> VariantType {
    if controversy > config.contrarian_threshold {
        VariantType::Contrarian
    } else if emotion > config.relatable_emotion_threshold
        && relatability > config.relatable_relatability_threshold
    {
        VariantType::Relatable
    } else {
        VariantType::Curiosity
    }
}

/// Attach the three presentation variants, subtitle rules and CTA frame.
///
/// Clips without component scores package as neutral (all signals 0),
/// which makes Curiosity primary.
pub fn package_clip(candidate: &Candidate, config: &PackagingConfig) -> Candidate {
    let scores = candidate.scores.unwrap_or_default();
    let controversy = scores.controversy();
    let opening = split_sentences(&candidate.text)
        .into_iter()
        .next()
        .unwrap_or_default();
    let title = candidate
        .judge_notes
        .as_ref()
        .and_then(|notes| notes.suggested_title.as_deref());
    let headline = derive_headline(title, &opening, scores.novelty(), config);

    let primary = primary_variant(
        controversy,
        scores.emotion_score,
        scores.relatability_score,
        config,
    );
    let mut variants: Vec<Variant> = [
        VariantType::Curiosity,
        VariantType::Contrarian,
        VariantType::Relatable,
    ]
    .into_iter()
    .map(|variant_type| {
        let cta_type = variant_type.cta_type();
        Variant {
            variant_type,
            headline_text: headline.clone(),
            overlay_line: variant_type.overlay_line().to_string(),
            cta_text: select_cta(cta_type, controversy, config).to_string(),
            cta_type,
        }
    })
    .collect();
    variants.sort_by_key(|v| v.variant_type != primary);

    let mut packaged = candidate.clone();
    packaged.packaging = Some(Packaging {
        variants,
        primary,
        subtitle_spec: config.subtitle.clone(),
        cta_frame_duration: config.cta_frame_duration,
    });

    log_info!(
        "package_clip: {} primary={} headline={:?}",
        candidate.id,
        primary.as_str(),
        headline
    );
    packaged
}

pub fn package_clips(candidates: &[Candidate], config: &PackagingConfig) -> Vec<Candidate> {
    candidates.iter().map(|c| package_clip(c, config)).collect()
}
