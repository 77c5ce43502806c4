use clipscout_lib::models::{ComponentScores, Platform};
use clipscout_lib::scoring::{
    compute_final_score, compute_platform_score, extract_score, CalibrationConfig,
    PlatformScoringConfig,
};
use serde_json::json;

fn sample() -> ComponentScores {
    ComponentScores {
        hook_score: 8.0,
        retention_score: 7.0,
        emotion_score: 7.0,
        completion_score: 7.0,
        relatability_score: 6.0,
        platform_fit_score: 6.0,
        ..ComponentScores::default()
    }
}

#[test]
fn shorter_clip_outscores_long_clip() {
    let config = CalibrationConfig::default();
    let short = compute_final_score(&sample(), 30.0, &config);
    let long = compute_final_score(&sample(), 90.0, &config);
    assert!(short <= 100);
    assert!(short > long);
}

#[test]
fn identical_inputs_give_identical_scores() {
    let config = CalibrationConfig::default();
    let first = compute_final_score(&sample(), 42.5, &config);
    for _ in 0..10 {
        assert_eq!(compute_final_score(&sample(), 42.5, &config), first);
    }
}

#[test]
fn out_of_range_components_clamp() {
    let data = json!({"hook_score": 15, "emotion_score": -3, "retention_score": "7.5"});
    assert_eq!(extract_score(&data, "hook_score", 0.0), 10.0);
    assert_eq!(extract_score(&json!({"hook_score": 10}), "hook_score", 0.0), 10.0);
    assert_eq!(extract_score(&data, "emotion_score", 5.0), 0.0);
    assert_eq!(extract_score(&data, "retention_score", 0.0), 7.5);
    assert_eq!(extract_score(&data, "completion_score", 4.0), 4.0);
}

#[test]
fn weak_hook_is_capped_whatever_else_scores() {
    let config = CalibrationConfig::default();
    for hook in [0.0, 1.5, 3.9] {
        let scores = ComponentScores {
            hook_score: hook,
            ..ComponentScores::uniform(10.0)
        };
        assert!(compute_final_score(&scores, 20.0, &config) <= 45);
    }
}

#[test]
fn raising_one_component_never_lowers_the_score() {
    let config = CalibrationConfig::default();
    let base = ComponentScores::uniform(6.0);
    let before = compute_final_score(&base, 30.0, &config);
    let raised = [
        ComponentScores { retention_score: 9.0, ..base },
        ComponentScores { completion_score: 9.0, ..base },
        ComponentScores { relatability_score: 9.0, ..base },
        ComponentScores { platform_fit_score: 9.0, ..base },
    ];
    for scores in raised {
        assert!(compute_final_score(&scores, 30.0, &config) >= before);
    }
}

#[test]
fn controversy_boost_follows_platform() {
    let config = PlatformScoringConfig::default();
    let scores = ComponentScores {
        controversy_score: Some(10.0),
        novelty_score: Some(0.0),
        ..ComponentScores::uniform(5.0)
    };
    let tiktok = compute_platform_score(&scores, Platform::Tiktok, &config);
    let reels = compute_platform_score(&scores, Platform::Reels, &config);
    let shorts = compute_platform_score(&scores, Platform::Shorts, &config);
    assert!(tiktok > reels && reels > shorts);
}
