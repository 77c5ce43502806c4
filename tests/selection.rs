use clipscout_lib::models::{Candidate, CandidateKind, ScoreKey};
use clipscout_lib::selection::{remove_overlapping_clips, select_clips, OverlapConfig, SelectionConfig};

const TOPICS: [&str; 12] = [
    "rent", "coffee", "salary", "taxes", "crypto", "pension", "mortgage", "groceries", "tuition",
    "insurance", "gym", "travel",
];

fn blended(scores: &[f64]) -> Vec<Candidate> {
    scores
        .iter()
        .enumerate()
        .map(|(i, score)| {
            let start = i as f64 * 40.0;
            let mut c = Candidate::new(
                format!("macro-{i}"),
                CandidateKind::Macro,
                start,
                start + 30.0,
                format!("the truth about {}", TOPICS[i % TOPICS.len()]),
            );
            c.blended_score = Some(*score);
            c
        })
        .collect()
}

#[test]
fn selected_count_stays_within_bounds() {
    let config = SelectionConfig::default();
    let pools: [&[f64]; 4] = [
        &[1.0, 2.0],
        &[9.0, 8.5, 8.0, 7.5, 7.0, 6.5, 6.0, 5.5, 5.0, 4.5],
        &[3.0; 12],
        &[9.5, 1.0, 1.0, 1.0, 1.0, 1.0],
    ];
    for pool in pools {
        let selected = select_clips(&blended(pool), ScoreKey::Blended, &config);
        assert!(selected.len() >= config.min_clips);
        assert!(selected.len() <= config.max_clips);
    }
}

#[test]
fn backfilled_clips_are_low_confidence() {
    let selected = select_clips(&blended(&[2.0, 1.0, 0.5]), ScoreKey::Blended, &SelectionConfig::default());
    assert_eq!(selected.len(), 2);
    assert!(selected.iter().all(|c| c.low_confidence));
    assert_eq!(selected[0].blended_score, Some(2.0));
}

#[test]
fn final_scores_use_the_hundred_point_floor() {
    let mut pool = blended(&[0.0, 0.0, 0.0]);
    for (c, score) in pool.iter_mut().zip([80.0, 40.0, 30.0]) {
        c.final_score = Some(score);
    }
    let selected = select_clips(&pool, ScoreKey::Final, &SelectionConfig::default());
    assert_eq!(selected[0].final_score, Some(80.0));
    assert!(!selected[0].low_confidence);
    assert!(selected[1].low_confidence);
}

#[test]
fn overlapping_or_repeated_clips_collapse() {
    let mut pool = blended(&[9.0, 8.0, 7.0]);
    // second clip overlaps the first by 20s
    pool[1].start = 10.0;
    pool[1].end = 40.0;
    // third clip repeats the first clip's words elsewhere in the video
    pool[2].text = pool[0].text.clone();

    let kept = remove_overlapping_clips(&pool, ScoreKey::Blended, &OverlapConfig::default());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, "macro-0");
}
