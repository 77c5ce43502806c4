//! Narrative-pattern assembly of possibly non-adjacent sentences.

const ENABLE_LOGS: bool = true;

use std::collections::HashSet;

use crate::models::{Candidate, CandidateKind, NarrativePattern, ReconstructionMeta, ScoredUnit};
use crate::utils::text::round_to;
use crate::{log_info, log_warn};

fn role_hook(unit: &ScoredUnit) -> f64 {
    let s = &unit.scores;
    s.hook_score * 0.5 + s.emotional_charge * 0.3 + s.energy_score * 0.2
}

fn role_context(unit: &ScoredUnit) -> f64 {
    let s = &unit.scores;
    s.claim_strength * 0.4 + s.identity_trigger * 0.3 + s.emotional_charge * 0.3
}

fn role_punchline(unit: &ScoredUnit) -> f64 {
    let s = &unit.scores;
    s.delivery_intensity * 0.4 + s.claim_strength * 0.3 + s.hook_score * 0.3
}

fn claim(unit: &ScoredUnit) -> f64 {
    unit.scores.claim_strength
}

/// The `k` best units for a role; ties keep transcript order.
fn top_k(units: &[ScoredUnit], role: fn(&ScoredUnit) -> f64, k: usize) -> Vec<&ScoredUnit> {
    let mut ranked: Vec<&ScoredUnit> = units.iter().collect();
    ranked.sort_by(|a, b| role(b).total_cmp(&role(a)));
    ranked.truncate(k);
    ranked
}

fn index_key(indices: &[usize]) -> Vec<usize> {
    let mut key = indices.to_vec();
    key.sort_unstable();
    key
}

/// Build a clip from units picked for their roles.
///
/// Text always reads forward in transcript order. A non-contiguous clip
/// plays only its own sentences, so its duration is the sum of their
/// durations rather than the first-to-last span.
fn make_candidate(pattern: NarrativePattern, parts: &[&ScoredUnit], pattern_score: f64) -> Candidate {
    let mut ordered = parts.to_vec();
    ordered.sort_by_key(|u| u.index());

    let text = ordered
        .iter()
        .map(|u| u.unit.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let start = ordered.iter().map(|u| u.unit.start).fold(f64::INFINITY, f64::min);
    let end = ordered.iter().map(|u| u.unit.end).fold(f64::NEG_INFINITY, f64::max);
    let indices: Vec<usize> = ordered.iter().map(|u| u.index()).collect();
    let is_contiguous = indices.windows(2).all(|pair| pair[1] == pair[0] + 1);

    let duration = if is_contiguous {
        end - start
    } else {
        ordered.iter().map(|u| u.unit.duration()).sum()
    };

    let mut candidate = Candidate::new("", CandidateKind::Reconstructed, start, end, text);
    candidate.duration = round_to(duration, 3);
    candidate.unit_indices = indices;
    candidate.reconstruction = Some(ReconstructionMeta {
        pattern,
        pattern_score: round_to(pattern_score, 3),
        is_contiguous,
        hook_score_first: None,
        impact_score_last: None,
        coherence: None,
        constraint_score: None,
    });
    candidate
}

/// Enumerate every (first, second, third) role combination of three
/// distinct units, skipping index sets already produced by this pattern.
fn assemble(
    pattern: NarrativePattern,
    roles: [Vec<&ScoredUnit>; 3],
    score: impl Fn(&ScoredUnit, &ScoredUnit, &ScoredUnit) -> f64,
) -> Vec<Candidate> {
    let [firsts, seconds, thirds] = roles;
    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    let mut candidates = Vec::new();

    for &a in &firsts {
        for &b in &seconds {
            for &c in &thirds {
                let key = index_key(&[a.index(), b.index(), c.index()]);
                if key.windows(2).any(|pair| pair[0] == pair[1]) || !seen.insert(key) {
                    continue;
                }
                candidates.push(make_candidate(pattern, &[a, b, c], score(a, b, c)));
            }
        }
    }
    candidates
}

fn hook_context_punchline(units: &[ScoredUnit], k: usize) -> Vec<Candidate> {
    assemble(
        NarrativePattern::HookContextPunchline,
        [
            top_k(units, role_hook, k),
            top_k(units, role_context, k),
            top_k(units, role_punchline, k),
        ],
        |h, c, p| role_hook(h) * 0.4 + role_context(c) * 0.3 + role_punchline(p) * 0.3,
    )
}

fn claim_data_stronger(units: &[ScoredUnit], k: usize) -> Vec<Candidate> {
    let strongest = top_k(units, claim, k);
    assemble(
        NarrativePattern::ClaimDataStronger,
        [strongest.clone(), top_k(units, role_context, k), strongest],
        |s1, d, s2| claim(s1) * 0.35 + claim(d) * 0.25 + claim(s2) * 0.40,
    )
}

fn punchline_explanation_reinforcement(units: &[ScoredUnit], k: usize) -> Vec<Candidate> {
    assemble(
        NarrativePattern::PunchlineExplanationReinforcement,
        [
            top_k(units, role_punchline, k),
            top_k(units, role_context, k),
            top_k(units, role_hook, k),
        ],
        |p, e, r| role_punchline(p) * 0.45 + role_context(e) * 0.25 + role_hook(r) * 0.30,
    )
}

/// Generate reordered candidates from all three narrative patterns.
///
/// Each pattern considers the top `k` units per role. Assemblies that use
/// the same set of units are kept once, whichever pattern produced them
/// first. Output is sorted by pattern score and numbered `recon-N`.
pub fn generate_candidates(units: &[ScoredUnit], k: usize) -> Vec<Candidate> {
    if units.is_empty() {
        log_warn!("generate_candidates: no scored units");
        return Vec::new();
    }

    let mut all = hook_context_punchline(units, k);
    all.extend(claim_data_stronger(units, k));
    all.extend(punchline_explanation_reinforcement(units, k));
    let total = all.len();

    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    let mut unique: Vec<Candidate> = all
        .into_iter()
        .filter(|c| seen.insert(index_key(&c.unit_indices)))
        .collect();
    unique.sort_by(|a, b| pattern_score(b).total_cmp(&pattern_score(a)));
    for (i, candidate) in unique.iter_mut().enumerate() {
        candidate.id = format!("recon-{}", i + 1);
    }

    log_info!(
        "generate_candidates: {} unique of {} assembled (k={})",
        unique.len(),
        total,
        k
    );
    unique
}

fn pattern_score(candidate: &Candidate) -> f64 {
    candidate
        .reconstruction
        .map(|meta| meta.pattern_score)
        .unwrap_or(0.0)
}
