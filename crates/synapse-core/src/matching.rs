//! Reciprocal skill matching.
//!
//! A candidate C is scored against the querying user Q by bidirectional
//! overlap: what C can teach that Q wants to learn, and what C wants to
//! learn that Q can teach. Two scoring scales exist and are kept separate
//! on purpose — [`standard_match_score`] drives the matches listing, while
//! the explore feed's people branch uses [`amplified_match_score`]. They
//! score the same overlap but were never unified upstream, and results
//! built on one scale must not silently shift to the other.

use crate::models::{CandidateSkillRow, MatchCandidate};
use crate::profile::{build_profiles, UserSkillProfile};
use crate::rank::rank_descending;

pub const BADGE_PERFECT_MATCH: &str = "Perfect Match";
pub const BADGE_MENTOR: &str = "Mentor";
pub const BADGE_STUDENT: &str = "Student";

/// Bidirectional skill overlap between a candidate and the querying user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    /// Candidate's teach set ∩ query's learn set.
    pub teach: Vec<String>,
    /// Candidate's learn set ∩ query's teach set.
    pub learn: Vec<String>,
}

impl Overlap {
    pub fn is_empty(&self) -> bool {
        self.teach.is_empty() && self.learn.is_empty()
    }
}

/// Compute the overlap of candidate `c` relative to query profile `q`.
pub fn overlap(q: &UserSkillProfile, c: &UserSkillProfile) -> Overlap {
    Overlap {
        teach: c.teach.intersection(&q.learn).cloned().collect(),
        learn: c.learn.intersection(&q.teach).cloned().collect(),
    }
}

/// The matches-listing scale. Returns the score and the earned badge.
///
/// | overlap | score | badge |
/// |---|---|---|
/// | both directions | `50 + 5*(t+l)` | Perfect Match |
/// | teach only | `20 + 3*t` | Mentor |
/// | learn only | `10 + 2*l` | Student |
/// | neither | `0` | — |
pub fn standard_match_score(ov: &Overlap) -> (i64, Option<&'static str>) {
    let t = ov.teach.len() as i64;
    let l = ov.learn.len() as i64;
    match (t > 0, l > 0) {
        (true, true) => (50 + 5 * (t + l), Some(BADGE_PERFECT_MATCH)),
        (true, false) => (20 + 3 * t, Some(BADGE_MENTOR)),
        (false, true) => (10 + 2 * l, Some(BADGE_STUDENT)),
        (false, false) => (0, None),
    }
}

/// The explore-feed people scale: same overlap, amplified weights.
///
/// Reciprocal overlap scores `100 + 10*(t+l)`; a one-sided overlap scores
/// `50 + 5*count`; no overlap scores `0`.
pub fn amplified_match_score(ov: &Overlap) -> i64 {
    let t = ov.teach.len() as i64;
    let l = ov.learn.len() as i64;
    match (t > 0, l > 0) {
        (true, true) => 100 + 10 * (t + l),
        (true, false) => 50 + 5 * t,
        (false, true) => 50 + 5 * l,
        (false, false) => 0,
    }
}

/// Human-readable reasons for a given overlap, one line per direction.
pub fn overlap_reasons(ov: &Overlap) -> Vec<String> {
    let mut reasons = Vec::new();
    if !ov.teach.is_empty() {
        reasons.push(format!("Can teach you: {}", ov.teach.join(", ")));
    }
    if !ov.learn.is_empty() {
        reasons.push(format!("Wants to learn from you: {}", ov.learn.join(", ")));
    }
    reasons
}

/// Score every candidate against the query profile on the standard scale.
///
/// The querying user is excluded from the candidate set, zero-overlap
/// candidates are dropped, and the result is stable-sorted descending by
/// score (ties keep the order candidates first appeared in `rows`).
pub fn compute_matches(q: &UserSkillProfile, rows: &[CandidateSkillRow]) -> Vec<MatchCandidate> {
    let profiles = build_profiles(rows);

    // Display fields repeat on every flat row; first row per user wins.
    let mut display_by_user: std::collections::HashMap<&str, &CandidateSkillRow> =
        std::collections::HashMap::new();
    for r in rows {
        display_by_user.entry(r.user_id.as_str()).or_insert(r);
    }

    let mut candidates = Vec::new();
    for profile in profiles.iter() {
        if profile.user_id == q.user_id {
            continue;
        }
        let ov = overlap(q, profile);
        let (score, badge) = standard_match_score(&ov);
        if score <= 0 {
            continue;
        }
        let display = match display_by_user.get(profile.user_id.as_str()) {
            Some(d) => *d,
            None => continue,
        };
        candidates.push(MatchCandidate {
            user_id: profile.user_id.clone(),
            full_name: display.full_name.clone(),
            username: display.username.clone(),
            avatar_url: display.avatar_url.clone(),
            bio: display.bio.clone(),
            teach_overlap: ov.teach.clone(),
            learn_overlap: ov.learn.clone(),
            score,
            badges: badge.into_iter().map(str::to_string).collect(),
            reasons: overlap_reasons(&ov),
        });
    }

    rank_descending(candidates, |c| c.score)
}
