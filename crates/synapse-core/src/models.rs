//! Core data models used throughout Synapse.
//!
//! These types represent the skill declarations flowing in from the
//! repositories and the transient, per-request match and feed records
//! flowing out to the caller. Nothing here is persisted except
//! [`SkillRow`]-shaped declarations; everything else is recomputed from a
//! fresh snapshot on every request.

use serde::Serialize;

/// Direction of a skill declaration: something the user can teach, or
/// something the user wants to learn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillDirection {
    Teach,
    Learn,
}

impl SkillDirection {
    /// Parse a stored direction string, case-insensitively.
    ///
    /// Returns `None` for unrecognized values; callers treat those rows as
    /// a data-integrity condition and skip them rather than failing the
    /// request.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("teach") {
            Some(Self::Teach)
        } else if raw.eq_ignore_ascii_case("learn") {
            Some(Self::Learn)
        } else {
            None
        }
    }

    /// Canonical stored form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teach => "TEACH",
            Self::Learn => "LEARN",
        }
    }
}

/// One skill declaration row for a single user, as returned by
/// [`SkillRepository::list_skills`](crate::repo::SkillRepository::list_skills).
///
/// `direction` is kept as the raw stored string so that aggregation can
/// apply the skip-unrecognized policy in one place.
#[derive(Debug, Clone)]
pub struct SkillRow {
    pub skill: String,
    pub direction: String,
}

/// A flat (user, skill declaration) row for the comparison set: one row per
/// declaration, with the user's display fields repeated on each row.
#[derive(Debug, Clone)]
pub struct CandidateSkillRow {
    pub user_id: String,
    pub full_name: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub skill: String,
    pub direction: String,
}

/// Display fields for a single user.
#[derive(Debug, Clone)]
pub struct UserDetails {
    pub full_name: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

/// An open collaboration post, eligible for the explore feed.
#[derive(Debug, Clone)]
pub struct OpenProject {
    pub id: String,
    pub title: String,
    pub description: String,
    pub skills_needed: Vec<String>,
}

/// An article summary with its author's display name resolved.
#[derive(Debug, Clone)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub author_name: Option<String>,
    pub tags: Vec<String>,
}

/// The querying user's own profile view.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub bio: Option<String>,
    pub teach: Vec<String>,
    pub learn: Vec<String>,
}

/// A scored match candidate, relative to one querying user.
#[derive(Debug, Clone, Serialize)]
pub struct MatchCandidate {
    pub user_id: String,
    pub full_name: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    /// Skills the candidate can teach that the querying user wants to learn.
    pub teach_overlap: Vec<String>,
    /// Skills the candidate wants to learn that the querying user can teach.
    pub learn_overlap: Vec<String>,
    pub score: i64,
    pub badges: Vec<String>,
    pub reasons: Vec<String>,
}

/// The kind of entry appearing in the explore feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    User,
    Project,
    Article,
}

impl FeedKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Project => "project",
            Self::Article => "article",
        }
    }
}

/// One scored entry in the explore feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedItem {
    pub id: String,
    pub kind: FeedKind,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub score: i64,
    pub reasons: Vec<String>,
    /// Kind-specific payload (overlap sets, tags, needed skills).
    pub details: serde_json::Value,
}
