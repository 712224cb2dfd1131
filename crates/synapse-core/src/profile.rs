//! Per-user skill profile aggregation.
//!
//! Flat skill-declaration rows are grouped into derived teach/learn sets,
//! one [`UserSkillProfile`] per user. Profiles are rebuilt from repository
//! rows on every request; nothing here is cached or persisted.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use crate::models::{CandidateSkillRow, SkillDirection, SkillRow};

/// Derived teach/learn sets for one user.
///
/// Ordered sets so overlap listings come out in a reproducible order.
#[derive(Debug, Clone)]
pub struct UserSkillProfile {
    pub user_id: String,
    pub teach: BTreeSet<String>,
    pub learn: BTreeSet<String>,
}

impl UserSkillProfile {
    pub fn empty(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            teach: BTreeSet::new(),
            learn: BTreeSet::new(),
        }
    }

    /// True when the user has declared nothing in either direction.
    pub fn is_empty(&self) -> bool {
        self.teach.is_empty() && self.learn.is_empty()
    }

    fn add(&mut self, skill: &str, direction: &str) {
        // Rows with an unrecognized direction are skipped, not rejected.
        match SkillDirection::parse(direction) {
            Some(SkillDirection::Teach) => {
                self.teach.insert(skill.to_string());
            }
            Some(SkillDirection::Learn) => {
                self.learn.insert(skill.to_string());
            }
            None => {}
        }
    }
}

/// A set of profiles preserving first-seen user order.
///
/// Downstream ranking breaks score ties by production order, so the order
/// candidates were first encountered in the row stream must survive
/// aggregation.
#[derive(Debug, Default)]
pub struct ProfileSet {
    order: Vec<String>,
    by_user: HashMap<String, UserSkillProfile>,
}

impl ProfileSet {
    pub fn get(&self, user_id: &str) -> Option<&UserSkillProfile> {
        self.by_user.get(user_id)
    }

    /// Iterate profiles in the order their users first appeared.
    pub fn iter(&self) -> impl Iterator<Item = &UserSkillProfile> {
        self.order.iter().filter_map(|id| self.by_user.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn entry(&mut self, user_id: &str) -> &mut UserSkillProfile {
        match self.by_user.entry(user_id.to_string()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(v) => {
                self.order.push(user_id.to_string());
                v.insert(UserSkillProfile::empty(user_id))
            }
        }
    }
}

/// Group flat candidate rows into per-user profiles.
pub fn build_profiles(rows: &[CandidateSkillRow]) -> ProfileSet {
    let mut set = ProfileSet::default();
    for row in rows {
        set.entry(&row.user_id).add(&row.skill, &row.direction);
    }
    set
}

/// Build a single user's profile from their own declaration rows.
pub fn profile_from_rows(user_id: &str, rows: &[SkillRow]) -> UserSkillProfile {
    let mut profile = UserSkillProfile::empty(user_id);
    for row in rows {
        profile.add(&row.skill, &row.direction);
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate_row(user_id: &str, skill: &str, direction: &str) -> CandidateSkillRow {
        CandidateSkillRow {
            user_id: user_id.to_string(),
            full_name: user_id.to_uppercase(),
            username: user_id.to_string(),
            avatar_url: None,
            bio: None,
            skill: skill.to_string(),
            direction: direction.to_string(),
        }
    }

    #[test]
    fn test_groups_rows_by_user() {
        let rows = vec![
            candidate_row("a", "python", "TEACH"),
            candidate_row("b", "react", "TEACH"),
            candidate_row("a", "react", "LEARN"),
        ];
        let set = build_profiles(&rows);
        assert_eq!(set.len(), 2);

        let a = set.get("a").unwrap();
        assert!(a.teach.contains("python"));
        assert!(a.learn.contains("react"));

        let b = set.get("b").unwrap();
        assert!(b.teach.contains("react"));
        assert!(b.learn.is_empty());
    }

    #[test]
    fn test_unrecognized_direction_ignored() {
        let rows = vec![
            candidate_row("a", "python", "TEACH"),
            candidate_row("a", "go", "MENTOR"),
            candidate_row("a", "rust", ""),
        ];
        let set = build_profiles(&rows);
        let a = set.get("a").unwrap();
        assert_eq!(a.teach.len(), 1);
        assert!(a.learn.is_empty());
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let rows = vec![
            candidate_row("c", "go", "TEACH"),
            candidate_row("a", "python", "TEACH"),
            candidate_row("c", "sql", "LEARN"),
            candidate_row("b", "react", "TEACH"),
        ];
        let set = build_profiles(&rows);
        let order: Vec<&str> = set.iter().map(|p| p.user_id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_profile_from_rows_deduplicates() {
        let rows = vec![
            SkillRow {
                skill: "python".to_string(),
                direction: "TEACH".to_string(),
            },
            SkillRow {
                skill: "python".to_string(),
                direction: "TEACH".to_string(),
            },
        ];
        let profile = profile_from_rows("a", &rows);
        assert_eq!(profile.teach.len(), 1);
    }

    #[test]
    fn test_empty_profile_is_empty() {
        let profile = profile_from_rows("a", &[]);
        assert!(profile.is_empty());
    }
}
