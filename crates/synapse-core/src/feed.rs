//! Explore feed composition.
//!
//! Three independently scored branches — people, open collaboration posts,
//! and articles — are built from the querying user's profile and merged
//! into one ranked list. Each branch keeps its own scoring formula; the
//! merge enqueues people, then projects, then articles, and relies on the
//! stable ranking in [`crate::rank`] for the tie-break.

use serde_json::json;

use crate::matching::{amplified_match_score, overlap, overlap_reasons};
use crate::models::{ArticleSummary, CandidateSkillRow, FeedItem, FeedKind, OpenProject};
use crate::normalize::matches_declared;
use crate::profile::{build_profiles, UserSkillProfile};
use crate::rank::rank_descending;

pub const SUBTITLE_PROJECT: &str = "Project Opportunity";

/// Compose the full explore feed for query profile `q`.
///
/// Callers are expected to have applied the empty-profile fast exit before
/// fetching any of the three inputs; given the inputs, this is a pure
/// function.
pub fn compose_feed(
    q: &UserSkillProfile,
    candidates: &[CandidateSkillRow],
    projects: &[OpenProject],
    articles: &[ArticleSummary],
) -> Vec<FeedItem> {
    let mut items = people_items(q, candidates);
    items.extend(project_items(q, projects));
    items.extend(article_items(q, articles));
    rank_descending(items, |item| item.score)
}

/// People branch: the same overlap computation as the matches listing, on
/// the amplified scale.
fn people_items(q: &UserSkillProfile, rows: &[CandidateSkillRow]) -> Vec<FeedItem> {
    let profiles = build_profiles(rows);

    let mut display_by_user: std::collections::HashMap<&str, &CandidateSkillRow> =
        std::collections::HashMap::new();
    for r in rows {
        display_by_user.entry(r.user_id.as_str()).or_insert(r);
    }

    let mut items = Vec::new();
    for profile in profiles.iter() {
        if profile.user_id == q.user_id {
            continue;
        }
        let ov = overlap(q, profile);
        let score = amplified_match_score(&ov);
        if score <= 0 {
            continue;
        }
        let display = match display_by_user.get(profile.user_id.as_str()) {
            Some(d) => *d,
            None => continue,
        };
        items.push(FeedItem {
            id: profile.user_id.clone(),
            kind: FeedKind::User,
            title: display.full_name.clone(),
            subtitle: Some(format!("@{}", display.username)),
            image_url: display.avatar_url.clone(),
            description: display.bio.clone(),
            score,
            reasons: overlap_reasons(&ov),
            details: json!({
                "teach_overlap": ov.teach,
                "learn_overlap": ov.learn,
            }),
        });
    }
    items
}

/// Project branch: open posts whose needed skills intersect what the user
/// can teach.
///
/// `skills_needed` entries are stored verbatim, never normalized; the
/// comparison is case-insensitive at read time by design — do not swap in
/// the write-time normalizer here.
fn project_items(q: &UserSkillProfile, projects: &[OpenProject]) -> Vec<FeedItem> {
    let mut items = Vec::new();
    for project in projects {
        let matched: Vec<String> = project
            .skills_needed
            .iter()
            .filter(|entry| matches_declared(entry, &q.teach))
            .cloned()
            .collect();
        if matched.is_empty() {
            continue;
        }
        let score = 70 + 10 * matched.len() as i64;
        items.push(FeedItem {
            id: project.id.clone(),
            kind: FeedKind::Project,
            title: project.title.clone(),
            subtitle: Some(SUBTITLE_PROJECT.to_string()),
            image_url: None,
            description: Some(project.description.clone()),
            score,
            reasons: vec![format!("Needs your skills: {}", matched.join(", "))],
            details: json!({
                "skills_needed": project.skills_needed,
                "matched": matched,
            }),
        });
    }
    items
}

/// Article branch: articles whose tags intersect what the user wants to
/// learn. Tags carry the same verbatim-storage, case-insensitive-read
/// semantics as project skills.
fn article_items(q: &UserSkillProfile, articles: &[ArticleSummary]) -> Vec<FeedItem> {
    let mut items = Vec::new();
    for article in articles {
        let matched: Vec<String> = article
            .tags
            .iter()
            .filter(|tag| matches_declared(tag, &q.learn))
            .cloned()
            .collect();
        if matched.is_empty() {
            continue;
        }
        let score = 30 + 5 * matched.len() as i64;
        items.push(FeedItem {
            id: article.id.clone(),
            kind: FeedKind::Article,
            title: article.title.clone(),
            subtitle: article.author_name.clone(),
            image_url: article.featured_image.clone(),
            description: Some(article.excerpt.clone()),
            score,
            reasons: vec![format!("Covers what you're learning: {}", matched.join(", "))],
            details: json!({
                "tags": article.tags,
                "matched": matched,
            }),
        });
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillRow;
    use crate::profile::profile_from_rows;

    fn profile(user_id: &str, teach: &[&str], learn: &[&str]) -> UserSkillProfile {
        let mut rows = Vec::new();
        for s in teach {
            rows.push(SkillRow {
                skill: s.to_string(),
                direction: "TEACH".to_string(),
            });
        }
        for s in learn {
            rows.push(SkillRow {
                skill: s.to_string(),
                direction: "LEARN".to_string(),
            });
        }
        profile_from_rows(user_id, &rows)
    }

    fn candidate(user_id: &str, skill: &str, direction: &str) -> CandidateSkillRow {
        CandidateSkillRow {
            user_id: user_id.to_string(),
            full_name: format!("User {}", user_id.to_uppercase()),
            username: user_id.to_string(),
            avatar_url: None,
            bio: Some(format!("{} bio", user_id)),
            skill: skill.to_string(),
            direction: direction.to_string(),
        }
    }

    fn project(id: &str, skills_needed: &[&str]) -> OpenProject {
        OpenProject {
            id: id.to_string(),
            title: format!("Project {}", id),
            description: "desc".to_string(),
            skills_needed: skills_needed.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn article(id: &str, tags: &[&str]) -> ArticleSummary {
        ArticleSummary {
            id: id.to_string(),
            title: format!("Article {}", id),
            excerpt: "excerpt".to_string(),
            featured_image: None,
            author_name: Some("Author".to_string()),
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_people_use_amplified_scale() {
        let q = profile("a", &["python"], &["react"]);
        let rows = vec![
            candidate("b", "react", "TEACH"),
            candidate("b", "python", "LEARN"),
        ];
        let feed = compose_feed(&q, &rows, &[], &[]);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].kind, FeedKind::User);
        assert_eq!(feed[0].score, 120);
        assert_eq!(feed[0].subtitle.as_deref(), Some("@b"));
    }

    #[test]
    fn test_project_overlap_case_insensitive() {
        let q = profile("a", &["python"], &[]);
        let projects = vec![project("p1", &["Python", "Go"]), project("p2", &["Go"])];
        let feed = compose_feed(&q, &[], &projects, &[]);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, "p1");
        assert_eq!(feed[0].score, 80);
        assert_eq!(feed[0].subtitle.as_deref(), Some(SUBTITLE_PROJECT));
        assert_eq!(feed[0].details["matched"][0], "Python");
    }

    #[test]
    fn test_project_entries_are_not_trimmed() {
        // Verbatim storage: a padded entry never matches a declared skill.
        let q = profile("a", &["python"], &[]);
        let projects = vec![project("p1", &[" Python "])];
        let feed = compose_feed(&q, &[], &projects, &[]);
        assert!(feed.is_empty());
    }

    #[test]
    fn test_article_overlap_against_learn_set() {
        let q = profile("a", &[], &["react"]);
        let articles = vec![article("a1", &["React", "testing"]), article("a2", &["go"])];
        let feed = compose_feed(&q, &[], &[], &articles);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, "a1");
        assert_eq!(feed[0].score, 35);
        assert_eq!(feed[0].kind, FeedKind::Article);
    }

    #[test]
    fn test_article_matches_learn_not_teach() {
        let q = profile("a", &["react"], &[]);
        let articles = vec![article("a1", &["React"])];
        let feed = compose_feed(&q, &[], &[], &articles);
        assert!(feed.is_empty());
    }

    #[test]
    fn test_merge_sorted_descending_across_kinds() {
        let q = profile("a", &["python"], &["react"]);
        let rows = vec![
            candidate("b", "react", "TEACH"),
            candidate("b", "python", "LEARN"),
        ];
        let projects = vec![project("p1", &["python"])];
        let articles = vec![article("a1", &["react"])];
        let feed = compose_feed(&q, &rows, &projects, &articles);

        let scores: Vec<i64> = feed.iter().map(|i| i.score).collect();
        assert_eq!(scores, vec![120, 80, 35]);
        let kinds: Vec<FeedKind> = feed.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![FeedKind::User, FeedKind::Project, FeedKind::Article]
        );
    }

    #[test]
    fn test_equal_scores_keep_enqueue_order() {
        // A mentor-only person scores 55; no project/article formula can
        // collide with it, so build the tie inside one branch instead.
        let q = profile("a", &["python"], &[]);
        let projects = vec![project("p1", &["python"]), project("p2", &["Python"])];
        let feed = compose_feed(&q, &[], &projects, &[]);
        let ids: Vec<&str> = feed.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }
}
