//! In-memory repository implementation for tests and examples.
//!
//! Rows live in `Vec`s behind `std::sync::RwLock` and are returned in
//! insertion order, which makes tie-break expectations in tests exact.
//! `replace_skills` builds the replacement row set before touching the
//! stored one, so a failure (including an injected one) always leaves the
//! prior set intact — the same contract the SQLite transaction provides.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::models::{ArticleSummary, CandidateSkillRow, OpenProject, SkillRow, UserDetails};

use super::{
    ArticleRepository, ProjectRepository, RepoResult, RepositoryError, SkillRepository,
};

struct StoredUser {
    id: String,
    details: UserDetails,
}

struct StoredSkill {
    user_id: String,
    skill: String,
    direction: String,
}

struct StoredProject {
    project: OpenProject,
    status: String,
}

/// In-memory network of users, skills, projects, and articles.
#[derive(Default)]
pub struct InMemoryNetwork {
    users: RwLock<Vec<StoredUser>>,
    skills: RwLock<Vec<StoredSkill>>,
    projects: RwLock<Vec<StoredProject>>,
    articles: RwLock<Vec<ArticleSummary>>,
    fail_next_replace: AtomicBool,
    candidate_fetches: AtomicUsize,
    project_fetches: AtomicUsize,
    article_fetches: AtomicUsize,
}

impl InMemoryNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, id: &str, details: UserDetails) {
        self.users.write().unwrap().push(StoredUser {
            id: id.to_string(),
            details,
        });
    }

    /// Append a declaration row verbatim, bypassing normalization. Lets
    /// tests stage pre-existing (possibly messy) stored state.
    pub fn add_skill_row(&self, user_id: &str, skill: &str, direction: &str) {
        self.skills.write().unwrap().push(StoredSkill {
            user_id: user_id.to_string(),
            skill: skill.to_string(),
            direction: direction.to_string(),
        });
    }

    pub fn add_project(&self, project: OpenProject, status: &str) {
        self.projects.write().unwrap().push(StoredProject {
            project,
            status: status.to_string(),
        });
    }

    pub fn add_article(&self, article: ArticleSummary) {
        self.articles.write().unwrap().push(article);
    }

    /// Make the next `replace_skills` call fail before mutating anything.
    pub fn fail_next_replace(&self) {
        self.fail_next_replace.store(true, Ordering::SeqCst);
    }

    pub fn candidate_fetch_count(&self) -> usize {
        self.candidate_fetches.load(Ordering::SeqCst)
    }

    pub fn project_fetch_count(&self) -> usize {
        self.project_fetches.load(Ordering::SeqCst)
    }

    pub fn article_fetch_count(&self) -> usize {
        self.article_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SkillRepository for InMemoryNetwork {
    async fn list_skills(&self, user_id: &str) -> RepoResult<Vec<SkillRow>> {
        let skills = self.skills.read().unwrap();
        Ok(skills
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| SkillRow {
                skill: s.skill.clone(),
                direction: s.direction.clone(),
            })
            .collect())
    }

    async fn replace_skills(
        &self,
        user_id: &str,
        teach: &[String],
        learn: &[String],
    ) -> RepoResult<()> {
        if self.fail_next_replace.swap(false, Ordering::SeqCst) {
            return Err(RepositoryError::message(
                "replace_skills",
                "injected mid-replace failure",
            ));
        }

        let mut skills = self.skills.write().unwrap();
        let mut next: Vec<StoredSkill> = skills
            .drain(..)
            .filter(|s| s.user_id != user_id)
            .collect();
        for skill in teach {
            next.push(StoredSkill {
                user_id: user_id.to_string(),
                skill: skill.clone(),
                direction: "TEACH".to_string(),
            });
        }
        for skill in learn {
            next.push(StoredSkill {
                user_id: user_id.to_string(),
                skill: skill.clone(),
                direction: "LEARN".to_string(),
            });
        }
        *skills = next;
        Ok(())
    }

    async fn list_all_others_with_skills(
        &self,
        exclude_user_id: &str,
    ) -> RepoResult<Vec<CandidateSkillRow>> {
        self.candidate_fetches.fetch_add(1, Ordering::SeqCst);
        let users = self.users.read().unwrap();
        let skills = self.skills.read().unwrap();
        Ok(skills
            .iter()
            .filter(|s| s.user_id != exclude_user_id)
            .filter_map(|s| {
                let user = users.iter().find(|u| u.id == s.user_id)?;
                Some(CandidateSkillRow {
                    user_id: user.id.clone(),
                    full_name: user.details.full_name.clone(),
                    username: user.details.username.clone(),
                    avatar_url: user.details.avatar_url.clone(),
                    bio: user.details.bio.clone(),
                    skill: s.skill.clone(),
                    direction: s.direction.clone(),
                })
            })
            .collect())
    }

    async fn fetch_user(&self, user_id: &str) -> RepoResult<Option<UserDetails>> {
        let users = self.users.read().unwrap();
        Ok(users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.details.clone()))
    }
}

#[async_trait]
impl ProjectRepository for InMemoryNetwork {
    async fn list_open_projects(&self) -> RepoResult<Vec<OpenProject>> {
        self.project_fetches.fetch_add(1, Ordering::SeqCst);
        let projects = self.projects.read().unwrap();
        Ok(projects
            .iter()
            .filter(|p| p.status == "open")
            .map(|p| p.project.clone())
            .collect())
    }
}

#[async_trait]
impl ArticleRepository for InMemoryNetwork {
    async fn list_all_with_author(&self) -> RepoResult<Vec<ArticleSummary>> {
        self.article_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.articles.read().unwrap().clone())
    }
}
