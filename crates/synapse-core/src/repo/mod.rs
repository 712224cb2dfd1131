//! Repository contracts consumed by the engine.
//!
//! The engine is a pure computation over whatever these traits return; it
//! performs no retries and caches nothing between calls. Implementations
//! must be `Send + Sync` to work with async runtimes. The crate ships an
//! in-memory implementation ([`memory::InMemoryNetwork`]) used by tests;
//! the application crate provides the SQLite-backed one.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ArticleSummary, CandidateSkillRow, OpenProject, SkillRow, UserDetails};

/// A failed repository operation.
///
/// All fetch and mutation failures surface as this one type; the enclosing
/// `compute_*` call aborts with no partial result.
#[derive(Debug, Error)]
#[error("repository operation '{op}' failed")]
pub struct RepositoryError {
    op: &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl RepositoryError {
    pub fn wrap(
        op: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            op,
            source: source.into(),
        }
    }

    /// Build from a plain message, for injected or synthetic failures.
    pub fn message(op: &'static str, msg: impl Into<String>) -> Self {
        Self {
            op,
            source: msg.into().into(),
        }
    }

    pub fn op(&self) -> &'static str {
        self.op
    }
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by the engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("user not found: {0}")]
    UnknownUser(String),
    #[error("computation cancelled")]
    Cancelled,
}

/// Access to skill declarations and user display fields.
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// All declaration rows for one user.
    async fn list_skills(&self, user_id: &str) -> RepoResult<Vec<SkillRow>>;

    /// Atomically replace the user's full declaration set.
    ///
    /// Delete-then-insert inside a single transaction: a failure on any
    /// path must leave the prior set fully intact. Values are stored as
    /// given; the engine normalizes before calling.
    async fn replace_skills(
        &self,
        user_id: &str,
        teach: &[String],
        learn: &[String],
    ) -> RepoResult<()>;

    /// Flat (user, declaration) rows for every user except the excluded
    /// one. Users with no declarations do not appear.
    async fn list_all_others_with_skills(
        &self,
        exclude_user_id: &str,
    ) -> RepoResult<Vec<CandidateSkillRow>>;

    /// Display fields for one user, or `None` if the user does not exist.
    async fn fetch_user(&self, user_id: &str) -> RepoResult<Option<UserDetails>>;
}

/// Access to open collaboration posts.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Only projects with `status == open` are returned.
    async fn list_open_projects(&self) -> RepoResult<Vec<OpenProject>>;
}

/// Access to published articles.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn list_all_with_author(&self) -> RepoResult<Vec<ArticleSummary>>;
}

// Delegating impls so one shared backend (e.g. an `Arc<InMemoryNetwork>`)
// can fill all three repository slots of the engine.

#[async_trait]
impl<T: SkillRepository + ?Sized> SkillRepository for std::sync::Arc<T> {
    async fn list_skills(&self, user_id: &str) -> RepoResult<Vec<SkillRow>> {
        (**self).list_skills(user_id).await
    }

    async fn replace_skills(
        &self,
        user_id: &str,
        teach: &[String],
        learn: &[String],
    ) -> RepoResult<()> {
        (**self).replace_skills(user_id, teach, learn).await
    }

    async fn list_all_others_with_skills(
        &self,
        exclude_user_id: &str,
    ) -> RepoResult<Vec<CandidateSkillRow>> {
        (**self).list_all_others_with_skills(exclude_user_id).await
    }

    async fn fetch_user(&self, user_id: &str) -> RepoResult<Option<UserDetails>> {
        (**self).fetch_user(user_id).await
    }
}

#[async_trait]
impl<T: ProjectRepository + ?Sized> ProjectRepository for std::sync::Arc<T> {
    async fn list_open_projects(&self) -> RepoResult<Vec<OpenProject>> {
        (**self).list_open_projects().await
    }
}

#[async_trait]
impl<T: ArticleRepository + ?Sized> ArticleRepository for std::sync::Arc<T> {
    async fn list_all_with_author(&self) -> RepoResult<Vec<ArticleSummary>> {
        (**self).list_all_with_author().await
    }
}
