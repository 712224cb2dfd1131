//! SQLite-backed repository implementations.
//!
//! Maps each repository contract from `synapse-core` to SQL against the
//! schema in [`crate::migrate`]. One [`SqliteStore`] value fills all three
//! repository slots of the engine; it is `Clone` because the underlying
//! pool is.
//!
//! `replace_skills` runs its delete-and-insert inside a single transaction.
//! The transaction is only committed after every insert succeeds, so any
//! failure path rolls back to the prior declaration set.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use synapse_core::models::{
    ArticleSummary, CandidateSkillRow, OpenProject, SkillRow, UserDetails,
};
use synapse_core::repo::{
    ArticleRepository, ProjectRepository, RepoResult, RepositoryError, SkillRepository,
};

/// SQLite implementation of the Synapse repository contracts.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Look up a user id by username.
    pub async fn find_user_id(&self, username: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("id")))
    }

    /// Create a user row if the username is new, otherwise update the
    /// display fields. Returns the user id either way.
    pub async fn upsert_user(
        &self,
        username: &str,
        full_name: &str,
        avatar_url: Option<&str>,
        bio: Option<&str>,
    ) -> Result<String> {
        if let Some(id) = self.find_user_id(username).await? {
            sqlx::query("UPDATE users SET full_name = ?, avatar_url = ?, bio = ? WHERE id = ?")
                .bind(full_name)
                .bind(avatar_url)
                .bind(bio)
                .bind(&id)
                .execute(&self.pool)
                .await?;
            return Ok(id);
        }

        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().timestamp();
        sqlx::query(
            "INSERT INTO users (id, username, full_name, avatar_url, bio, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(username)
        .bind(full_name)
        .bind(avatar_url)
        .bind(bio)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn insert_project(
        &self,
        owner_id: Option<&str>,
        title: &str,
        description: &str,
        status: &str,
        skills_needed: &[String],
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().timestamp();
        sqlx::query(
            "INSERT INTO projects (id, owner_id, title, description, status, skills_needed, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(status)
        .bind(serde_json::to_string(skills_needed)?)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn insert_article(
        &self,
        author_id: Option<&str>,
        title: &str,
        excerpt: &str,
        featured_image: Option<&str>,
        tags: &[String],
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().timestamp();
        sqlx::query(
            "INSERT INTO articles (id, author_id, title, excerpt, featured_image, tags, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(author_id)
        .bind(title)
        .bind(excerpt)
        .bind(featured_image)
        .bind(serde_json::to_string(tags)?)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn list_skills_inner(&self, user_id: &str) -> Result<Vec<SkillRow>> {
        let rows = sqlx::query(
            "SELECT skill, direction FROM skills WHERE user_id = ? ORDER BY rowid ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| SkillRow {
                skill: row.get("skill"),
                direction: row.get("direction"),
            })
            .collect())
    }

    async fn replace_skills_inner(
        &self,
        user_id: &str,
        teach: &[String],
        learn: &[String],
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM skills WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for (skills, direction) in [(teach, "TEACH"), (learn, "LEARN")] {
            for skill in skills {
                sqlx::query(
                    "INSERT INTO skills (id, user_id, skill, direction, created_at) VALUES (?, ?, ?, ?, ?)",
                )
                .bind(Uuid::new_v4().to_string())
                .bind(user_id)
                .bind(skill)
                .bind(direction)
                .bind(now)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        debug!(
            user = user_id,
            teach = teach.len(),
            learn = learn.len(),
            "replaced skill declarations"
        );
        Ok(())
    }

    async fn list_all_others_inner(&self, exclude: &str) -> Result<Vec<CandidateSkillRow>> {
        let rows = sqlx::query(
            r#"
            SELECT s.user_id, u.full_name, u.username, u.avatar_url, u.bio,
                   s.skill, s.direction
            FROM skills s
            JOIN users u ON u.id = s.user_id
            WHERE s.user_id != ?
            ORDER BY s.rowid ASC
            "#,
        )
        .bind(exclude)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| CandidateSkillRow {
                user_id: row.get("user_id"),
                full_name: row.get("full_name"),
                username: row.get("username"),
                avatar_url: row.get("avatar_url"),
                bio: row.get("bio"),
                skill: row.get("skill"),
                direction: row.get("direction"),
            })
            .collect())
    }

    async fn fetch_user_inner(&self, user_id: &str) -> Result<Option<UserDetails>> {
        let row = sqlx::query("SELECT full_name, username, avatar_url, bio FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| UserDetails {
            full_name: r.get("full_name"),
            username: r.get("username"),
            avatar_url: r.get("avatar_url"),
            bio: r.get("bio"),
        }))
    }

    async fn list_open_projects_inner(&self) -> Result<Vec<OpenProject>> {
        let rows = sqlx::query(
            "SELECT id, title, description, skills_needed FROM projects WHERE status = 'open' ORDER BY rowid ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let skills_json: String = row.get("skills_needed");
                OpenProject {
                    id: row.get("id"),
                    title: row.get("title"),
                    description: row.get("description"),
                    skills_needed: serde_json::from_str(&skills_json).unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn list_articles_inner(&self) -> Result<Vec<ArticleSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT a.id, a.title, a.excerpt, a.featured_image, a.tags,
                   u.full_name AS author_name
            FROM articles a
            LEFT JOIN users u ON u.id = a.author_id
            ORDER BY a.rowid ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let tags_json: String = row.get("tags");
                ArticleSummary {
                    id: row.get("id"),
                    title: row.get("title"),
                    excerpt: row.get("excerpt"),
                    featured_image: row.get("featured_image"),
                    author_name: row.get("author_name"),
                    tags: serde_json::from_str(&tags_json).unwrap_or_default(),
                }
            })
            .collect())
    }
}

#[async_trait]
impl SkillRepository for SqliteStore {
    async fn list_skills(&self, user_id: &str) -> RepoResult<Vec<SkillRow>> {
        self.list_skills_inner(user_id)
            .await
            .map_err(|e| RepositoryError::wrap("list_skills", e))
    }

    async fn replace_skills(
        &self,
        user_id: &str,
        teach: &[String],
        learn: &[String],
    ) -> RepoResult<()> {
        self.replace_skills_inner(user_id, teach, learn)
            .await
            .map_err(|e| RepositoryError::wrap("replace_skills", e))
    }

    async fn list_all_others_with_skills(
        &self,
        exclude_user_id: &str,
    ) -> RepoResult<Vec<CandidateSkillRow>> {
        self.list_all_others_inner(exclude_user_id)
            .await
            .map_err(|e| RepositoryError::wrap("list_all_others_with_skills", e))
    }

    async fn fetch_user(&self, user_id: &str) -> RepoResult<Option<UserDetails>> {
        self.fetch_user_inner(user_id)
            .await
            .map_err(|e| RepositoryError::wrap("fetch_user", e))
    }
}

#[async_trait]
impl ProjectRepository for SqliteStore {
    async fn list_open_projects(&self) -> RepoResult<Vec<OpenProject>> {
        self.list_open_projects_inner()
            .await
            .map_err(|e| RepositoryError::wrap("list_open_projects", e))
    }
}

#[async_trait]
impl ArticleRepository for SqliteStore {
    async fn list_all_with_author(&self) -> RepoResult<Vec<ArticleSummary>> {
        self.list_articles_inner()
            .await
            .map_err(|e| RepositoryError::wrap("list_all_with_author", e))
    }
}
