//! The engine surface: profile, matches, and explore-feed computation.
//!
//! Every operation is a pure function over a freshly fetched snapshot —
//! no cross-request cache, no shared mutable state. The explore feed's
//! three source fetches have no ordering dependency and run concurrently;
//! failure is all-or-nothing, and a cancellation signal from the caller
//! stops the computation before composition begins.

use std::collections::HashSet;

use futures::future::{self, Either};
use futures::pin_mut;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::feed::compose_feed;
use crate::matching::compute_matches;
use crate::models::{FeedItem, MatchCandidate, ProfileView};
use crate::normalize::normalize_skill;
use crate::profile::profile_from_rows;
use crate::repo::{
    ArticleRepository, EngineError, ProjectRepository, SkillRepository,
};

/// The matching and discovery engine over three repository backends.
pub struct SynapseEngine<S, P, A> {
    skills: S,
    projects: P,
    articles: A,
}

impl<S, P, A> SynapseEngine<S, P, A>
where
    S: SkillRepository,
    P: ProjectRepository,
    A: ArticleRepository,
{
    pub fn new(skills: S, projects: P, articles: A) -> Self {
        Self {
            skills,
            projects,
            articles,
        }
    }

    /// The querying user's own bio and declared teach/learn lists.
    pub async fn compute_profile(&self, user_id: &str) -> Result<ProfileView, EngineError> {
        let details = self
            .skills
            .fetch_user(user_id)
            .await?
            .ok_or_else(|| EngineError::UnknownUser(user_id.to_string()))?;
        let rows = self.skills.list_skills(user_id).await?;
        let profile = profile_from_rows(user_id, &rows);
        Ok(ProfileView {
            bio: details.bio,
            teach: profile.teach.into_iter().collect(),
            learn: profile.learn.into_iter().collect(),
        })
    }

    /// Score every other profiled user against the querying user, on the
    /// standard scale. Sorted descending; zero scores excluded.
    pub async fn compute_matches(&self, user_id: &str) -> Result<Vec<MatchCandidate>, EngineError> {
        let own_rows = self.skills.list_skills(user_id).await?;
        let q = profile_from_rows(user_id, &own_rows);
        let candidate_rows = self.skills.list_all_others_with_skills(user_id).await?;
        debug!(
            user = user_id,
            candidate_rows = candidate_rows.len(),
            "computing matches"
        );
        Ok(compute_matches(&q, &candidate_rows))
    }

    /// The merged explore feed: people, open collaboration posts, and
    /// articles, independently scored and ranked together.
    ///
    /// The three source fetches are issued concurrently and joined before
    /// composition. Any single fetch failure fails the whole call; once
    /// `cancel` fires, in-flight fetches are abandoned and
    /// [`EngineError::Cancelled`] is returned.
    pub async fn compute_explore_feed(
        &self,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<FeedItem>, EngineError> {
        if cancel.is_cancelled() {
            return Err(EngineError::Cancelled);
        }

        let own_rows = self.skills.list_skills(user_id).await?;
        let q = profile_from_rows(user_id, &own_rows);
        if q.is_empty() {
            // Nothing declared in either direction: empty feed, and no
            // candidate data is fetched at all.
            debug!(user = user_id, "empty profile, skipping explore fetches");
            return Ok(Vec::new());
        }

        let fetches = future::try_join3(
            self.skills.list_all_others_with_skills(user_id),
            self.projects.list_open_projects(),
            self.articles.list_all_with_author(),
        );
        let cancelled = cancel.cancelled();
        pin_mut!(fetches);
        pin_mut!(cancelled);

        match future::select(cancelled, fetches).await {
            Either::Left(((), _)) => Err(EngineError::Cancelled),
            Either::Right((joined, _)) => {
                let (candidates, projects, articles) = joined?;
                if cancel.is_cancelled() {
                    return Err(EngineError::Cancelled);
                }
                debug!(
                    user = user_id,
                    candidate_rows = candidates.len(),
                    open_projects = projects.len(),
                    articles = articles.len(),
                    "composing explore feed"
                );
                Ok(compose_feed(&q, &candidates, &projects, &articles))
            }
        }
    }

    /// Replace the user's full declaration set from raw onboarding input.
    ///
    /// Each submitted skill is normalized; skills that normalize to the
    /// empty string are dropped silently, and entries that normalize to
    /// the same value collapse to one. The repository performs the
    /// delete-and-insert atomically.
    pub async fn replace_skills(
        &self,
        user_id: &str,
        teach: &[String],
        learn: &[String],
    ) -> Result<(), EngineError> {
        let teach = normalize_all(teach);
        let learn = normalize_all(learn);
        debug!(
            user = user_id,
            teach = teach.len(),
            learn = learn.len(),
            "replacing skill declarations"
        );
        self.skills.replace_skills(user_id, &teach, &learn).await?;
        Ok(())
    }
}

fn normalize_all(raw: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .map(|s| normalize_skill(s))
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}
