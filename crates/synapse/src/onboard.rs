//! Onboarding: create or update a user and replace their declared skills.
//!
//! Re-running onboarding replaces the user's full declaration set — the
//! lists are never patched incrementally. The replace itself is atomic in
//! the store; a failure leaves the previously stored declarations intact.

use anyhow::Result;

use synapse_core::SynapseEngine;

use crate::config::Config;
use crate::db;
use crate::store::SqliteStore;

pub struct OnboardArgs {
    pub username: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub teach: Vec<String>,
    pub learn: Vec<String>,
}

pub async fn run_onboard(config: &Config, args: &OnboardArgs) -> Result<()> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());

    let existing = store.find_user_id(&args.username).await?;
    let user_id = match (&existing, &args.full_name) {
        // Known user, no display change requested.
        (Some(id), None) if args.bio.is_none() && args.avatar_url.is_none() => id.clone(),
        _ => {
            let full_name = args
                .full_name
                .clone()
                .unwrap_or_else(|| args.username.clone());
            store
                .upsert_user(
                    &args.username,
                    &full_name,
                    args.avatar_url.as_deref(),
                    args.bio.as_deref(),
                )
                .await?
        }
    };

    let engine = SynapseEngine::new(store.clone(), store.clone(), store.clone());
    engine
        .replace_skills(&user_id, &args.teach, &args.learn)
        .await?;

    let profile = engine.compute_profile(&user_id).await?;
    println!("Onboarded @{}", args.username);
    println!("  teaches: {}", format_list(&profile.teach));
    println!("  learns:  {}", format_list(&profile.learn));

    pool.close().await;
    Ok(())
}

fn format_list(skills: &[String]) -> String {
    if skills.is_empty() {
        "(none)".to_string()
    } else {
        skills.join(", ")
    }
}
