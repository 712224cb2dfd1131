//! Demo data seeding.
//!
//! Loads a small collaboration network (users, skill declarations, open
//! posts, articles) so the engine can be exercised from the CLI right
//! after `synapse init`.

use anyhow::Result;
use tracing::info;

use synapse_core::SynapseEngine;

use crate::config::Config;
use crate::db;
use crate::migrate;
use crate::store::SqliteStore;

struct SeedUser<'a> {
    username: &'a str,
    full_name: &'a str,
    bio: &'a str,
    teach: &'a [&'a str],
    learn: &'a [&'a str],
}

const SEED_USERS: &[SeedUser] = &[
    SeedUser {
        username: "alice",
        full_name: "Alice Nguyen",
        bio: "Backend engineer, happy to pair on Python.",
        teach: &["Python"],
        learn: &["React"],
    },
    SeedUser {
        username: "ben",
        full_name: "Ben Okafor",
        bio: "Frontend developer moving into data work.",
        teach: &["React"],
        learn: &["Python"],
    },
    SeedUser {
        username: "chloe",
        full_name: "Chloe Martin",
        bio: "UI engineer and writer.",
        teach: &["React"],
        learn: &[],
    },
    SeedUser {
        username: "dmitri",
        full_name: "Dmitri Ivanov",
        bio: "Analyst learning to automate.",
        teach: &[],
        learn: &["Python"],
    },
    SeedUser {
        username: "elena",
        full_name: "Elena Rossi",
        bio: "JVM specialist.",
        teach: &["Java"],
        learn: &[],
    },
];

pub async fn run_seed(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    migrate::run_migrations(&pool).await?;

    let store = SqliteStore::new(pool.clone());
    let engine = SynapseEngine::new(store.clone(), store.clone(), store.clone());

    let mut user_ids = std::collections::HashMap::new();
    for user in SEED_USERS {
        let id = store
            .upsert_user(user.username, user.full_name, None, Some(user.bio))
            .await?;
        let teach: Vec<String> = user.teach.iter().map(|s| s.to_string()).collect();
        let learn: Vec<String> = user.learn.iter().map(|s| s.to_string()).collect();
        engine.replace_skills(&id, &teach, &learn).await?;
        user_ids.insert(user.username, id);
    }

    store
        .insert_project(
            user_ids.get("ben").map(String::as_str),
            "Realtime analytics dashboard",
            "Building a streaming dashboard; needs a data-pipeline hand.",
            "open",
            &["Python".to_string(), "TypeScript".to_string()],
        )
        .await?;
    store
        .insert_project(
            user_ids.get("elena").map(String::as_str),
            "Legacy billing migration",
            "Wrapped up last quarter.",
            "completed",
            &["Python".to_string()],
        )
        .await?;

    store
        .insert_article(
            user_ids.get("chloe").map(String::as_str),
            "React hooks in practice",
            "Patterns that survived three production rewrites.",
            None,
            &["React".to_string(), "frontend".to_string()],
        )
        .await?;
    store
        .insert_article(
            user_ids.get("elena").map(String::as_str),
            "Growing as a mentor",
            "What a decade of onboarding juniors taught me.",
            None,
            &["mentoring".to_string()],
        )
        .await?;

    info!(users = SEED_USERS.len(), "seeded demo network");
    println!(
        "Seeded {} users, 2 projects, 2 articles.",
        SEED_USERS.len()
    );
    println!("Try: synapse matches alice");

    pool.close().await;
    Ok(())
}
