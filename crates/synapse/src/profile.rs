//! The `synapse profile` command.

use anyhow::{bail, Result};

use synapse_core::SynapseEngine;

use crate::config::Config;
use crate::db;
use crate::store::SqliteStore;

pub async fn run_profile(config: &Config, username: &str, json: bool) -> Result<()> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());

    let user_id = match store.find_user_id(username).await? {
        Some(id) => id,
        None => {
            pool.close().await;
            bail!("user not found: {}", username);
        }
    };

    let engine = SynapseEngine::new(store.clone(), store.clone(), store.clone());
    let profile = engine.compute_profile(&user_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!("@{}", username);
        if let Some(ref bio) = profile.bio {
            println!("  {}", bio);
        }
        println!("  teaches: {}", join_or_none(&profile.teach));
        println!("  learns:  {}", join_or_none(&profile.learn));
    }

    pool.close().await;
    Ok(())
}

fn join_or_none(skills: &[String]) -> String {
    if skills.is_empty() {
        "(none)".to_string()
    } else {
        skills.join(", ")
    }
}
