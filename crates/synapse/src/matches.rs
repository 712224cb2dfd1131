//! The `synapse matches` command: ranked reciprocal matches for one user.

use anyhow::{bail, Result};

use synapse_core::SynapseEngine;

use crate::config::Config;
use crate::db;
use crate::store::SqliteStore;

pub async fn run_matches(config: &Config, username: &str, json: bool) -> Result<()> {
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
    let matches = engine.compute_matches(&user_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        pool.close().await;
        return Ok(());
    }

    if matches.is_empty() {
        println!("No matches.");
        pool.close().await;
        return Ok(());
    }

    for (i, m) in matches.iter().enumerate() {
        let badges = if m.badges.is_empty() {
            String::new()
        } else {
            format!(" [{}]", m.badges.join(", "))
        };
        println!("{}. [{}] {} (@{}){}", i + 1, m.score, m.full_name, m.username, badges);
        for reason in &m.reasons {
            println!("    {}", reason);
        }
    }

    pool.close().await;
    Ok(())
}
