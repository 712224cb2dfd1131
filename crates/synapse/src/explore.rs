//! The `synapse explore` command: the merged discovery feed.
//!
//! Ctrl-C cancels the in-flight computation through the engine's
//! cancellation token rather than killing the process mid-write.

use anyhow::{bail, Result};
use tokio_util::sync::CancellationToken;

use synapse_core::repo::EngineError;
use synapse_core::SynapseEngine;

use crate::config::Config;
use crate::db;
use crate::store::SqliteStore;

pub async fn run_explore(config: &Config, username: &str, json: bool) -> Result<()> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());

    let user_id = match store.find_user_id(username).await? {
        Some(id) => id,
        None => {
            pool.close().await;
            bail!("user not found: {}", username);
        }
    };

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    let engine = SynapseEngine::new(store.clone(), store.clone(), store.clone());
    let feed = match engine.compute_explore_feed(&user_id, &cancel).await {
        Ok(feed) => feed,
        Err(EngineError::Cancelled) => {
            println!("Explore cancelled.");
            pool.close().await;
            return Ok(());
        }
        Err(e) => {
            pool.close().await;
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&feed)?);
        pool.close().await;
        return Ok(());
    }

    if feed.is_empty() {
        println!("Nothing to explore yet — declare some skills first.");
        pool.close().await;
        return Ok(());
    }

    for (i, item) in feed.iter().enumerate() {
        println!(
            "{}. [{}] {} / {}",
            i + 1,
            item.score,
            item.kind.label(),
            item.title
        );
        if let Some(ref subtitle) = item.subtitle {
            println!("    {}", subtitle);
        }
        for reason in &item.reasons {
            println!("    {}", reason);
        }
    }

    pool.close().await;
    Ok(())
}
