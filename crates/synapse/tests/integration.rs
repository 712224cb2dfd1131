//! End-to-end tests against a real SQLite database.

use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use synapse::config::{Config, DbConfig};
use synapse::db;
use synapse::migrate;
use synapse::store::SqliteStore;
use synapse_core::repo::SkillRepository;
use synapse_core::SynapseEngine;

async fn setup_store() -> (TempDir, SqliteStore) {
    let tmp = TempDir::new().unwrap();
    let config = Config {
        db: DbConfig {
            path: tmp.path().join("synapse.sqlite"),
        },
    };
    let pool = db::connect(&config).await.unwrap();
    migrate::run_migrations(&pool).await.unwrap();
    (tmp, SqliteStore::new(pool))
}

fn engine_over(
    store: &SqliteStore,
) -> SynapseEngine<SqliteStore, SqliteStore, SqliteStore> {
    SynapseEngine::new(store.clone(), store.clone(), store.clone())
}

/// Onboard the canonical five-user network and return alice's id.
async fn seed_five_users(store: &SqliteStore) -> String {
    let engine = engine_over(store);
    let mut alice_id = String::new();
    let users: &[(&str, &[&str], &[&str])] = &[
        ("alice", &["Python"], &["React"]),
        ("ben", &["React"], &["Python"]),
        ("chloe", &["React"], &[]),
        ("dmitri", &[], &["Python"]),
        ("elena", &["Java"], &[]),
    ];
    for (username, teach, learn) in users {
        let id = store
            .upsert_user(username, username, None, Some("bio"))
            .await
            .unwrap();
        let teach: Vec<String> = teach.iter().map(|s| s.to_string()).collect();
        let learn: Vec<String> = learn.iter().map(|s| s.to_string()).collect();
        engine.replace_skills(&id, &teach, &learn).await.unwrap();
        if *username == "alice" {
            alice_id = id;
        }
    }
    alice_id
}

#[tokio::test]
async fn test_matches_canonical_ordering() {
    let (_tmp, store) = setup_store().await;
    let alice = seed_five_users(&store).await;

    let matches = engine_over(&store).compute_matches(&alice).await.unwrap();
    let summary: Vec<(&str, i64)> = matches
        .iter()
        .map(|m| (m.username.as_str(), m.score))
        .collect();
    assert_eq!(summary, vec![("ben", 60), ("chloe", 23), ("dmitri", 12)]);

    assert_eq!(matches[0].badges, vec!["Perfect Match"]);
    assert_eq!(matches[0].teach_overlap, vec!["react"]);
    assert_eq!(matches[0].learn_overlap, vec!["python"]);
    assert_eq!(matches[1].badges, vec!["Mentor"]);
    assert_eq!(matches[2].badges, vec!["Student"]);

    // elena has no overlap with alice at all.
    assert!(matches.iter().all(|m| m.username != "elena"));
}

#[tokio::test]
async fn test_skills_stored_normalized() {
    let (_tmp, store) = setup_store().await;
    let engine = engine_over(&store);

    let id = store.upsert_user("pat", "Pat", None, None).await.unwrap();
    engine
        .replace_skills(
            &id,
            &[" Python ".to_string(), "   ".to_string()],
            &["GraphQL".to_string()],
        )
        .await
        .unwrap();

    let rows = store.list_skills(&id).await.unwrap();
    let stored: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.skill.as_str(), r.direction.as_str()))
        .collect();
    assert_eq!(stored, vec![("python", "TEACH"), ("graphql", "LEARN")]);
}

#[tokio::test]
async fn test_duplicate_submission_collapses_to_one_row() {
    let (_tmp, store) = setup_store().await;
    let engine = engine_over(&store);

    // "Python" and " python " normalize to the same value; onboarding
    // must collapse them rather than trip the skills UNIQUE constraint.
    let id = store.upsert_user("pat", "Pat", None, None).await.unwrap();
    engine
        .replace_skills(
            &id,
            &["Python".to_string(), " python ".to_string()],
            &[],
        )
        .await
        .unwrap();

    let rows = store.list_skills(&id).await.unwrap();
    let stored: Vec<&str> = rows.iter().map(|r| r.skill.as_str()).collect();
    assert_eq!(stored, vec!["python"]);
}

#[tokio::test]
async fn test_replace_is_atomic_under_failure() {
    let (_tmp, store) = setup_store().await;
    let engine = engine_over(&store);

    let id = store.upsert_user("pat", "Pat", None, None).await.unwrap();
    engine
        .replace_skills(&id, &["python".to_string()], &["react".to_string()])
        .await
        .unwrap();

    // Duplicate normalized entries violate the skills UNIQUE constraint
    // partway through the insert loop; the transaction must roll back.
    let result = SkillRepository::replace_skills(
        &store,
        &id,
        &["rust".to_string(), "rust".to_string()],
        &[],
    )
    .await;
    assert!(result.is_err());

    let rows = store.list_skills(&id).await.unwrap();
    let stored: Vec<&str> = rows.iter().map(|r| r.skill.as_str()).collect();
    assert_eq!(stored, vec!["python", "react"]);
}

#[tokio::test]
async fn test_replace_overwrites_previous_set() {
    let (_tmp, store) = setup_store().await;
    let engine = engine_over(&store);

    let id = store.upsert_user("pat", "Pat", None, None).await.unwrap();
    engine
        .replace_skills(&id, &["python".to_string()], &[])
        .await
        .unwrap();
    engine
        .replace_skills(&id, &["go".to_string()], &["sql".to_string()])
        .await
        .unwrap();

    let rows = store.list_skills(&id).await.unwrap();
    let stored: Vec<&str> = rows.iter().map(|r| r.skill.as_str()).collect();
    assert_eq!(stored, vec!["go", "sql"]);
}

#[tokio::test]
async fn test_explore_feed_end_to_end() {
    let (_tmp, store) = setup_store().await;
    let alice = seed_five_users(&store).await;

    // An open project needing Python (alice teaches python; comparison is
    // read-time case-insensitive against the verbatim entry), a closed one
    // that must not appear, and an article tagged React (alice learns it).
    store
        .insert_project(None, "Dashboard", "desc", "open", &["Python".to_string()])
        .await
        .unwrap();
    store
        .insert_project(None, "Old thing", "done", "completed", &["Python".to_string()])
        .await
        .unwrap();
    store
        .insert_article(None, "Hooks", "excerpt", None, &["React".to_string()])
        .await
        .unwrap();
    store
        .insert_article(None, "JVM tuning", "excerpt", None, &["Java".to_string()])
        .await
        .unwrap();

    let feed = engine_over(&store)
        .compute_explore_feed(&alice, &CancellationToken::new())
        .await
        .unwrap();

    let summary: Vec<(&str, i64)> = feed
        .iter()
        .map(|i| (i.title.as_str(), i.score))
        .collect();
    // ben reciprocal 120, project 80, chloe/dmitri one-sided 55 each
    // (candidate row order), article 35. "Old thing" and "JVM tuning"
    // are absent.
    assert_eq!(
        summary,
        vec![
            ("ben", 120),
            ("Dashboard", 80),
            ("chloe", 55),
            ("dmitri", 55),
            ("Hooks", 35),
        ]
    );
}

#[tokio::test]
async fn test_explore_empty_profile_returns_empty_feed() {
    let (_tmp, store) = setup_store().await;
    let id = store.upsert_user("new", "New User", None, None).await.unwrap();

    store
        .insert_project(None, "Dashboard", "desc", "open", &["Python".to_string()])
        .await
        .unwrap();

    let feed = engine_over(&store)
        .compute_explore_feed(&id, &CancellationToken::new())
        .await
        .unwrap();
    assert!(feed.is_empty());
}

#[tokio::test]
async fn test_article_author_name_resolved() {
    let (_tmp, store) = setup_store().await;
    let alice = seed_five_users(&store).await;
    let chloe = store.find_user_id("chloe").await.unwrap().unwrap();

    store
        .insert_article(
            Some(&chloe),
            "Hooks",
            "excerpt",
            None,
            &["React".to_string()],
        )
        .await
        .unwrap();

    let feed = engine_over(&store)
        .compute_explore_feed(&alice, &CancellationToken::new())
        .await
        .unwrap();
    let article = feed
        .iter()
        .find(|i| i.title == "Hooks")
        .expect("article in feed");
    assert_eq!(article.subtitle.as_deref(), Some("chloe"));
}

#[tokio::test]
async fn test_malformed_tags_json_treated_as_empty() {
    let (_tmp, store) = setup_store().await;
    let alice = seed_five_users(&store).await;

    sqlx::query(
        "INSERT INTO articles (id, title, excerpt, tags, created_at) VALUES ('x1', 'Broken', '', 'not json', 0)",
    )
    .execute(store.pool())
    .await
    .unwrap();

    let feed = engine_over(&store)
        .compute_explore_feed(&alice, &CancellationToken::new())
        .await
        .unwrap();
    assert!(feed.iter().all(|i| i.title != "Broken"));
}
