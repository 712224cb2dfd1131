//! # Synapse Core
//!
//! The skill-based matching and unified discovery ranking engine behind
//! the Synapse collaboration network: per-user skill profiles, reciprocal
//! (teach/learn) matching, and the heterogeneous explore feed mixing
//! people, open collaboration posts, and articles.
//!
//! This crate contains no tokio runtime, sqlx, or filesystem I/O. All data
//! access goes through the repository traits in [`repo`]; the application
//! crate supplies the SQLite-backed implementations, and [`repo::memory`]
//! provides an in-memory backend for tests.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Core data types |
//! | [`normalize`] | Skill text canonicalization |
//! | [`profile`] | Per-user teach/learn profile aggregation |
//! | [`matching`] | Reciprocal overlap scoring |
//! | [`feed`] | Explore feed composition |
//! | [`rank`] | Positive-score filter and stable descending sort |
//! | [`engine`] | The `compute_*` operations over the repositories |
//! | [`repo`] | Repository trait contracts |

pub mod engine;
pub mod feed;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod profile;
pub mod rank;
pub mod repo;

pub use engine::SynapseEngine;
pub use repo::{EngineError, RepositoryError};
