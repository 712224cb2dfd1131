//! # Synapse
//!
//! Skill-based matchmaking and discovery for a collaboration network.
//!
//! The pure matching and ranking engine lives in `synapse-core`; this
//! crate wires it to SQLite and exposes the operations through the
//! `synapse` CLI binary.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────────┐   ┌──────────┐
//! │ synapse CLI  │──▶│   SynapseEngine   │──▶│  SQLite   │
//! │ onboard/...  │   │ profiles/matches/ │   │ users,    │
//! └──────────────┘   │ explore feed      │   │ skills,.. │
//!                    └───────────────────┘   └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |
//! | [`store`] | SQLite repository implementations |
//! | [`seed`] | Demo data |
//! | [`onboard`] | User onboarding / skill replacement |
//! | [`profile`] | Profile command |
//! | [`matches`] | Matches command |
//! | [`explore`] | Explore feed command |

pub mod config;
pub mod db;
pub mod explore;
pub mod matches;
pub mod migrate;
pub mod onboard;
pub mod profile;
pub mod seed;
pub mod store;
