//! # Synapse CLI (`synapse`)
//!
//! Command-line front end for the Synapse matching and discovery engine.
//!
//! ## Usage
//!
//! ```bash
//! synapse --config ./config/synapse.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `synapse init` | Create the SQLite database and run schema migrations |
//! | `synapse seed` | Load a small demo network |
//! | `synapse onboard <username>` | Create/update a user and replace their skills |
//! | `synapse profile <username>` | Show a user's bio and declared skills |
//! | `synapse matches <username>` | Ranked reciprocal matches |
//! | `synapse explore <username>` | The merged discovery feed |
//!
//! ## Examples
//!
//! ```bash
//! synapse init
//! synapse onboard alice --name "Alice Nguyen" --teach Python --learn React
//! synapse matches alice
//! synapse explore alice --json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use synapse::config;
use synapse::db;
use synapse::explore;
use synapse::matches;
use synapse::migrate;
use synapse::onboard::{self, OnboardArgs};
use synapse::profile;
use synapse::seed;

/// Synapse — skill-based matchmaking and discovery for a collaboration
/// network.
#[derive(Parser)]
#[command(
    name = "synapse",
    about = "Synapse — skill-based matchmaking and discovery for a collaboration network",
    version,
    long_about = "Synapse turns per-user teach/learn skill declarations into bidirectional \
    matches and a scored discovery feed mixing people, open collaboration posts, and articles."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/synapse.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and all required tables (users,
    /// skills, projects, articles). Idempotent.
    Init,

    /// Load a small demo network: five users with overlapping skills,
    /// two projects, two articles.
    Seed,

    /// Create or update a user and replace their declared skills.
    ///
    /// The submitted teach/learn lists replace the stored set atomically;
    /// skills are normalized (trimmed, lower-cased) before storage and
    /// blank entries are dropped.
    Onboard {
        /// Username to onboard.
        username: String,

        /// Display name (defaults to the username for new users).
        #[arg(long)]
        name: Option<String>,

        /// Short bio.
        #[arg(long)]
        bio: Option<String>,

        /// Avatar image URL.
        #[arg(long)]
        avatar: Option<String>,

        /// Skills the user can teach (comma-separated or repeated).
        #[arg(long, value_delimiter = ',')]
        teach: Vec<String>,

        /// Skills the user wants to learn (comma-separated or repeated).
        #[arg(long, value_delimiter = ',')]
        learn: Vec<String>,
    },

    /// Show a user's bio and declared teach/learn skills.
    Profile {
        username: String,

        /// Emit JSON instead of a human listing.
        #[arg(long)]
        json: bool,
    },

    /// Ranked reciprocal matches for a user (highest score first).
    Matches {
        username: String,

        /// Emit JSON instead of a human listing.
        #[arg(long)]
        json: bool,
    },

    /// The merged discovery feed: people, open posts, and articles.
    Explore {
        username: String,

        /// Emit JSON instead of a human listing.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let pool = db::connect(&config).await?;
            migrate::run_migrations(&pool).await?;
            pool.close().await;
            println!("Database initialized at {}", config.db.path.display());
            Ok(())
        }
        Commands::Seed => seed::run_seed(&config).await,
        Commands::Onboard {
            username,
            name,
            bio,
            avatar,
            teach,
            learn,
        } => {
            let args = OnboardArgs {
                username,
                full_name: name,
                bio,
                avatar_url: avatar,
                teach,
                learn,
            };
            onboard::run_onboard(&config, &args).await
        }
        Commands::Profile { username, json } => profile::run_profile(&config, &username, json).await,
        Commands::Matches { username, json } => matches::run_matches(&config, &username, json).await,
        Commands::Explore { username, json } => explore::run_explore(&config, &username, json).await,
    }
}
