//! # Kasir Beras Register Library
//!
//! Application layer of the rice shop register. A UI shell links against
//! this crate and calls the functions in [`commands`].
//!
//! ## Module Organization
//! ```text
//! kasir/
//! ├── lib.rs          ◄─── You are here (startup & wiring)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Cart + payment panel, busy flag
//! │   └── config.rs   ◄─── Store configuration (TOML + env)
//! ├── commands/
//! │   ├── product.rs  ◄─── Product list and search
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── checkout.rs ◄─── Payment panel, process_payment
//! │   ├── history.rs  ◄─── Daily transaction history
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. init_tracing()                                                      │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: info,kasir=debug,beras=debug,sqlx=warn                   │
//! │                                                                         │
//! │  2. ConfigState::load(None)                                             │
//! │     • defaults → kasir.toml → KASIR_* variables                         │
//! │                                                                         │
//! │  3. Kasir::open(config)                                                 │
//! │     • Linux: ~/.local/share/kasir/kasir.db (or KASIR_DB_PATH)           │
//! │     • SQLite with WAL mode, pending migrations applied                  │
//! │     • Empty session                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use beras_db::{Database, DbConfig, SalesBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiResult;
use state::{ConfigError, ConfigState, SessionState};

/// Everything a shell needs to serve the register screens.
#[derive(Debug, Clone)]
pub struct Kasir<B> {
    pub backend: B,
    pub session: SessionState,
    pub config: ConfigState,
}

impl<B: SalesBackend> Kasir<B> {
    /// Wires an existing backend with an empty session.
    pub fn with_backend(backend: B, config: ConfigState) -> Self {
        Kasir {
            backend,
            session: SessionState::new(),
            config,
        }
    }
}

impl Kasir<Database> {
    /// Opens the shop database named by the configuration.
    pub async fn open(config: ConfigState) -> ApiResult<Self> {
        let db_path = config
            .resolve_database_path()
            .ok_or(ConfigError::NoConfigDir)?;

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }
        info!(?db_path, store = %config.store_name, "Opening shop database");

        let db = Database::new(DbConfig::new(db_path).utc_offset_secs(config.utc_offset_secs)).await?;
        info!("Database connected and migrations applied");

        Ok(Kasir::with_backend(db, config))
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kasir=trace` - Show trace for the register only
/// - Default: `info,kasir=debug,beras=debug,sqlx=warn`
///
/// Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kasir=debug,beras=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
