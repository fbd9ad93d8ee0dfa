//! # State Module
//!
//! Shared state the commands run against.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐       │
//! │  │  SalesBackend    │  │  SessionState    │  │   ConfigState    │       │
//! │  │                  │  │                  │  │                  │       │
//! │  │  Database        │  │  Arc<Mutex<      │  │  store_name      │       │
//! │  │  (SQLite pool)   │  │    Session>>     │  │  utc_offset      │       │
//! │  │                  │  │  + busy flag     │  │  cart_step       │       │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────┘       │
//! │                                                                         │
//! │  • Backend: internal connection pool                                   │
//! │  • Session: mutex for short sections, atomic flag across the await     │
//! │  • Config: read-only after startup                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ConfigError, ConfigState};
pub use session::{CheckoutGuard, Session, SessionState};
