//! # beras-db: Database Layer for Kasir Beras
//!
//! Local SQLite storage that stands behind the [`SalesBackend`] collaborator.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir Beras Data Flow                            │
//! │                                                                         │
//! │  kasir::commands::checkout::process_payment                             │
//! │       │                                                                 │
//! │       ▼  SalesBackend::record_transaction                               │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     beras-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │    Repositories     │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│ ProductRepository   │  │ (embedded) │  │   │
//! │  │   │  SqlitePool   │    │ TransactionRepo...  │  │ 001_*.sql  │  │   │
//! │  │   └───────────────┘    └─────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (kasir.db)                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use beras_db::{Database, DbConfig, SalesBackend};
//!
//! let db = Database::new(DbConfig::new("kasir.db")).await?;
//! let products = db.fetch_products().await?;
//! ```

pub mod backend;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use backend::SalesBackend;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::product::ProductRepository;
pub use repository::transaction::TransactionRepository;
