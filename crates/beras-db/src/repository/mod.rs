//! # Repository Module
//!
//! SQL lives here and nowhere else.
//!
//! ```text
//! kasir command
//!      │  db.products().list()
//!      ▼
//! ProductRepository ─────┐
//! TransactionRepository ─┴──► SQLite
//! ```
//!
//! - [`product::ProductRepository`] - catalog reads, seed inserts, stock takes
//! - [`transaction::TransactionRepository`] - atomic sale recording, daily history

pub mod product;
pub mod transaction;
