//! # Commands Module
//!
//! Everything the cashier's screens can ask for.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Product list, search, grouping, low stock
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Payment panel and process_payment
//! ├── history.rs   ◄─── Transactions of a day + summary
//! └── config.rs    ◄─── Store settings for the shell
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the session
//! fn get_cart(session: &SessionState) -> CartView
//!
//! // Needs the backend and the session
//! async fn add_to_cart(backend: &B, session: &SessionState, config: &ConfigState, product_id: &str)
//! ```
//!
//! Async commands are generic over [`beras_db::SalesBackend`] so they run
//! against SQLite in the app and against test doubles here.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod history;
pub mod product;

#[cfg(test)]
pub(crate) mod test_support;
