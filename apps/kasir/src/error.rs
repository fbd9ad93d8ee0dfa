//! # API Error Types
//!
//! The one error type every command returns. It serializes to what the UI
//! shell shows the cashier.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    What the Cashier Sees                                │
//! │                                                                         │
//! │  ValidationError / CoreError ──► inline notice, nothing changed         │
//! │     INSUFFICIENT_CASH             "Uang tidak cukup" under the total    │
//! │     VALIDATION_ERROR              field-level message                   │
//! │                                                                         │
//! │  DbError ──────────────────────► transient notice, retry by hand        │
//! │     TRANSACTION_FAILED            cart is kept, press Bayar again       │
//! │     DATABASE_ERROR                details only in the log               │
//! │                                                                         │
//! │  BUSY ─────────────────────────► second press while saving, ignored     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use beras_core::{CoreError, ValidationError};
use beras_db::DbError;
use serde::Serialize;
use ts_rs::TS;

use crate::state::ConfigError;

/// Error returned from commands.
///
/// ```json
/// { "code": "INSUFFICIENT_CASH", "message": "Insufficient cash: total Rp 20.000, tendered Rp 10.000" }
/// ```
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,

    /// Input rejected before anything changed.
    ValidationError,

    /// Cash payment does not cover the total.
    InsufficientCash,

    /// A checkout is already being recorded.
    Busy,

    /// Recording the sale failed. The cart is intact; retry is safe.
    TransactionFailed,

    /// Loading data failed.
    DatabaseError,

    /// Configuration could not be loaded or saved.
    ConfigError,

    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn busy() -> Self {
        ApiError::new(ErrorCode::Busy, "A payment is already being processed")
    }

    /// Generic notice for a failed recording. Details go to the log.
    pub fn transaction_failed() -> Self {
        ApiError::new(
            ErrorCode::TransactionFailed,
            "Transaction could not be saved, please try again",
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::InvalidTransaction(reason) => ApiError::validation(reason),
            DbError::ConnectionFailed(e) => {
                tracing::error!(error = %e, "Database connection failed");
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!(error = %e, "Database migration failed");
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database is busy, please try again")
            }
            other => {
                tracing::error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::EmptyCart => ApiError::validation("Cart is empty"),
            e @ CoreError::InsufficientCash { .. } => {
                ApiError::new(ErrorCode::InsufficientCash, e.to_string())
            }
            CoreError::InvalidTransaction { reason } => ApiError::validation(reason),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        tracing::error!(error = %err, "Configuration error");
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use beras_core::Money;

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::busy();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "BUSY");
        assert!(json["message"].as_str().unwrap().contains("already"));
    }

    #[test]
    fn test_insufficient_cash_maps_to_own_code() {
        let err: ApiError = CoreError::InsufficientCash {
            total_due: Money::from_rupiah(15_000),
            tendered: Money::from_rupiah(10_000),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientCash);
        assert!(err.message.contains("Rp 15.000"));
    }

    #[test]
    fn test_db_details_are_hidden() {
        let err: ApiError = DbError::QueryFailed("no such table: products".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("products"));
    }

    #[test]
    fn test_not_found_passes_through() {
        let err: ApiError = DbError::not_found("Product", "p-9").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: p-9");
    }
}
