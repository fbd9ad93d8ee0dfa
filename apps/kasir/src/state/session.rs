//! # Session State
//!
//! The sale in progress: one cart and its payment panel.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  add_to_cart / adjust / quick amount ──► update() ──► retotal          │
//! │                                                                         │
//! │  process_payment                                                        │
//! │     │  try_begin_checkout() ──► busy = true, snapshot taken             │
//! │     │                                                                   │
//! │     ▼  record_transaction(...).await    (no lock held)                  │
//! │     │                                                                   │
//! │     ├── Ok  ──► finish_checkout() ──► fresh session                     │
//! │     └── Err ──► guard dropped     ──► session untouched, retry allowed  │
//! │                                                                         │
//! │  While busy: every update() and a second checkout fail with BUSY.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The mutex is only held for synchronous sections, never across `.await`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use beras_core::payment::quote;
use beras_core::{Cart, Tender};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Cart plus payment panel for the active sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub cart: Cart,
    pub tender: Tender,
}

impl Session {
    /// Re-quotes the tender after a cart change. Method and cash are kept.
    fn retotal(self) -> Self {
        let total = quote(&self.cart);
        Session {
            tender: self.tender.with_total(total),
            ..self
        }
    }
}

/// Shared session handle.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
    busy: Arc<AtomicBool>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    /// Applies a change and returns the new session.
    ///
    /// Fails with `BUSY` while a checkout is being recorded. The stored
    /// session is only replaced once the change has produced a result.
    pub fn update<F>(&self, f: F) -> ApiResult<Session>
    where
        F: FnOnce(Session) -> Session,
    {
        let mut session = self.lock();
        if self.is_busy() {
            return Err(ApiError::busy());
        }

        let next = f(session.clone()).retotal();
        *session = next.clone();
        Ok(next)
    }

    /// Marks a checkout as outstanding and returns the session it covers.
    ///
    /// `None` if another checkout already holds the flag.
    pub fn try_begin_checkout(&self) -> Option<(CheckoutGuard, Session)> {
        let session = self.lock();
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;

        let guard = CheckoutGuard {
            busy: Arc::clone(&self.busy),
        };
        Some((guard, session.clone()))
    }

    /// Starts a fresh sale after a recorded checkout, then releases the flag.
    pub fn finish_checkout(&self, guard: CheckoutGuard) {
        *self.lock() = Session::default();
        drop(guard);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Drops the sale in progress. Does nothing while busy.
    pub fn reset(&self) -> ApiResult<Session> {
        self.update(|_| Session::default())
    }
}

/// Holds the busy flag. Dropping it releases the flag.
#[derive(Debug)]
pub struct CheckoutGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for CheckoutGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use beras_core::{Money, PaymentMethod, Product, ProductCategory};
    use rust_decimal::Decimal;
    use std::panic::{self, AssertUnwindSafe};

    fn pandan() -> Product {
        Product::new(
            "p-1",
            "Beras Pandan Wangi",
            Money::from_rupiah(16_000),
            "kg",
            ProductCategory::Kiloan,
            Decimal::from(40),
        )
    }

    #[test]
    fn test_update_retotals_tender() {
        let state = SessionState::new();
        let product = pandan();

        let session = state
            .update(|s| Session {
                cart: s.cart.add(&product).add(&product),
                ..s
            })
            .unwrap();

        assert_eq!(session.tender.total_due, Money::from_rupiah(16_000));
        assert_eq!(state.snapshot(), session);
    }

    #[test]
    fn test_retotal_keeps_method_and_cash() {
        let state = SessionState::new();
        let product = pandan();

        state
            .update(|s| Session {
                tender: s.tender.with_method(PaymentMethod::Cash).quick_amount(Money::from_rupiah(20_000)),
                ..s
            })
            .unwrap();
        let session = state
            .update(|s| Session {
                cart: s.cart.add(&product),
                ..s
            })
            .unwrap();

        assert_eq!(session.tender.tendered, Money::from_rupiah(20_000));
        assert_eq!(session.tender.total_due, Money::from_rupiah(8_000));
        assert_eq!(session.tender.evaluation().change, Money::from_rupiah(12_000));
    }

    #[test]
    fn test_second_checkout_is_rejected_while_busy() {
        let state = SessionState::new();

        let (guard, _) = state.try_begin_checkout().unwrap();
        assert!(state.is_busy());
        assert!(state.try_begin_checkout().is_none());

        drop(guard);
        assert!(!state.is_busy());
        assert!(state.try_begin_checkout().is_some());
    }

    #[test]
    fn test_updates_blocked_while_busy() {
        let state = SessionState::new();
        let product = pandan();

        let (_guard, _) = state.try_begin_checkout().unwrap();
        let err = state
            .update(|s| Session {
                cart: s.cart.add(&product),
                ..s
            })
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Busy);
        assert!(state.snapshot().cart.is_empty());
    }

    #[test]
    fn test_panicking_update_keeps_previous_session() {
        let state = SessionState::new();
        let product = pandan();
        state
            .update(|s| Session {
                cart: s.cart.add(&product),
                ..s
            })
            .unwrap();
        let before = state.snapshot();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            state.update(|_| -> Session { panic!("reducer failed") })
        }));

        assert!(result.is_err());
        assert_eq!(state.snapshot(), before);
        assert_eq!(state.update(|s| s).unwrap().cart.len(), 1);
    }

    #[test]
    fn test_finish_checkout_starts_fresh_sale() {
        let state = SessionState::new();
        let product = pandan();
        state
            .update(|s| Session {
                cart: s.cart.add(&product),
                ..s
            })
            .unwrap();

        let (guard, snapshot) = state.try_begin_checkout().unwrap();
        assert_eq!(snapshot.cart.len(), 1);

        state.finish_checkout(guard);
        assert!(!state.is_busy());
        assert_eq!(state.snapshot(), Session::default());
    }

    #[test]
    fn test_clones_share_state() {
        let state = SessionState::new();
        let other = state.clone();
        let product = pandan();

        other
            .update(|s| Session {
                cart: s.cart.add(&product),
                ..s
            })
            .unwrap();
        assert_eq!(state.snapshot().cart.len(), 1);
    }
}
