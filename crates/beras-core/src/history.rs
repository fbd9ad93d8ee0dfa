//! # Sales History
//!
//! Day boundaries for the history query and the summary shown above the
//! transaction list.
//!
//! The shop keeps local time at a fixed UTC offset (WIB, UTC+7 by default).
//! A history day runs from 00:00:00.000 to 23:59:59.999 local time:
//!
//! ```text
//!   local  2024-03-05 00:00:00.000 ─────────── 2024-03-05 23:59:59.999
//!   UTC    2024-03-04 17:00:00.000 ─────────── 2024-03-05 16:59:59.999
//! ```

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{PaymentMethod, TransactionRecord};
use crate::WIB_OFFSET_SECS;

/// Inclusive UTC range covering one local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayBounds {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// Bounds of a WIB calendar day.
pub fn day_bounds(date: NaiveDate) -> DayBounds {
    day_bounds_with_offset(date, WIB_OFFSET_SECS)
}

/// Bounds of a calendar day at `offset_secs` east of UTC.
pub fn day_bounds_with_offset(date: NaiveDate, offset_secs: i32) -> DayBounds {
    let local_midnight = date.and_time(NaiveTime::MIN);
    let start = Utc.from_utc_datetime(&(local_midnight - Duration::seconds(i64::from(offset_secs))));
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    DayBounds { start, end }
}

/// Local calendar date of an instant.
pub fn local_date(instant: DateTime<Utc>, offset_secs: i32) -> NaiveDate {
    (instant.naive_utc() + Duration::seconds(i64::from(offset_secs))).date()
}

// =============================================================================
// Daily Summary
// =============================================================================

/// Revenue for one payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MethodTotal {
    pub method: PaymentMethod,
    pub count: u32,
    pub revenue: Money,
}

/// Header figures of the history screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailySummary {
    pub total_revenue: Money,
    pub transaction_count: u32,
    /// One entry per payment method, in checkout-screen order.
    pub by_method: Vec<MethodTotal>,
}

impl DailySummary {
    pub fn from_records(records: &[TransactionRecord]) -> Self {
        let by_method = PaymentMethod::ALL
            .iter()
            .map(|&method| {
                let matching = records.iter().filter(|r| r.payment_method == method);
                MethodTotal {
                    method,
                    count: matching.clone().count() as u32,
                    revenue: matching.map(|r| r.total_amount).sum(),
                }
            })
            .collect();

        DailySummary {
            total_revenue: records.iter().map(|r| r.total_amount).sum(),
            transaction_count: records.len() as u32,
            by_method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, method: PaymentMethod, total: i64) -> TransactionRecord {
        TransactionRecord {
            id: id.to_string(),
            receipt_code: "ABCD1234".to_string(),
            total_amount: Money::from_rupiah(total),
            payment_method: method,
            cash_received: Money::from_rupiah(total),
            change_amount: Money::zero(),
            transaction_date: Utc::now(),
            items: Vec::new(),
        }
    }

    #[test]
    fn test_day_bounds_wib() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let bounds = day_bounds(date);

        assert_eq!(bounds.start.to_rfc3339(), "2024-03-04T17:00:00+00:00");
        assert_eq!(
            bounds.end,
            Utc.with_ymd_and_hms(2024, 3, 5, 16, 59, 59).unwrap() + Duration::milliseconds(999)
        );
    }

    #[test]
    fn test_day_bounds_contains_edges() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let bounds = day_bounds_with_offset(date, 0);

        assert!(bounds.contains(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()));
        assert!(bounds.contains(Utc.with_ymd_and_hms(2024, 3, 5, 23, 59, 59).unwrap()));
        assert!(!bounds.contains(Utc.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_local_date() {
        let late_utc = Utc.with_ymd_and_hms(2024, 3, 5, 18, 30, 0).unwrap();
        assert_eq!(local_date(late_utc, WIB_OFFSET_SECS), NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        assert_eq!(local_date(late_utc, 0), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_summary() {
        let records = vec![
            record("1", PaymentMethod::Cash, 20_000),
            record("2", PaymentMethod::Qris, 45_000),
            record("3", PaymentMethod::Cash, 8_000),
        ];
        let summary = DailySummary::from_records(&records);

        assert_eq!(summary.total_revenue, Money::from_rupiah(73_000));
        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.by_method[0].method, PaymentMethod::Cash);
        assert_eq!(summary.by_method[0].count, 2);
        assert_eq!(summary.by_method[0].revenue, Money::from_rupiah(28_000));
        assert_eq!(summary.by_method[1].revenue, Money::zero());
        assert_eq!(summary.by_method[2].revenue, Money::from_rupiah(45_000));
    }

    #[test]
    fn test_summary_empty_day() {
        let summary = DailySummary::from_records(&[]);
        assert_eq!(summary.total_revenue, Money::zero());
        assert_eq!(summary.transaction_count, 0);
        assert_eq!(summary.by_method.len(), 3);
    }
}
