//! Metrics domain: dashboard cards, revenue chart, popular products.
//!
//! Amounts of money arrive in cents; `diff_from_*` fields are percentages
//! relative to the previous period (`-4.2` means 4.2% lower).

#[cfg(feature = "http")]
pub mod client;

use crate::error::SdkError;
use crate::shared::Cents;
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Longest period `GET /metrics/daily-receipt-in-period` accepts, in days.
pub const MAX_RECEIPT_PERIOD_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthReceipt {
    pub receipt: Cents,
    pub diff_from_last_month: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOrdersAmount {
    pub amount: u64,
    pub diff_from_last_month: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOrdersAmount {
    pub amount: u64,
    pub diff_from_yesterday: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCanceledOrdersAmount {
    pub amount: u64,
    pub diff_from_last_month: f64,
}

/// One point of the revenue chart. `date` is the backend's day label (`DD/MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReceipt {
    pub date: String,
    pub receipt: Cents,
}

impl DailyReceipt {
    /// Receipt in currency units, for chart axes.
    pub fn revenue(&self) -> Decimal {
        self.receipt.to_decimal()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularProduct {
    pub product: String,
    pub amount: u64,
}

// ─── ReceiptPeriod ───────────────────────────────────────────────────────────

/// Inclusive date range for the revenue chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReceiptPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReceiptPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, SdkError> {
        let period = Self { from, to };
        period.validate()?;
        Ok(period)
    }

    /// The `days`-long period ending on `today`, as the chart shows by default.
    pub fn last_days(today: NaiveDate, days: u32) -> Result<Self, SdkError> {
        if days == 0 {
            return Err(SdkError::Validation("period must span at least one day".into()));
        }
        let from = today
            .checked_sub_days(Days::new(u64::from(days) - 1))
            .ok_or_else(|| SdkError::Validation(format!("period of {days} days is out of range")))?;
        Self::new(from, today)
    }

    pub fn validate(&self) -> Result<(), SdkError> {
        if self.from > self.to {
            return Err(SdkError::Validation(format!(
                "period starts after it ends ({} > {})",
                self.from, self.to
            )));
        }
        if (self.to - self.from).num_days() > MAX_RECEIPT_PERIOD_DAYS {
            return Err(SdkError::Validation(format!(
                "period must not exceed {MAX_RECEIPT_PERIOD_DAYS} days"
            )));
        }
        Ok(())
    }

    /// `from=YYYY-MM-DD&to=YYYY-MM-DD`
    pub fn to_query_string(&self) -> String {
        format!(
            "from={}&to={}",
            self.from.format("%Y-%m-%d"),
            self.to.format("%Y-%m-%d")
        )
    }
}
