//! The accounts overview: every account with the net amount of its transactions in a date range.

use rust_decimal::Decimal;
use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    account::{Account, AccountGroup},
};

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// The first day of the range.
    pub from: Date,
    /// The last day of the range.
    pub to: Date,
}

impl DateRange {
    /// Fill in the missing bounds relative to `today`.
    ///
    /// `from` defaults to the first day of the month of `today` and `to` defaults to `today`.
    ///
    /// # Errors
    /// Returns a [crate::ErrorKind::Validation] entry if `from` is after `to`.
    pub fn with_defaults(from: Option<Date>, to: Option<Date>, today: Date) -> Result<Self, Error> {
        let to = to.unwrap_or(today);
        let from = from.unwrap_or_else(|| today.replace_day(1).unwrap_or(today));

        if from > to {
            return Err(Error::validation(format!(
                "The start date {from} is after the end date {to}"
            )));
        }

        Ok(Self { from, to })
    }

    /// Fill in the missing bounds relative to the current UTC date.
    pub fn with_defaults_from_now(from: Option<Date>, to: Option<Date>) -> Result<Self, Error> {
        Self::with_defaults(from, to, OffsetDateTime::now_utc().date())
    }
}

/// An account and the net amount of its transactions in the overview's date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    /// The account.
    #[serde(flatten)]
    pub account: Account,
    /// The sum of the account's transactions dated within the range.
    pub period_total: Decimal,
}

/// All accounts and account groups with the account totals for a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountsOverview {
    /// The range the period totals cover.
    #[serde(flatten)]
    pub range: DateRange,
    /// The account groups in display order.
    pub account_groups: Vec<AccountGroup>,
    /// The accounts ordered by ID.
    pub accounts: Vec<AccountSummary>,
}
