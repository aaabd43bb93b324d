//! Exact amounts of money and how they are stored.
//!
//! Amounts are [Decimal]s, stored in SQLite as text (e.g. "-15.25") so that no precision is lost
//! and summed in Rust rather than with SQL `SUM`.

use rusqlite::{Row, types::Type};
use rust_decimal::Decimal;

use crate::Error;

/// Read the amount stored as text in column `index`.
///
/// # Errors
/// Returns [rusqlite::Error::FromSqlConversionFailure] if the text is not a decimal number.
pub(crate) fn get_amount(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let text: String = row.get(index)?;

    text.parse().map_err(|error: rust_decimal::Error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
    })
}

/// Add `amount` to `total`.
///
/// # Errors
/// Returns a [crate::ErrorKind::Validation] entry if the sum cannot be represented.
pub(crate) fn add_amount(total: Decimal, amount: Decimal) -> Result<Decimal, Error> {
    total
        .checked_add(amount)
        .ok_or_else(|| Error::validation(format!("The sum of {total} and {amount} is too large")))
}
