//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::{CategoryId, CategoryName},
};

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// The most decimal places an amount may have.
pub const MAX_AMOUNT_SCALE: u32 = 4;

/// The most digits an amount may have before the decimal point.
pub const MAX_AMOUNT_INTEGER_DIGITS: u32 = 15;

/// The most characters a description may have.
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// The name used in JSON and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidRequest(format!(
                "unknown transaction type \"{other}\", expected INCOME or EXPENSE"
            ))),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// Check that `amount` can be stored as a transaction amount.
///
/// # Errors
///
/// This function will return a:
/// - [Error::NegativeAmount] if the amount is below zero,
/// - [Error::AmountTooLarge] if it has more than [MAX_AMOUNT_INTEGER_DIGITS] digits before the
///   decimal point,
/// - or [Error::AmountTooPrecise] if it has more than [MAX_AMOUNT_SCALE] decimal places after
///   removing trailing zeros.
pub fn validate_amount(amount: Decimal) -> Result<Decimal, Error> {
    if amount < Decimal::ZERO {
        return Err(Error::NegativeAmount);
    }

    if amount >= Decimal::from(10_i64.pow(MAX_AMOUNT_INTEGER_DIGITS)) {
        return Err(Error::AmountTooLarge(amount.to_string()));
    }

    if amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(Error::AmountTooPrecise(amount.to_string()));
    }

    Ok(amount)
}

/// Check that a description fits in [MAX_DESCRIPTION_LENGTH] characters.
///
/// # Errors
///
/// Returns [Error::DescriptionTooLong] if the description is too long.
pub fn validate_description(description: Option<&str>) -> Result<(), Error> {
    match description {
        Some(text) if text.chars().count() > MAX_DESCRIPTION_LENGTH => {
            Err(Error::DescriptionTooLong(MAX_DESCRIPTION_LENGTH))
        }
        _ => Ok(()),
    }
}

/// An income or expense of a user.
///
/// `category_id` and `category_name` are `None` when the transaction's category has been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: Date,
    pub category_id: Option<CategoryId>,
    pub category_name: Option<CategoryName>,
}

/// The JSON body for creating and updating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Numbers are read from their JSON text so no precision is lost to floating point.
    #[serde(deserialize_with = "rust_decimal::serde::arbitrary_precision::deserialize")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    pub date: Date,
    pub category_id: CategoryId,
}

/// Optional inclusive date bounds for listing transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl TransactionFilter {
    /// Check that the range is not empty.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidDateRange] if `from` is after `to`.
    pub fn validate(self) -> Result<Self, Error> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(Error::InvalidDateRange(from, to)),
            _ => Ok(self),
        }
    }
}
