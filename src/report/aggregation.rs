//! Totals and category breakdowns over a window of transactions.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, transaction::TransactionType};

/// The chart label for expenses whose category was deleted.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// The parts of a transaction the reports need.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub category_name: Option<String>,
}

/// Income and expense totals for a period.
///
/// The balance is always income minus expenses, it is worked out when the summary is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    total_income: Decimal,
    total_expenses: Decimal,
    balance: Decimal,
}

impl Summary {
    /// Create a summary from the income and expense totals.
    pub fn new(total_income: Decimal, total_expenses: Decimal) -> Self {
        Self {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
        }
    }

    pub fn total_income(&self) -> Decimal {
        self.total_income
    }

    pub fn total_expenses(&self) -> Decimal {
        self.total_expenses
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

/// Spending per category, `labels[i]` is the category for `values[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

/// Add up the income and the expenses in `entries`.
///
/// # Errors
///
/// Returns [Error::ReportOverflow] if a total does not fit in a [Decimal].
pub fn summarize(entries: &[ReportEntry]) -> Result<Summary, Error> {
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;

    for entry in entries {
        let total = match entry.transaction_type {
            TransactionType::Income => &mut total_income,
            TransactionType::Expense => &mut total_expenses,
        };
        *total = checked_sum(*total, entry.amount)?;
    }

    Ok(Summary::new(total_income, total_expenses))
}

/// Sum the expenses in `entries` by category name.
///
/// Categories are listed in the order they first appear in `entries`. Income is ignored, and
/// expenses without a category are grouped under [UNCATEGORIZED_LABEL].
///
/// # Errors
///
/// Returns [Error::ReportOverflow] if a category's total does not fit in a [Decimal].
pub fn group_expenses_by_category(entries: &[ReportEntry]) -> Result<ChartData, Error> {
    let mut chart = ChartData::default();
    let mut label_index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        if entry.transaction_type != TransactionType::Expense {
            continue;
        }

        let label = entry.category_name.as_deref().unwrap_or(UNCATEGORIZED_LABEL);

        match label_index.get(label) {
            Some(&index) => {
                chart.values[index] = checked_sum(chart.values[index], entry.amount)?;
            }
            None => {
                label_index.insert(label, chart.labels.len());
                chart.labels.push(label.to_owned());
                chart.values.push(entry.amount);
            }
        }
    }

    Ok(chart)
}

fn checked_sum(total: Decimal, amount: Decimal) -> Result<Decimal, Error> {
    total.checked_add(amount).ok_or_else(|| {
        tracing::error!("report total overflowed adding {amount} to {total}");
        Error::ReportOverflow
    })
}
