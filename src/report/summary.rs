//! Income, expense and balance totals.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    report::{
        ReportState, Summary, get_report_entries, month_range, summarize,
        window::{DateRange, year_range},
    },
    user::{UserID, ensure_user_exists},
};

/// The query parameters for the summary endpoint.
///
/// Without a month the summary covers the whole year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SummaryQuery {
    pub year: i32,
    pub month: Option<u8>,
}

/// Total the user's income and expenses for a month.
///
/// # Errors
///
/// Returns [Error::InvalidMonth] or [Error::InvalidYear] for a date outside the calendar, or
/// [Error::UserNotFound] if the user does not exist.
pub fn monthly_summary(
    user_id: UserID,
    year: i32,
    month: u8,
    connection: &Connection,
) -> Result<Summary, Error> {
    summary_for_range(user_id, month_range(year, month)?, connection)
}

/// Total the user's income and expenses for a year.
///
/// # Errors
///
/// Returns [Error::InvalidYear] for a year outside the calendar, or [Error::UserNotFound] if
/// the user does not exist.
pub fn yearly_summary(
    user_id: UserID,
    year: i32,
    connection: &Connection,
) -> Result<Summary, Error> {
    summary_for_range(user_id, year_range(year)?, connection)
}

fn summary_for_range(
    user_id: UserID,
    range: DateRange,
    connection: &Connection,
) -> Result<Summary, Error> {
    ensure_user_exists(user_id, connection)?;
    let entries = get_report_entries(user_id, range, connection)?;

    summarize(&entries)
}

/// A route handler for the monthly or yearly summary.
pub async fn summary_endpoint(
    Path(user_id): Path<i64>,
    State(state): State<ReportState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<Summary>, Error> {
    let Query(query) = query?;
    let user_id = UserID::new(user_id);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let summary = match query.month {
        Some(month) => monthly_summary(user_id, query.year, month, &connection)?,
        None => yearly_summary(user_id, query.year, &connection)?,
    };

    Ok(Json(summary))
}

#[cfg(test)]
mod summary_tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::{Date, macros::date};

    use crate::{
        Error,
        category::{CategoryId, add_category},
        report::{Summary, monthly_summary, yearly_summary},
        test_utils::{amount, get_test_connection, insert_test_user},
        transaction::{TransactionRequest, TransactionType, add_transaction},
        user::{User, UserID},
    };

    fn add_all(
        user: &User,
        transactions: &[(CategoryId, TransactionType, &str, Date)],
        connection: &mut Connection,
    ) {
        for &(category_id, transaction_type, raw_amount, date) in transactions {
            add_transaction(
                user.id,
                &TransactionRequest {
                    transaction_type,
                    amount: amount(raw_amount),
                    description: None,
                    date,
                    category_id,
                },
                connection,
            )
            .unwrap();
        }
    }

    #[test]
    fn monthly_summary_for_january_2024() {
        let mut connection = get_test_connection();
        let user = insert_test_user("test@example.com", &connection);
        let salary = add_category(user.id, "Salary", &mut connection).unwrap();
        let food = add_category(user.id, "Food", &mut connection).unwrap();
        add_all(
            &user,
            &[
                (salary.id, TransactionType::Income, "2000.00", date!(2024 - 01 - 01)),
                (food.id, TransactionType::Expense, "30.00", date!(2024 - 01 - 15)),
                (food.id, TransactionType::Expense, "20.00", date!(2024 - 01 - 31)),
                // Outside the window.
                (food.id, TransactionType::Expense, "99.00", date!(2023 - 12 - 31)),
                (food.id, TransactionType::Expense, "99.00", date!(2024 - 02 - 01)),
            ],
            &mut connection,
        );

        let summary = monthly_summary(user.id, 2024, 1, &connection).unwrap();

        assert_eq!(summary, Summary::new(amount("2000.00"), amount("50.00")));
        assert_eq!(summary.balance(), amount("1950.00"));
    }

    #[test]
    fn yearly_summary_for_empty_year_is_zero() {
        let connection = get_test_connection();
        let user = insert_test_user("test@example.com", &connection);

        let summary = yearly_summary(user.id, 2024, &connection).unwrap();

        assert_eq!(summary, Summary::new(Decimal::ZERO, Decimal::ZERO));
    }

    #[test]
    fn yearly_summary_ignores_other_users() {
        let mut connection = get_test_connection();
        let user = insert_test_user("test@example.com", &connection);
        let other_user = insert_test_user("other@example.com", &connection);
        let category = add_category(other_user.id, "Salary", &mut connection).unwrap();
        add_all(
            &other_user,
            &[(category.id, TransactionType::Income, "10", date!(2024 - 06 - 01))],
            &mut connection,
        );

        let summary = yearly_summary(user.id, 2024, &connection).unwrap();

        assert_eq!(summary.total_income(), Decimal::ZERO);
    }

    #[test]
    fn summary_for_missing_user_is_not_found() {
        let connection = get_test_connection();

        assert_eq!(
            yearly_summary(UserID::new(9), 2024, &connection),
            Err(Error::UserNotFound(UserID::new(9)))
        );
    }

    #[test]
    fn summary_rejects_invalid_month() {
        let connection = get_test_connection();
        let user = insert_test_user("test@example.com", &connection);

        assert_eq!(
            monthly_summary(user.id, 2024, 13, &connection),
            Err(Error::InvalidMonth(13))
        );
    }
}
