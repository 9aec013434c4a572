//! Spending per category for a month.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    report::{ChartData, ReportState, get_report_entries, group_expenses_by_category, month_range},
    user::{UserID, ensure_user_exists},
};

/// The query parameters for the category chart endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChartQuery {
    pub year: i32,
    pub month: u8,
}

/// Sum the user's expenses in a month by category.
///
/// Categories appear in the order of their first expense in the month. Categories without
/// expenses in the month are left out.
///
/// # Errors
///
/// Returns [Error::InvalidMonth] or [Error::InvalidYear] for a date outside the calendar, or
/// [Error::UserNotFound] if the user does not exist.
pub fn category_spending_chart(
    user_id: UserID,
    year: i32,
    month: u8,
    connection: &Connection,
) -> Result<ChartData, Error> {
    let range = month_range(year, month)?;
    ensure_user_exists(user_id, connection)?;
    let entries = get_report_entries(user_id, range, connection)?;

    group_expenses_by_category(&entries)
}

/// A route handler for the category spending chart.
pub async fn category_chart_endpoint(
    Path(user_id): Path<i64>,
    State(state): State<ReportState>,
    query: Result<Query<ChartQuery>, QueryRejection>,
) -> Result<Json<ChartData>, Error> {
    let Query(query) = query?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    category_spending_chart(UserID::new(user_id), query.year, query.month, &connection).map(Json)
}

#[cfg(test)]
mod category_chart_tests {
    use rusqlite::Connection;
    use time::{Date, macros::date};

    use crate::{
        Error,
        category::{CategoryId, add_category, delete_category_for_user},
        report::{UNCATEGORIZED_LABEL, category_spending_chart},
        test_utils::{amount, get_test_connection, insert_test_user},
        transaction::{TransactionRequest, TransactionType, add_transaction},
        user::{User, UserID},
    };

    fn add_expense(
        user: &User,
        category_id: CategoryId,
        raw_amount: &str,
        date: Date,
        connection: &mut Connection,
    ) {
        add_transaction(
            user.id,
            &TransactionRequest {
                transaction_type: TransactionType::Expense,
                amount: amount(raw_amount),
                description: None,
                date,
                category_id,
            },
            connection,
        )
        .unwrap();
    }

    #[test]
    fn groups_expenses_by_category() {
        let mut connection = get_test_connection();
        let user = insert_test_user("test@example.com", &connection);
        let food = add_category(user.id, "Food", &mut connection).unwrap();
        let rent = add_category(user.id, "Rent", &mut connection).unwrap();
        // A category with no expenses in the month.
        let travel = add_category(user.id, "Travel", &mut connection).unwrap();
        add_expense(&user, food.id, "30.00", date!(2024 - 01 - 02), &mut connection);
        add_expense(&user, rent.id, "800.00", date!(2024 - 01 - 03), &mut connection);
        add_expense(&user, food.id, "20.00", date!(2024 - 01 - 20), &mut connection);
        add_expense(&user, travel.id, "500.00", date!(2024 - 02 - 01), &mut connection);

        let chart = category_spending_chart(user.id, 2024, 1, &connection).unwrap();

        assert_eq!(chart.labels, ["Food", "Rent"]);
        assert_eq!(chart.values, [amount("50.00"), amount("800.00")]);
    }

    #[test]
    fn order_follows_first_expense_date_not_insertion() {
        let mut connection = get_test_connection();
        let user = insert_test_user("test@example.com", &connection);
        let food = add_category(user.id, "Food", &mut connection).unwrap();
        let rent = add_category(user.id, "Rent", &mut connection).unwrap();
        add_expense(&user, food.id, "10", date!(2024 - 01 - 20), &mut connection);
        add_expense(&user, rent.id, "10", date!(2024 - 01 - 01), &mut connection);

        let chart = category_spending_chart(user.id, 2024, 1, &connection).unwrap();

        assert_eq!(chart.labels, ["Rent", "Food"]);
    }

    #[test]
    fn expenses_of_deleted_category_are_uncategorized() {
        let mut connection = get_test_connection();
        let user = insert_test_user("test@example.com", &connection);
        let food = add_category(user.id, "Food", &mut connection).unwrap();
        add_expense(&user, food.id, "15.00", date!(2024 - 01 - 05), &mut connection);
        delete_category_for_user(user.id, food.id, &mut connection).unwrap();

        let chart = category_spending_chart(user.id, 2024, 1, &connection).unwrap();

        assert_eq!(chart.labels, [UNCATEGORIZED_LABEL]);
        assert_eq!(chart.values, [amount("15.00")]);
    }

    #[test]
    fn chart_for_missing_user_is_not_found() {
        let connection = get_test_connection();

        assert_eq!(
            category_spending_chart(UserID::new(2), 2024, 1, &connection),
            Err(Error::UserNotFound(UserID::new(2)))
        );
    }
}
