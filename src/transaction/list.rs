//! Endpoints for reading transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{
        Transaction, TransactionFilter, TransactionId, get_transaction, get_transactions_by_user,
    },
    user::{UserID, ensure_user_exists},
};

/// The state needed for reading transactions.
#[derive(Debug, Clone)]
pub struct TransactionListState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Get the user's transactions, newest first, optionally limited to an inclusive date range.
///
/// # Errors
///
/// Returns [Error::InvalidDateRange] if `filter.from` is after `filter.to`, or
/// [Error::UserNotFound] if the user does not exist.
pub fn list_transactions(
    user_id: UserID,
    filter: TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let filter = filter.validate()?;
    ensure_user_exists(user_id, connection)?;

    get_transactions_by_user(user_id, filter, connection)
}

/// A route handler for listing a user's transactions.
///
/// Takes the optional query parameters `from` and `to` as ISO dates.
pub async fn list_transactions_endpoint(
    Path(user_id): Path<i64>,
    State(state): State<TransactionListState>,
    filter: Result<Query<TransactionFilter>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let Query(filter) = filter?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    list_transactions(UserID::new(user_id), filter, &connection).map(Json)
}

/// A route handler for getting one of a user's transactions.
pub async fn get_transaction_endpoint(
    Path((user_id, transaction_id)): Path<(i64, TransactionId)>,
    State(state): State<TransactionListState>,
) -> Result<Json<Transaction>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_transaction(transaction_id, UserID::new(user_id), &connection).map(Json)
}

#[cfg(test)]
mod list_transactions_tests {
    use time::macros::date;

    use crate::{
        Error,
        test_utils::{get_test_connection, insert_test_user},
        transaction::{TransactionFilter, list_transactions},
        user::UserID,
    };

    #[test]
    fn list_fails_for_missing_user() {
        let connection = get_test_connection();

        assert_eq!(
            list_transactions(UserID::new(4), TransactionFilter::default(), &connection),
            Err(Error::UserNotFound(UserID::new(4)))
        );
    }

    #[test]
    fn list_is_empty_for_new_user() {
        let connection = get_test_connection();
        let user = insert_test_user("test@example.com", &connection);

        assert_eq!(
            list_transactions(user.id, TransactionFilter::default(), &connection),
            Ok(vec![])
        );
    }

    #[test]
    fn list_rejects_inverted_range() {
        let connection = get_test_connection();
        let user = insert_test_user("test@example.com", &connection);
        let filter = TransactionFilter {
            from: Some(date!(2024 - 02 - 01)),
            to: Some(date!(2024 - 01 - 01)),
        };

        assert_eq!(
            list_transactions(user.id, filter, &connection),
            Err(Error::InvalidDateRange(
                date!(2024 - 02 - 01),
                date!(2024 - 01 - 01)
            ))
        );
    }
}
