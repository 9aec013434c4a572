//! Transaction deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    db::with_transaction,
    transaction::{TransactionId, delete_transaction},
    user::{UserID, ensure_user_exists},
};

/// The state needed for deleting a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete one of the user's transactions.
///
/// # Errors
///
/// Returns [Error::UserNotFound] or [Error::TransactionNotFound] if either is missing.
pub fn delete_transaction_for_user(
    user_id: UserID,
    transaction_id: TransactionId,
    connection: &mut Connection,
) -> Result<(), Error> {
    with_transaction(connection, |transaction| {
        ensure_user_exists(user_id, transaction)?;
        delete_transaction(transaction_id, user_id, transaction)
    })
}

/// A route handler for deleting a transaction, responds with 204 No Content.
pub async fn delete_transaction_endpoint(
    Path((user_id, transaction_id)): Path<(i64, TransactionId)>,
    State(state): State<DeleteTransactionState>,
) -> Result<StatusCode, Error> {
    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_transaction_for_user(UserID::new(user_id), transaction_id, &mut connection)?;
    tracing::info!("Deleted transaction {transaction_id} of user {user_id}");

    Ok(StatusCode::NO_CONTENT)
}
