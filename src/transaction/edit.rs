//! Transaction editing endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::JsonRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::get_category,
    db::with_transaction,
    transaction::{
        Transaction, TransactionId, TransactionRequest, get_transaction, update_transaction,
        validate_amount, validate_description,
    },
    user::{UserID, ensure_user_exists},
};

/// The state needed for editing a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Overwrite one of the user's transactions with the values in `request`.
///
/// The category is only checked if it differs from the transaction's current category.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount], [Error::AmountTooLarge] or [Error::AmountTooPrecise] if the amount
///   cannot be stored,
/// - [Error::DescriptionTooLong] if the description is too long,
/// - [Error::UserNotFound] or [Error::TransactionNotFound] if either is missing,
/// - or [Error::CategoryNotFound] if the new category is not one of the user's categories.
pub fn edit_transaction(
    user_id: UserID,
    transaction_id: TransactionId,
    request: &TransactionRequest,
    connection: &mut Connection,
) -> Result<Transaction, Error> {
    validate_amount(request.amount)?;
    validate_description(request.description.as_deref())?;

    with_transaction(connection, |transaction| {
        ensure_user_exists(user_id, transaction)?;
        let existing = get_transaction(transaction_id, user_id, transaction)?;

        if existing.category_id != Some(request.category_id) {
            get_category(request.category_id, user_id, transaction)?;
        }

        update_transaction(transaction_id, user_id, request, transaction)?;
        get_transaction(transaction_id, user_id, transaction)
    })
}

/// A route handler for editing a transaction.
pub async fn update_transaction_endpoint(
    Path((user_id, transaction_id)): Path<(i64, TransactionId)>,
    State(state): State<EditTransactionState>,
    request: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<Transaction>, Error> {
    let Json(request) = request?;

    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    edit_transaction(
        UserID::new(user_id),
        transaction_id,
        &request,
        &mut connection,
    )
    .map(Json)
}
