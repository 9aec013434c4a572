//! Transaction creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::get_category,
    db::with_transaction,
    endpoints::{self, format_endpoint},
    transaction::{
        Transaction, TransactionRequest, create_transaction, get_transaction, validate_amount,
        validate_description,
    },
    user::{UserID, ensure_user_exists},
};

/// The state needed for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Record a new transaction for the user.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount], [Error::AmountTooLarge] or [Error::AmountTooPrecise] if the amount
///   cannot be stored,
/// - [Error::DescriptionTooLong] if the description is too long,
/// - [Error::UserNotFound] if the user does not exist,
/// - or [Error::CategoryNotFound] if the category is not one of the user's categories.
pub fn add_transaction(
    user_id: UserID,
    request: &TransactionRequest,
    connection: &mut Connection,
) -> Result<Transaction, Error> {
    validate_amount(request.amount)?;
    validate_description(request.description.as_deref())?;

    with_transaction(connection, |transaction| {
        ensure_user_exists(user_id, transaction)?;
        get_category(request.category_id, user_id, transaction)?;

        let id = create_transaction(user_id, request, transaction)?;
        get_transaction(id, user_id, transaction)
    })
}

/// A route handler for creating a transaction.
///
/// Responds with 201 Created and the new transaction.
pub async fn create_transaction_endpoint(
    Path(user_id): Path<i64>,
    State(state): State<CreateTransactionState>,
    request: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(request) = request?;

    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = add_transaction(UserID::new(user_id), &request, &mut connection)?;
    let location = format_endpoint(endpoints::TRANSACTION, &[user_id, transaction.id]);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(transaction)).into_response())
}
