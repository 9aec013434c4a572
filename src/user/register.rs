//! Registering new users.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    db::with_transaction,
    endpoints::{self, format_endpoint},
    password::{PasswordHash, ValidatedPassword},
    user::{
        NewUser, User, UserName, create_user,
        db::email_exists,
        domain::{parse_email, parse_optional_currency},
    },
};

/// The JSON body for registering a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub preferred_currency: Option<String>,
}

/// The state needed for registering a user.
#[derive(Debug, Clone)]
pub struct RegisterState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub password_hash_cost: u32,
}

impl FromRef<AppState> for RegisterState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            password_hash_cost: state.password_hash_cost,
        }
    }
}

/// Validate the fields of a registration request and hash the password.
///
/// Hashing is slow on purpose, so this should be done before taking the database lock.
///
/// # Errors
///
/// Returns a validation error for an empty name, an invalid email, an empty password or an
/// invalid currency code, or [Error::HashingError] if the password could not be hashed.
pub fn validate_registration(
    request: &RegistrationRequest,
    password_hash_cost: u32,
) -> Result<NewUser, Error> {
    let name = UserName::new(&request.name)?;
    let email = parse_email(&request.email)?;
    let password = ValidatedPassword::new(&request.password)?;
    let preferred_currency = parse_optional_currency(request.preferred_currency.as_deref())?;
    let password_hash = PasswordHash::new(password, password_hash_cost)?;

    Ok(NewUser {
        name,
        email,
        password_hash,
        preferred_currency,
    })
}

/// Store a new user unless their email is already registered.
///
/// # Errors
///
/// Returns [Error::DuplicateEmail] if the email is in use.
pub fn register_user(new_user: NewUser, connection: &mut Connection) -> Result<User, Error> {
    with_transaction(connection, |transaction| {
        if email_exists(new_user.email.as_str(), transaction)? {
            return Err(Error::DuplicateEmail);
        }

        create_user(new_user, transaction)
    })
}

/// A route handler for registering a new user.
///
/// Responds with 201 Created, the new user's profile and the profile's URI in the `Location`
/// header.
pub async fn register_endpoint(
    State(state): State<RegisterState>,
    request: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(request) = request?;
    let new_user = validate_registration(&request, state.password_hash_cost)?;

    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let user = register_user(new_user, &mut connection)?;
    tracing::info!("Registered user {}", user.id);

    let location = format_endpoint(endpoints::USER, &[user.id.as_i64()]);

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(user.profile()),
    )
        .into_response())
}
