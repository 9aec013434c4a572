//! Checking a user's email and password.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    user::{UserProfile, get_user_by_email},
};

/// The JSON body for logging in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogInRequest {
    pub email: String,
    pub password: String,
}

/// The state needed for logging in.
#[derive(Debug, Clone)]
pub struct LogInState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Get the profile of the user registered with `email` if `password` matches.
///
/// An unknown email or a wrong password are both expected outcomes and give `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the database could not be queried or the stored hash is invalid.
pub fn log_in(
    email: &str,
    password: &str,
    connection: &Connection,
) -> Result<Option<UserProfile>, Error> {
    let user = match get_user_by_email(email.trim(), connection) {
        Ok(user) => user,
        Err(Error::NotFound) => return Ok(None),
        Err(error) => return Err(error),
    };

    let is_password_correct = user
        .password_hash
        .verify(password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    Ok(is_password_correct.then(|| user.profile()))
}

/// A route handler for logging in a user.
///
/// Responds with the user's profile, or 401 Unauthorized if the email and password do not match
/// a registered user.
pub async fn log_in_endpoint(
    State(state): State<LogInState>,
    request: Result<Json<LogInRequest>, JsonRejection>,
) -> Result<Json<UserProfile>, Error> {
    let Json(request) = request?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match log_in(&request.email, &request.password, &connection)? {
        Some(profile) => Ok(Json(profile)),
        None => {
            tracing::debug!("Failed log in attempt for {}", request.email);
            Err(Error::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod log_in_tests {
    use crate::{
        password::PasswordHash,
        test_utils::{TEST_HASH_COST, get_test_connection},
        user::{NewUser, UserName, create_user, log_in, parse_email},
    };

    fn insert_user(connection: &rusqlite::Connection) {
        create_user(
            NewUser {
                name: UserName::new_unchecked("Ada"),
                email: parse_email("ada@example.com").unwrap(),
                password_hash: PasswordHash::from_raw_password("hunter2", TEST_HASH_COST)
                    .unwrap(),
                preferred_currency: None,
            },
            connection,
        )
        .unwrap();
    }

    #[test]
    fn log_in_succeeds_with_correct_password() {
        let connection = get_test_connection();
        insert_user(&connection);

        let profile = log_in("ada@example.com", "hunter2", &connection)
            .unwrap()
            .expect("expected a profile");

        assert_eq!(profile.email, "ada@example.com");
    }

    #[test]
    fn log_in_with_wrong_password_is_none() {
        let connection = get_test_connection();
        insert_user(&connection);

        assert_eq!(log_in("ada@example.com", "hunter3", &connection), Ok(None));
    }

    #[test]
    fn log_in_with_unknown_email_is_none() {
        let connection = get_test_connection();

        assert_eq!(log_in("nobody@example.com", "hunter2", &connection), Ok(None));
    }
}
