//! Reading and updating a user's profile.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::JsonRejection},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    db::with_transaction,
    user::{
        UserID, UserName, UserProfile, get_user_by_id, update_user_profile,
        domain::parse_optional_currency,
    },
};

/// The JSON body for updating a profile.
///
/// The email and password cannot be changed this way, those fields are ignored if present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    #[serde(default)]
    pub preferred_currency: Option<String>,
}

/// The state needed for the user profile endpoints.
#[derive(Debug, Clone)]
pub struct UserProfileState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UserProfileState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Get the profile of the user with `user_id`.
///
/// # Errors
///
/// Returns [Error::UserNotFound] if there is no such user.
pub fn get_profile(user_id: UserID, connection: &Connection) -> Result<UserProfile, Error> {
    match get_user_by_id(user_id, connection) {
        Ok(user) => Ok(user.profile()),
        Err(Error::NotFound) => Err(Error::UserNotFound(user_id)),
        Err(error) => Err(error),
    }
}

/// Change the name and preferred currency of a user.
///
/// An absent or blank currency clears the preference.
///
/// # Errors
///
/// Returns [Error::UserNotFound] if there is no such user, or a validation error for an empty
/// name or an invalid currency code.
pub fn update_profile(
    user_id: UserID,
    update: &ProfileUpdate,
    connection: &mut Connection,
) -> Result<UserProfile, Error> {
    let name = UserName::new(&update.name)?;
    let preferred_currency = parse_optional_currency(update.preferred_currency.as_deref())?;

    with_transaction(connection, |transaction| {
        update_user_profile(user_id, &name, preferred_currency.as_ref(), transaction)?;
        get_profile(user_id, transaction)
    })
}

/// A route handler for getting a user's profile.
pub async fn get_user_endpoint(
    Path(user_id): Path<i64>,
    State(state): State<UserProfileState>,
) -> Result<Json<UserProfile>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_profile(UserID::new(user_id), &connection).map(Json)
}

/// A route handler for updating a user's profile.
pub async fn update_user_endpoint(
    Path(user_id): Path<i64>,
    State(state): State<UserProfileState>,
    request: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<UserProfile>, Error> {
    let Json(update) = request?;

    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    update_profile(UserID::new(user_id), &update, &mut connection).map(Json)
}
