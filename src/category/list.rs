//! Endpoints for reading categories.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, CategoryId, get_categories_by_user, get_category},
    user::{UserID, ensure_user_exists},
};

/// The state needed for reading categories.
#[derive(Debug, Clone)]
pub struct CategoryListState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Get all of the user's categories, ordered by name.
///
/// # Errors
///
/// Returns [Error::UserNotFound] if the user does not exist.
pub fn list_categories(user_id: UserID, connection: &Connection) -> Result<Vec<Category>, Error> {
    ensure_user_exists(user_id, connection)?;
    get_categories_by_user(user_id, connection)
}

/// A route handler for listing a user's categories.
pub async fn list_categories_endpoint(
    Path(user_id): Path<i64>,
    State(state): State<CategoryListState>,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    list_categories(UserID::new(user_id), &connection).map(Json)
}

/// A route handler for getting one of a user's categories.
pub async fn get_category_endpoint(
    Path((user_id, category_id)): Path<(i64, CategoryId)>,
    State(state): State<CategoryListState>,
) -> Result<Json<Category>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_category(category_id, UserID::new(user_id), &connection).map(Json)
}
