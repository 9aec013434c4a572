//! Category creation endpoint.

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
    category::{Category, CategoryName, CategoryRequest, category_name_taken, create_category},
    db::with_transaction,
    endpoints::{self, format_endpoint},
    user::{UserID, ensure_user_exists},
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Add a category called `name` for the user.
///
/// # Errors
///
/// Returns [Error::EmptyCategoryName] for a blank name, [Error::UserNotFound] if the user does
/// not exist, or [Error::DuplicateCategoryName] if the user already has a category with this
/// name (ignoring case).
pub fn add_category(
    user_id: UserID,
    name: &str,
    connection: &mut Connection,
) -> Result<Category, Error> {
    let name = CategoryName::new(name)?;

    with_transaction(connection, |transaction| {
        ensure_user_exists(user_id, transaction)?;

        if category_name_taken(user_id, &name, None, transaction)? {
            return Err(Error::DuplicateCategoryName(name.to_string()));
        }

        create_category(user_id, name, transaction)
    })
}

/// A route handler for creating a category.
///
/// Responds with 201 Created and the new category.
pub async fn create_category_endpoint(
    Path(user_id): Path<i64>,
    State(state): State<CreateCategoryState>,
    request: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(request) = request?;

    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let category = add_category(UserID::new(user_id), &request.name, &mut connection)?;
    let location = format_endpoint(endpoints::CATEGORY, &[user_id, category.id]);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(category)).into_response())
}
