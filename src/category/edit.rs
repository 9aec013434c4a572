//! Category renaming endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::JsonRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{
        Category, CategoryId, CategoryName, CategoryRequest, category_name_taken, get_category,
        update_category,
    },
    db::with_transaction,
    user::{UserID, ensure_user_exists},
};

/// The state needed for renaming a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Rename one of the user's categories.
///
/// Renaming a category to a different casing of its own name is allowed.
///
/// # Errors
///
/// Returns [Error::UserNotFound] or [Error::CategoryNotFound] if either is missing,
/// [Error::EmptyCategoryName] for a blank name, or [Error::DuplicateCategoryName] if another of
/// the user's categories already has the name.
pub fn rename_category(
    user_id: UserID,
    category_id: CategoryId,
    new_name: &str,
    connection: &mut Connection,
) -> Result<Category, Error> {
    let name = CategoryName::new(new_name)?;

    with_transaction(connection, |transaction| {
        ensure_user_exists(user_id, transaction)?;
        get_category(category_id, user_id, transaction)?;

        if category_name_taken(user_id, &name, Some(category_id), transaction)? {
            return Err(Error::DuplicateCategoryName(name.to_string()));
        }

        update_category(category_id, user_id, &name, transaction)?;

        Ok(Category {
            id: category_id,
            name,
        })
    })
}

/// A route handler for renaming a category.
pub async fn update_category_endpoint(
    Path((user_id, category_id)): Path<(i64, CategoryId)>,
    State(state): State<UpdateCategoryState>,
    request: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Json<Category>, Error> {
    let Json(request) = request?;

    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    rename_category(
        UserID::new(user_id),
        category_id,
        &request.name,
        &mut connection,
    )
    .map(Json)
}
