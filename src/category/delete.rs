//! Category deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{CategoryId, delete_category},
    db::with_transaction,
    user::{UserID, ensure_user_exists},
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete one of the user's categories.
///
/// The category is deleted even if transactions still refer to it. Those transactions are kept
/// and no longer have a category.
///
/// # Errors
///
/// Returns [Error::UserNotFound] or [Error::CategoryNotFound] if either is missing.
pub fn delete_category_for_user(
    user_id: UserID,
    category_id: CategoryId,
    connection: &mut Connection,
) -> Result<(), Error> {
    with_transaction(connection, |transaction| {
        ensure_user_exists(user_id, transaction)?;
        delete_category(category_id, user_id, transaction)
    })
}

/// A route handler for deleting a category, responds with 204 No Content.
pub async fn delete_category_endpoint(
    Path((user_id, category_id)): Path<(i64, CategoryId)>,
    State(state): State<DeleteCategoryState>,
) -> Result<StatusCode, Error> {
    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_category_for_user(UserID::new(user_id), category_id, &mut connection)?;
    tracing::info!("Deleted category {category_id} of user {user_id}");

    Ok(StatusCode::NO_CONTENT)
}


#[cfg(test)]
mod delete_category_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        category::Category,
        endpoints::{self, format_endpoint},
        test_utils::{get_test_server, register_test_user},
    };

    #[tokio::test]
    async fn delete_category_returns_no_content() {
        let server = get_test_server();
        let user = register_test_user(&server, "test@example.com").await;
        let category = server
            .post(&format_endpoint(endpoints::CATEGORIES, &[user.id.as_i64()]))
            .json(&json!({ "name": "Food" }))
            .await
            .json::<Category>();
        let category_path =
            format_endpoint(endpoints::CATEGORY, &[user.id.as_i64(), category.id]);

        server.delete(&category_path).await.assert_status(StatusCode::NO_CONTENT);

        server.get(&category_path).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_missing_category_is_not_found() {
        let server = get_test_server();
        let user = register_test_user(&server, "test@example.com").await;

        server
            .delete(&format_endpoint(endpoints::CATEGORY, &[user.id.as_i64(), 99]))
            .await
            .assert_status_not_found();
    }
}
