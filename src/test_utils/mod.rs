#![allow(missing_docs)]

use axum_test::{TestResponse, TestServer};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::{
    AppState, build_router, db::initialize, endpoints, password::PasswordHash,
    user::{NewUser, User, UserName, UserProfile, create_user, parse_email},
};

/// The lowest cost bcrypt accepts, keeps the tests fast.
pub(crate) const TEST_HASH_COST: u32 = 4;

/// Parse a decimal literal such as "12.50".
#[track_caller]
pub(crate) fn amount(text: &str) -> Decimal {
    text.parse().expect("Invalid test amount")
}

pub(crate) fn get_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    connection
}

pub(crate) fn get_test_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection, TEST_HASH_COST).expect("Could not create app state")
}

pub(crate) fn get_test_server() -> TestServer {
    let app = build_router(get_test_app_state());

    TestServer::try_new(app).expect("Could not create test server.")
}

/// Insert a user directly into the database, skipping password hashing.
pub(crate) fn insert_test_user(email: &str, connection: &Connection) -> User {
    create_user(
        NewUser {
            name: UserName::new_unchecked("Test User"),
            email: parse_email(email).expect("Invalid test email"),
            password_hash: PasswordHash::new_unchecked("not a real hash"),
            preferred_currency: None,
        },
        connection,
    )
    .expect("Could not create test user")
}

/// Register a user through the API.
pub(crate) async fn register_test_user(server: &TestServer, email: &str) -> UserProfile {
    let response = server
        .post(endpoints::REGISTER)
        .json(&json!({
            "name": "Test User",
            "email": email,
            "password": "hunter2",
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<UserProfile>()
}

#[track_caller]
pub(crate) fn assert_error_body(response: &TestResponse) {
    let body = response.json::<Value>();

    assert!(
        body.get("error").and_then(Value::as_str).is_some(),
        "expected a JSON error body, got {body}"
    );
}
