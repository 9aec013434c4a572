//! Defines the app level error type and its conversion into JSON error responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use time::Date;

use crate::{category::CategoryId, transaction::TransactionId, user::UserID};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email and password did not match a registered user.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// A user tried to register with an email that is already in use.
    #[error("the email address is already in use")]
    DuplicateEmail,

    /// The user already has a category with this name.
    ///
    /// Category names are compared case-insensitively.
    #[error("a category named \"{0}\" already exists")]
    DuplicateCategoryName(String),

    /// The user ID does not refer to a registered user.
    #[error("could not find a user with the ID {0}")]
    UserNotFound(UserID),

    /// The category does not exist or belongs to a different user.
    #[error("could not find a category with the ID {0} for this user")]
    CategoryNotFound(CategoryId),

    /// The transaction does not exist or belongs to a different user.
    #[error("could not find a transaction with the ID {0} for this user")]
    TransactionNotFound(TransactionId),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An empty string was used for a user's name.
    #[error("name cannot be empty")]
    EmptyUserName,

    /// An empty string was used for a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// An empty string was used for a password.
    #[error("password cannot be empty")]
    EmptyPassword,

    /// The string is not a valid email address.
    #[error("\"{0}\" is not a valid email address")]
    InvalidEmail(String),

    /// The string is not a three letter currency code such as "USD".
    #[error(
        "\"{0}\" is not a valid currency code, expected three upper-case letters such as \"USD\""
    )]
    InvalidCurrencyCode(String),

    /// Transaction amounts must be zero or positive, the type says whether
    /// money came in or went out.
    #[error("amount cannot be negative, use the transaction type to record an expense")]
    NegativeAmount,

    /// Transaction amounts are stored with at most four decimal places.
    #[error("amount {0} has more than four decimal places")]
    AmountTooPrecise(String),

    /// Transaction amounts have at most fifteen digits before the decimal point.
    #[error("amount {0} is too large, it must be less than 1000000000000000")]
    AmountTooLarge(String),

    /// Category names are limited to 100 characters.
    #[error("category name cannot be longer than {0} characters")]
    CategoryNameTooLong(usize),

    /// Transaction descriptions are limited to 255 characters.
    #[error("description cannot be longer than {0} characters")]
    DescriptionTooLong(usize),

    /// A report total did not fit in a decimal.
    #[error("the report total is too large to calculate")]
    ReportOverflow,

    /// The month is outside of 1-12.
    #[error("{0} is not a valid month, expected a number from 1 to 12")]
    InvalidMonth(u8),

    /// The year is outside of the supported calendar range.
    #[error("{0} is not a supported year")]
    InvalidYear(i32),

    /// The start of a date range is after the end.
    #[error("the date range is empty: {0} is after {1}")]
    InvalidDateRange(Date, Date),

    /// The request body or query string could not be parsed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl Error {
    /// The HTTP status code the client should see for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::DuplicateEmail | Error::DuplicateCategoryName(_) => StatusCode::CONFLICT,
            Error::UserNotFound(_)
            | Error::CategoryNotFound(_)
            | Error::TransactionNotFound(_)
            | Error::NotFound => StatusCode::NOT_FOUND,
            Error::EmptyUserName
            | Error::EmptyCategoryName
            | Error::EmptyPassword
            | Error::InvalidEmail(_)
            | Error::InvalidCurrencyCode(_)
            | Error::NegativeAmount
            | Error::AmountTooPrecise(_)
            | Error::AmountTooLarge(_)
            | Error::CategoryNameTooLong(_)
            | Error::DescriptionTooLong(_)
            | Error::InvalidMonth(_)
            | Error::InvalidYear(_)
            | Error::InvalidDateRange(_, _)
            | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::HashingError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::ReportOverflow => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Internal details are for the server logs, not the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{Error, user::UserID};

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            Error::UserNotFound(UserID::new(1)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::CategoryNotFound(2).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::TransactionNotFound(3).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn duplicates_map_to_409() {
        assert_eq!(Error::DuplicateEmail.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            Error::DuplicateCategoryName("Food".to_owned()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn oversized_input_maps_to_400() {
        assert_eq!(
            Error::AmountTooLarge("1000000000000000".to_owned()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::CategoryNameTooLong(100).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::DescriptionTooLong(255).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn report_overflow_maps_to_500() {
        assert_eq!(
            Error::ReportOverflow.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_credentials_maps_to_401() {
        assert_eq!(
            Error::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn query_returned_no_rows_is_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let response = Error::HashingError("secret detail".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not read response body");
        let body = String::from_utf8_lossy(&body);
        assert!(!body.contains("secret detail"), "body leaked details: {body}");
    }
}
