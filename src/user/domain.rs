//! Core user domain types.

use std::{fmt::Display, str::FromStr};

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::{Error, password::PasswordHash};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A validated, non-empty display name for a user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Create a user name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyUserName] if `name` is empty or just whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyUserName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create a user name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An ISO 4217 style currency code, e.g. "USD" or "NZD".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse a currency code.
    ///
    /// Lower-case input is accepted and converted to upper case.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidCurrencyCode] if `code` is not exactly three
    /// ASCII letters.
    pub fn new(code: &str) -> Result<Self, Error> {
        let code = code.trim();

        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_uppercase()))
        } else {
            Err(Error::InvalidCurrencyCode(code.to_owned()))
        }
    }

    /// Create a currency code without validation.
    pub fn new_unchecked(code: &str) -> Self {
        Self(code.to_owned())
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::new(s)
    }
}

/// Parse and validate an email address, trimming surrounding whitespace.
///
/// # Errors
///
/// This function will return an [Error::InvalidEmail] if `email` is not a valid address.
pub fn parse_email(email: &str) -> Result<EmailAddress, Error> {
    let email = email.trim();

    EmailAddress::from_str(email).map_err(|_| Error::InvalidEmail(email.to_owned()))
}

/// Parse an optional currency code where an absent or blank value means "no preference".
pub(crate) fn parse_optional_currency(code: Option<&str>) -> Result<Option<CurrencyCode>, Error> {
    match code.map(str::trim) {
        None | Some("") => Ok(None),
        Some(code) => CurrencyCode::new(code).map(Some),
    }
}

/// A user of the application.
///
/// The caller should ensure that `id` is unique.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The user's display name.
    pub name: UserName,
    /// The email address the user logs in with.
    pub email: EmailAddress,
    /// The user's password hash.
    pub password_hash: PasswordHash,
    /// The currency amounts should be displayed in, if the user has chosen one.
    pub preferred_currency: Option<CurrencyCode>,
}

impl User {
    /// The public view of the user, which leaves out the password hash.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.to_string(),
            preferred_currency: self.preferred_currency.clone(),
        }
    }
}

/// The data needed to insert a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub preferred_currency: Option<CurrencyCode>,
}

/// The user details that are safe to send to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserID,
    pub name: UserName,
    pub email: String,
    pub preferred_currency: Option<CurrencyCode>,
}


#[cfg(test)]
mod currency_code_tests {
    use crate::{
        Error,
        user::{CurrencyCode, domain::parse_optional_currency},
    };

    #[test]
    fn accepts_three_letter_code() {
        assert_eq!(CurrencyCode::new("NZD").unwrap().as_ref(), "NZD");
    }

    #[test]
    fn converts_lower_case_to_upper_case() {
        assert_eq!(CurrencyCode::new("eur").unwrap().as_ref(), "EUR");
    }

    #[test]
    fn rejects_wrong_length_and_digits() {
        assert_eq!(
            CurrencyCode::new("DOLLARS"),
            Err(Error::InvalidCurrencyCode("DOLLARS".to_owned()))
        );
        assert_eq!(
            CurrencyCode::new("U5D"),
            Err(Error::InvalidCurrencyCode("U5D".to_owned()))
        );
    }

    #[test]
    fn blank_optional_currency_means_no_preference() {
        assert_eq!(parse_optional_currency(None), Ok(None));
        assert_eq!(parse_optional_currency(Some("  ")), Ok(None));
    }
}
