//! Database operations for users.

use email_address::EmailAddress;
use rusqlite::{Connection, Row};

use crate::{
    Error,
    password::PasswordHash,
    user::{CurrencyCode, NewUser, User, UserID, UserName},
};

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                preferred_currency TEXT
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns a:
/// - [Error::DuplicateEmail] if the email is already in use,
/// - or [Error::SqlError] if some other SQL related error occurred.
pub fn create_user(new_user: NewUser, connection: &Connection) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (name, email, password, preferred_currency) VALUES (?1, ?2, ?3, ?4)",
        (
            new_user.name.as_ref(),
            new_user.email.as_str(),
            new_user.password_hash.as_ref(),
            new_user
                .preferred_currency
                .as_ref()
                .map(|currency| currency.as_ref()),
        ),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        name: new_user.name,
        email: new_user.email,
        password_hash: new_user.password_hash,
        preferred_currency: new_user.preferred_currency,
    })
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(
            "SELECT id, name, email, password, preferred_currency FROM user WHERE id = :id",
        )?
        .query_row(&[(":id", &user_id.as_i64())], map_row)
        .map_err(|error| error.into())
}

/// Get the user registered with `email`.
///
/// # Errors
///
/// Returns [Error::NotFound] if no user has registered with `email`.
pub fn get_user_by_email(email: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(
            "SELECT id, name, email, password, preferred_currency FROM user WHERE email = :email",
        )?
        .query_row(&[(":email", &email)], map_row)
        .map_err(|error| error.into())
}

/// Check whether a user has registered with `email`.
pub fn email_exists(email: &str, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM user WHERE email = ?1)",
            [email],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Return an error unless `user_id` belongs to a registered user.
///
/// # Errors
///
/// Returns [Error::UserNotFound] if there is no such user.
pub fn ensure_user_exists(user_id: UserID, connection: &Connection) -> Result<(), Error> {
    let exists: bool = connection.query_row(
        "SELECT EXISTS(SELECT 1 FROM user WHERE id = ?1)",
        [user_id.as_i64()],
        |row| row.get(0),
    )?;

    if exists {
        Ok(())
    } else {
        Err(Error::UserNotFound(user_id))
    }
}

/// Overwrite the name and preferred currency of a user.
///
/// # Errors
///
/// Returns [Error::UserNotFound] if there is no such user.
pub fn update_user_profile(
    user_id: UserID,
    name: &UserName,
    preferred_currency: Option<&CurrencyCode>,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE user SET name = ?1, preferred_currency = ?2 WHERE id = ?3",
        (
            name.as_ref(),
            preferred_currency.map(|currency| currency.as_ref()),
            user_id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UserNotFound(user_id));
    }

    Ok(())
}

/// Delete a user along with their categories and transactions.
///
/// The categories and transactions are removed by the `ON DELETE CASCADE` foreign keys.
///
/// # Errors
///
/// Returns [Error::UserNotFound] if there is no such user.
pub fn delete_user(user_id: UserID, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM user WHERE id = ?1", [user_id.as_i64()])?;

    if rows_affected == 0 {
        return Err(Error::UserNotFound(user_id));
    }

    Ok(())
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let raw_email: String = row.get(2)?;
    let raw_password_hash: String = row.get(3)?;
    let raw_currency: Option<String> = row.get(4)?;

    Ok(User {
        id: UserID::new(raw_id),
        name: UserName::new_unchecked(&raw_name),
        email: EmailAddress::new_unchecked(raw_email),
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        preferred_currency: raw_currency.map(|code| CurrencyCode::new_unchecked(&code)),
    })
}
