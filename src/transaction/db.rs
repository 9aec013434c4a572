//! Database operations for transactions.
//!
//! Like categories, transactions are always looked up together with their owner.

use std::str::FromStr;

use rusqlite::{Connection, Row, types::Type};
use rust_decimal::Decimal;

use crate::{
    Error,
    category::CategoryName,
    transaction::{Transaction, TransactionFilter, TransactionId, TransactionRequest},
    user::UserID,
};

const SELECT_TRANSACTION: &str = "SELECT \"transaction\".id, type, amount, description, date, \
    category.id, category.name \
    FROM \"transaction\" \
    LEFT JOIN category ON \"transaction\".category_id = category.id";

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type TEXT NOT NULL CHECK (type IN ('INCOME', 'EXPENSE')),
            amount TEXT NOT NULL,
            description TEXT,
            date TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            category_id INTEGER,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
    )?;

    Ok(())
}

/// Insert a transaction for `user_id` and return its ID.
///
/// The caller should check that the category belongs to the user.
///
/// # Errors
/// Returns an [Error::SqlError] if the user or category does not exist, or there is some other
/// SQL error.
pub fn create_transaction(
    user_id: UserID,
    request: &TransactionRequest,
    connection: &Connection,
) -> Result<TransactionId, Error> {
    connection.execute(
        "INSERT INTO \"transaction\" (type, amount, description, date, user_id, category_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        (
            request.transaction_type,
            request.amount.to_string(),
            request.description.as_deref(),
            request.date,
            user_id.as_i64(),
            request.category_id,
        ),
    )?;

    Ok(connection.last_insert_rowid())
}

/// Retrieve a transaction owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `id` does not refer to one of the user's transactions,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "{SELECT_TRANSACTION} \
            WHERE \"transaction\".id = :id AND \"transaction\".user_id = :user_id"
        ))?
        .query_row(
            &[(":id", &id), (":user_id", &user_id.as_i64())],
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::TransactionNotFound(id),
            error => error.into(),
        })
}

/// Get the user's transactions within the bounds of `filter`, newest first.
///
/// Transactions on the same date are ordered by descending ID so the order is stable.
pub fn get_transactions_by_user(
    user_id: UserID,
    filter: TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_TRANSACTION} \
            WHERE \"transaction\".user_id = ?1 \
            AND (?2 IS NULL OR \"transaction\".date >= ?2) \
            AND (?3 IS NULL OR \"transaction\".date <= ?3) \
            ORDER BY \"transaction\".date DESC, \"transaction\".id DESC"
        ))?
        .query_map((user_id.as_i64(), filter.from, filter.to), map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the fields of one of the user's transactions.
///
/// # Errors
/// Returns [Error::TransactionNotFound] if the transaction does not exist or belongs to another
/// user.
pub fn update_transaction(
    id: TransactionId,
    user_id: UserID,
    request: &TransactionRequest,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE \"transaction\"
         SET type = ?1, amount = ?2, description = ?3, date = ?4, category_id = ?5
         WHERE id = ?6 AND user_id = ?7",
        (
            request.transaction_type,
            request.amount.to_string(),
            request.description.as_deref(),
            request.date,
            request.category_id,
            id,
            user_id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::TransactionNotFound(id));
    }

    Ok(())
}

/// Delete one of the user's transactions.
///
/// # Errors
/// Returns [Error::TransactionNotFound] if the transaction does not exist or belongs to another
/// user.
pub fn delete_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::TransactionNotFound(id));
    }

    Ok(())
}

/// Read a stored amount, which is kept as text so no precision is lost.
pub(crate) fn get_amount(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let raw_amount: String = row.get(index)?;

    Decimal::from_str(&raw_amount)
        .map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
        })
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let category_name = row
        .get::<usize, Option<String>>(6)?
        .map(|name| CategoryName::new_unchecked(&name));

    Ok(Transaction {
        id: row.get(0)?,
        transaction_type: row.get(1)?,
        amount: get_amount(row, 2)?,
        description: row.get(3)?,
        date: row.get(4)?,
        category_id: row.get(5)?,
        category_name,
    })
}
