//! Database initialization and helpers shared by the domain modules.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, category::create_category_table, transaction::create_transaction_table,
    user::create_user_table,
};

/// Create the tables for the domain models if they do not exist.
///
/// Foreign key enforcement is switched on for `connection`, the cascading deletes rely on it.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Run `operation` inside an immediate SQL transaction and commit if it succeeds.
///
/// The write lock is taken when the transaction starts, so a check followed by a write
/// (e.g., "does this name exist?" then "insert it") cannot interleave with another writer.
/// If `operation` returns an error the transaction is rolled back.
///
/// # Errors
/// Returns the error from `operation`, or an SQL error if the transaction could not be started
/// or committed.
pub fn with_transaction<T>(
    connection: &mut Connection,
    operation: impl FnOnce(&SqlTransaction) -> Result<T, Error>,
) -> Result<T, Error> {
    let transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let result = operation(&transaction)?;
    transaction.commit()?;

    Ok(result)
}
