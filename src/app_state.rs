//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, password::PasswordHash};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The bcrypt cost used when hashing the passwords of new users.
    pub password_hash_cost: u32,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, password_hash_cost: u32) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            password_hash_cost,
        })
    }

    /// Create a new [AppState] that hashes passwords with [PasswordHash::DEFAULT_COST].
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn with_default_cost(db_connection: Connection) -> Result<Self, Error> {
        Self::new(db_connection, PasswordHash::DEFAULT_COST)
    }
}
