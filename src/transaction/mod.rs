//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` view and the request used to create or update one
//! - Database functions for storing and querying a user's transactions
//! - Route handlers for the transaction endpoints

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::{add_transaction, create_transaction_endpoint};
pub use db::{
    create_transaction, create_transaction_table, delete_transaction, get_transaction,
    get_transactions_by_user, update_transaction,
};
pub(crate) use db::get_amount;
pub use delete::{delete_transaction_endpoint, delete_transaction_for_user};
pub use domain::{
    MAX_AMOUNT_INTEGER_DIGITS, MAX_AMOUNT_SCALE, MAX_DESCRIPTION_LENGTH, Transaction,
    TransactionFilter, TransactionId, TransactionRequest, TransactionType, validate_amount,
    validate_description,
};
pub use edit::{edit_transaction, update_transaction_endpoint};
pub use list::{get_transaction_endpoint, list_transactions, list_transactions_endpoint};
