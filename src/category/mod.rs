//! Categories for grouping a user's transactions.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::{add_category, create_category_endpoint};
pub use db::{
    category_name_taken, create_category, create_category_table, delete_category,
    get_categories_by_user, get_category, update_category,
};
pub use delete::{delete_category_endpoint, delete_category_for_user};
pub use domain::{Category, CategoryId, CategoryName, CategoryRequest, MAX_CATEGORY_NAME_LENGTH};
pub use edit::{rename_category, update_category_endpoint};
pub use list::{get_category_endpoint, list_categories, list_categories_endpoint};
