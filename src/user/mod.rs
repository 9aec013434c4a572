//! User registration, log in and profile management.

mod db;
mod domain;
mod log_in;
mod profile;
mod register;

pub use db::{
    create_user, create_user_table, delete_user, email_exists, ensure_user_exists,
    get_user_by_email, get_user_by_id, update_user_profile,
};
pub use domain::{CurrencyCode, NewUser, User, UserID, UserName, UserProfile, parse_email};
pub use log_in::{LogInRequest, log_in, log_in_endpoint};
pub use profile::{
    ProfileUpdate, get_profile, get_user_endpoint, update_profile, update_user_endpoint,
};
pub use register::{RegistrationRequest, register_endpoint, register_user, validate_registration};
