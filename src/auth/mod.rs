//! Identity gate
//!
//! Handles:
//! - Password hashing (argon2id)
//! - Signed bearer tokens carrying the principal
//! - Authentication extractor for handlers

mod middleware;
pub mod password;
pub mod token;

pub use middleware::CurrentUser;
pub use token::{Principal, create_token, verify_token};
