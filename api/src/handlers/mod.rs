//! Request handler helpers.

pub mod error;

pub use error::{handle_domain_error, language_from_request};
