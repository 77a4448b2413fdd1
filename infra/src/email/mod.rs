//! Email module
//!
//! Transactional email sender implementations:
//! - `HttpEmailSender` - production sends through a JSON email API
//! - `MockEmailSender` - console output for development and testing

pub mod http_email;
pub mod mock_email;

pub use http_email::HttpEmailSender;
pub use mock_email::MockEmailSender;
