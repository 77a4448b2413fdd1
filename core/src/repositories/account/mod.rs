//! Account repository module.

mod r#trait;
pub use r#trait::{AccountRepository, FailedAttempt};

mod mock;
pub use mock::MockAccountRepository;
