//! Administrative account lifecycle module

mod service;

#[cfg(test)]
mod tests;

pub use service::{AccountInvite, AdminService};
