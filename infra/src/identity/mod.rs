//! Identity provider module
//!
//! HTTP client implementation of the core identity provider boundary.

pub mod http_identity;

pub use http_identity::HttpIdentityProvider;
