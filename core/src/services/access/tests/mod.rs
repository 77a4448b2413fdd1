//! Tests for the access services

pub mod mocks;

mod attempt_tracker_tests;
mod service_tests;
