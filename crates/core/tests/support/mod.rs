//! Shared test helpers for `sigma-core` integration tests.
//!
//! In-memory mocks for the core ports so session tests can focus on
//! behaviour instead of boilerplate.

pub mod credentials;
pub mod gateway;
