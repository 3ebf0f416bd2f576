//! Test utilities for Docket services.
//!
//! Provides `MockAuth` for injecting gateway identity headers.
//! Import in `#[cfg(test)]` blocks and integration tests only.

pub mod auth;
