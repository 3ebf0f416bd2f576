//! Domain types shared across all Docket crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; `infra/` and `handlers/` convert to and from them.

pub mod account;
pub mod id;
pub mod pagination;
pub mod priority;
