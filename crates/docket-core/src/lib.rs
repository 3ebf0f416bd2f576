//! Cross-cutting HTTP, logging, config and persistence helpers shared by Docket services.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
