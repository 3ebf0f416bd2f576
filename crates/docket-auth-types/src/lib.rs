//! Auth types shared across Docket services.
//!
//! Token verification happens upstream; services only read the identity the gateway injects.

pub mod identity;
