//! Outbound adapters implementing domain ports.
//!
//! - **memory**: in-memory directory and identity stores
//! - **credentials**: HS256 JSON Web Token codec and its configuration
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod credentials;
pub mod memory;
