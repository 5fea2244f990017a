//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL user store on Diesel, plus embedded
//!   migrations.
//! - **memory**: process-local user store for development and tests.
//! - **credentials**: Argon2id password hashing.
//!
//! Adapters convert between domain types and infrastructure representations
//! and carry no registration rules.

pub mod credentials;
pub mod memory;
pub mod persistence;
