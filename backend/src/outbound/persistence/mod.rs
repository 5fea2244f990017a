//! PostgreSQL user store built on Diesel.
//!
//! Adapters here translate between Diesel rows and domain types only; they
//! hold no registration rules. Row structs (`models`) and the table DSL
//! (`schema`) stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use registration::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), registration::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registration")).await?;
//! let users = DieselUserRepository::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
