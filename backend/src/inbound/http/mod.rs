//! HTTP inbound adapter exposing the registration resource and probes.

pub mod envelope;
pub mod error;
pub mod health;
pub mod registration;
pub mod state;

pub use error::ApiResult;
