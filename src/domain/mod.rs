//! Domain layer - Pure business abstractions
//!
//! This layer contains no Axum and no SeaORM entities.
//! Only the entities exchanged with the API, repository trait definitions
//! and domain error types.

pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::*;
