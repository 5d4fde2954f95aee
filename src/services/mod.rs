//! Services Layer
//!
//! This module contains business logic extracted from HTTP handlers.
//! Every function works against the repository traits, never a concrete store.

pub mod catalog_service;
pub mod class_service;
pub mod company_service;
pub mod consult_service;
