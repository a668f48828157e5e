//! # API Shared
//!
//! Shared utilities and definitions for NeuralCare APIs.
//!
//! Contains:
//! - Wire types (`dto` module) with OpenAPI schemas
//! - Conversions between wire types and core types
//! - Shared services like `HealthService`

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
