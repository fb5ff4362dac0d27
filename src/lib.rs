//! Declarative form validation engine.
//!
//! Fields carry a comma-separated list of validator names plus one
//! against-parameter per validator. The engine runs every listed validator
//! through a [`functional::validator_registry::ValidatorRegistry`] and
//! collects symbolic [`functional::error_codes::ErrorCode`]s per field.

pub mod config;
pub mod error;
pub mod functional;
pub mod models;
pub mod services;
pub mod utils;
