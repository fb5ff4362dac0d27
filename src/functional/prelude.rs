//! Prelude for the validation engine
//!
//! This module re-exports the types most callers need to build a registry,
//! describe a form and run validations.

pub use crate::config::{DirectiveConfig, EngineConfig, ValidationOptions};
pub use crate::error::{EngineError, EngineResult};
pub use crate::functional::directive_resolver::DirectiveResolver;
pub use crate::functional::error_codes::{ErrorCode, FieldErrorList};
pub use crate::functional::validation_engine::{FormErrorMap, FormValidationEngine};
pub use crate::functional::validator_registry::{
    SharedRegistry, ValidatorContext, ValidatorRegistry,
};
pub use crate::models::field::{FieldAccessor, FieldLookup, FieldReference, FormAccessor, NoLookup};
pub use crate::models::form::{Form, InputField};

/// Creates a shared registry populated with the core validators, then lets
/// `extend` register additional ones before the registry is frozen.
///
/// # Errors
///
/// Returns an `EngineError` if `extend` tries to register an invalid name.
///
/// # Examples
///
/// ```
/// # use form_validator::functional::prelude::*;
/// let registry = create_registry(|registry| {
///     registry.register("zip", |value, _against, _ctx| {
///         Ok(if value.len() == 5 { vec![] } else { vec![ErrorCode::custom("ZIP_ERROR")] })
///     })
/// })
/// .expect("failed to create registry");
/// assert!(registry.contains("zip"));
/// assert!(registry.contains("email"));
/// ```
pub fn create_registry<F>(extend: F) -> EngineResult<SharedRegistry>
where
    F: FnOnce(&mut ValidatorRegistry) -> EngineResult<()>,
{
    let mut registry = ValidatorRegistry::with_core_validators()?;
    extend(&mut registry)?;
    Ok(registry.shared())
}

/// Creates a shared registry holding only the core validators.
pub fn create_default_registry() -> EngineResult<SharedRegistry> {
    create_registry(|_| Ok(()))
}
