pub mod directive_resolver;
pub mod error_codes;
pub mod length_bounds;
pub mod prelude;
pub mod validation_engine;
pub mod validation_rules;
pub mod validator_registry;
