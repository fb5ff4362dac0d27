//! Reads validator directives from field attributes.
//!
//! A field opts into validation with one attribute holding a comma-separated
//! list of validator names (`validators="mandatory,length"`) and carries one
//! attribute per validator for its against-parameter (`against-length="]2,5["`).

use crate::config::DirectiveConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::field::FieldAccessor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveResolver {
    validators_attribute: String,
    against_prefix: String,
}

impl Default for DirectiveResolver {
    fn default() -> Self {
        Self::from_config(&DirectiveConfig::default())
    }
}

impl DirectiveResolver {
    pub fn new(validators_attribute: &str, against_prefix: &str) -> Self {
        Self {
            validators_attribute: validators_attribute.to_string(),
            against_prefix: against_prefix.to_string(),
        }
    }

    pub fn from_config(config: &DirectiveConfig) -> Self {
        Self::new(&config.validators_attribute, &config.against_prefix)
    }

    pub fn validators_attribute(&self) -> &str {
        &self.validators_attribute
    }

    /// Whether the field carries a validator list at all.
    pub fn has_directive<F: FieldAccessor + ?Sized>(&self, field: &F) -> bool {
        field.attribute(&self.validators_attribute).is_some()
    }

    /// Validator names in declaration order, duplicates kept.
    ///
    /// Returns `Ok(None)` for fields without a directive. Names are trimmed;
    /// an empty entry (`"mandatory,,email"`) is a malformed directive.
    pub fn validator_names<F: FieldAccessor + ?Sized>(
        &self,
        field: &F,
    ) -> EngineResult<Option<Vec<String>>> {
        let Some(directive) = field.attribute(&self.validators_attribute) else {
            return Ok(None);
        };

        directive
            .split(',')
            .map(str::trim)
            .map(|name| {
                if name.is_empty() {
                    Err(EngineError::MalformedDirective {
                        field: field.identifier().to_string(),
                        directive: directive.to_string(),
                    })
                } else {
                    Ok(name.to_string())
                }
            })
            .collect::<EngineResult<Vec<_>>>()
            .map(Some)
    }

    /// The against-parameter of `validator` on this field, if any.
    pub fn against<'f, F: FieldAccessor + ?Sized>(
        &self,
        field: &'f F,
        validator: &str,
    ) -> Option<&'f str> {
        field.attribute(&format!("{}{}", self.against_prefix, validator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::InputField;

    #[test]
    fn test_validator_names_keep_order_and_duplicates() {
        let resolver = DirectiveResolver::default();
        let field = InputField::new("code").with_attribute("validators", "mandatory, length,mandatory");

        assert_eq!(
            resolver.validator_names(&field).unwrap(),
            Some(vec![
                "mandatory".to_string(),
                "length".to_string(),
                "mandatory".to_string()
            ])
        );
    }

    #[test]
    fn test_field_without_directive() {
        let resolver = DirectiveResolver::default();
        let field = InputField::new("comment");

        assert!(!resolver.has_directive(&field));
        assert_eq!(resolver.validator_names(&field).unwrap(), None);
    }

    #[test]
    fn test_empty_entry_is_malformed() {
        let resolver = DirectiveResolver::default();
        for directive in ["mandatory,,email", "", "email,"] {
            let field = InputField::new("email").with_attribute("validators", directive);
            assert!(matches!(
                resolver.validator_names(&field),
                Err(EngineError::MalformedDirective { field, .. }) if field == "email"
            ));
        }
    }

    #[test]
    fn test_against_lookup() {
        let resolver = DirectiveResolver::default();
        let field = InputField::new("code")
            .with_attribute("validators", "length,expr")
            .with_attribute("against-length", "]2,5[");

        assert_eq!(resolver.against(&field, "length"), Some("]2,5["));
        assert_eq!(resolver.against(&field, "expr"), None);
    }

    #[test]
    fn test_custom_attribute_names() {
        let resolver = DirectiveResolver::new("data-fv", "data-fv-");
        let field = InputField::new("age")
            .with_attribute("data-fv", "integer,length")
            .with_attribute("data-fv-length", "[1,3]");

        assert_eq!(
            resolver.validator_names(&field).unwrap(),
            Some(vec!["integer".to_string(), "length".to_string()])
        );
        assert_eq!(resolver.against(&field, "length"), Some("[1,3]"));
    }
}
