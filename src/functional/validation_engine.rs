//! Field and Form Validation Engine
//!
//! Runs each field's validator list through the registry and collects error
//! codes. Every listed validator runs; nothing short-circuits. Configuration
//! problems (unknown validators, missing or malformed against-parameters)
//! abort the run with an [`crate::error::EngineError`] naming the field.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::ValidationOptions;
use crate::error::EngineResult;
use crate::functional::directive_resolver::DirectiveResolver;
use crate::functional::error_codes::{describe_errors, FieldErrorList};
use crate::functional::validator_registry::{SharedRegistry, ValidatorContext};
use crate::models::field::{FieldAccessor, FieldLookup, FormAccessor};

/// Per-field error lists keyed by field identifier, in document order.
///
/// A field missing from the map carried no validator directive; a validated
/// field without errors maps to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrorMap {
    entries: Vec<(String, FieldErrorList)>,
    index: HashMap<String, usize>,
}

impl FormErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the errors of `field`. A repeated identifier keeps its first
    /// position and takes the new list.
    pub fn insert(&mut self, field: &str, errors: FieldErrorList) {
        match self.index.get(field) {
            Some(&position) => self.entries[position].1 = errors,
            None => {
                self.index.insert(field.to_string(), self.entries.len());
                self.entries.push((field.to_string(), errors));
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldErrorList> {
        self.index
            .get(field)
            .map(|&position| &self.entries[position].1)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldErrorList)> {
        self.entries
            .iter()
            .map(|(field, errors)| (field.as_str(), errors))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when no validated field reported an error.
    pub fn is_valid(&self) -> bool {
        self.entries.iter().all(|(_, errors)| errors.is_empty())
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = (&str, &FieldErrorList)> {
        self.iter().filter(|(_, errors)| !errors.is_empty())
    }
}

impl Serialize for FormErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, errors) in &self.entries {
            map.serialize_entry(field, errors)?;
        }
        map.end()
    }
}

/// Validation engine bound to a registry and a directive layout.
#[derive(Debug, Clone)]
pub struct FormValidationEngine {
    registry: SharedRegistry,
    resolver: DirectiveResolver,
}

impl FormValidationEngine {
    pub fn new(registry: SharedRegistry) -> Self {
        Self::with_resolver(registry, DirectiveResolver::default())
    }

    pub fn with_resolver(registry: SharedRegistry, resolver: DirectiveResolver) -> Self {
        Self { registry, resolver }
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &DirectiveResolver {
        &self.resolver
    }

    /// Validates one field, resolving cross-field references through `lookup`.
    ///
    /// A field without a validator directive yields an empty list. With
    /// `trim_values` and `replace_with_trimmed_value` the trimmed value is
    /// written back before validation; with `keep_value_if_invalid` off an
    /// invalid field is cleared afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// # use form_validator::functional::prelude::*;
    /// # fn main() -> Result<(), EngineError> {
    /// let engine = FormValidationEngine::new(ValidatorRegistry::with_core_validators()?.shared());
    /// let mut field = InputField::new("age")
    ///     .with_value(" 4a ")
    ///     .with_attribute("validators", "mandatory,integer");
    /// let errors = engine.validate_field(&mut field, &NoLookup, &ValidationOptions::default())?;
    /// assert_eq!(errors, vec![ErrorCode::IntegerMatch]);
    /// assert_eq!(field.value, "4a");
    /// # Ok(())
    /// # }
    /// ```
    pub fn validate_field<F: FieldAccessor>(
        &self,
        field: &mut F,
        lookup: &dyn FieldLookup,
        options: &ValidationOptions,
    ) -> EngineResult<FieldErrorList> {
        let Some(names) = self.resolver.validator_names(&*field)? else {
            return Ok(Vec::new());
        };

        let _span =
            tracing::debug_span!("validate_field", field = %field.identifier()).entered();

        let value = prepare_value(field, options);
        let errors = self.collect_errors(&*field, &names, &value, lookup, options)?;
        apply_outcome(field, &errors, options);

        log::debug!(
            "Field '{}' validated: [{}]",
            field.identifier(),
            describe_errors(&errors)
        );
        Ok(errors)
    }

    /// Validates the field at `index` of `form`, using the form itself to
    /// resolve cross-field references.
    ///
    /// Returns `None` when there is no such field or it carries no directive.
    pub fn validate_form_field<Fm: FormAccessor>(
        &self,
        form: &mut Fm,
        index: usize,
        options: &ValidationOptions,
    ) -> EngineResult<Option<(String, FieldErrorList)>> {
        let Some(field) = form.field_mut(index) else {
            return Ok(None);
        };
        let Some(names) = self.resolver.validator_names(&*field)? else {
            return Ok(None);
        };

        let identifier = field.identifier().to_string();
        let _span = tracing::debug_span!("validate_field", field = %identifier).entered();

        let value = prepare_value(field, options);

        let errors = match form.field(index) {
            Some(field) => self.collect_errors(field, &names, &value, &*form, options)?,
            None => return Ok(None),
        };

        if let Some(field) = form.field_mut(index) {
            apply_outcome(field, &errors, options);
        }

        log::debug!(
            "Field '{}' validated: [{}]",
            identifier,
            describe_errors(&errors)
        );
        Ok(Some((identifier, errors)))
    }

    /// Validates every directive-bearing field of `form` in document order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use form_validator::functional::prelude::*;
    /// # fn main() -> Result<(), EngineError> {
    /// let engine = FormValidationEngine::new(ValidatorRegistry::with_core_validators()?.shared());
    /// let mut form = Form::new()
    ///     .with_field(InputField::new("email").with_attribute("validators", "mandatory,email"))
    ///     .with_field(InputField::new("comment"));
    /// let errors = engine.validate_form(&mut form, &ValidationOptions::default())?;
    /// assert_eq!(errors.get("email"), Some(&vec![ErrorCode::Mandatory]));
    /// assert!(!errors.contains("comment"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn validate_form<Fm: FormAccessor>(
        &self,
        form: &mut Fm,
        options: &ValidationOptions,
    ) -> EngineResult<FormErrorMap> {
        let _span = tracing::debug_span!("validate_form", fields = form.field_count()).entered();

        let mut errors = FormErrorMap::new();
        for index in 0..form.field_count() {
            if let Some((identifier, field_errors)) =
                self.validate_form_field(form, index, options)?
            {
                errors.insert(&identifier, field_errors);
            }
        }

        log::debug!(
            "Form validated: {} field(s), {} invalid",
            errors.len(),
            errors.invalid_fields().count()
        );
        Ok(errors)
    }

    fn collect_errors<F: FieldAccessor + ?Sized>(
        &self,
        field: &F,
        names: &[String],
        value: &str,
        lookup: &dyn FieldLookup,
        options: &ValidationOptions,
    ) -> EngineResult<FieldErrorList> {
        let context = ValidatorContext::new(options, &self.registry, lookup);

        let mut errors = Vec::new();
        for name in names {
            let against = self.resolver.against(field, name);
            let found = self
                .registry
                .invoke(name, value, against, &context)
                .map_err(|err| err.in_field(field.identifier()))?;
            errors.extend(found);
        }
        Ok(errors)
    }
}

/// Returns the value validators should see, writing it back when asked to.
fn prepare_value<F: FieldAccessor + ?Sized>(field: &mut F, options: &ValidationOptions) -> String {
    if !options.trim_values {
        return field.value().to_string();
    }

    let trimmed = field.value().trim().to_string();
    if options.replace_with_trimmed_value && trimmed != field.value() {
        field.set_value(trimmed.clone());
    }
    trimmed
}

fn apply_outcome<F: FieldAccessor + ?Sized>(
    field: &mut F,
    errors: &FieldErrorList,
    options: &ValidationOptions,
) {
    if !errors.is_empty() && !options.keep_value_if_invalid {
        field.set_value(String::new());
    }
}
