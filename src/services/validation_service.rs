//! Validation service: triggers and callbacks around the engine.
//!
//! A UI layer forwards its lifecycle events (blur, key presses, submit) to
//! [`ValidationService`], which decides whether the event should validate,
//! runs the engine and reports each field's outcome to a
//! [`ValidationHandler`]. Rendering stays with the handler.

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, ValidationOptions};
use crate::error::EngineResult;
use crate::functional::directive_resolver::DirectiveResolver;
use crate::functional::error_codes::{describe_errors, FieldErrorList};
use crate::functional::validation_engine::{FormErrorMap, FormValidationEngine};
use crate::functional::validator_registry::SharedRegistry;
use crate::models::field::{FieldAccessor, FormAccessor, NoLookup};

/// Lifecycle event that may start a validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationTrigger {
    Blur,
    Submit,
    KeyUp,
    KeyDown,
    Focus,
}

/// Which triggers start a validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerSettings {
    #[serde(alias = "validateOnBlur")]
    pub validate_on_blur: bool,
    #[serde(alias = "validateOnSubmit")]
    pub validate_on_submit: bool,
    #[serde(alias = "validateOnKeyUp")]
    pub validate_on_key_up: bool,
    #[serde(alias = "validateOnKeyDown")]
    pub validate_on_key_down: bool,
    #[serde(alias = "validateOnFocus")]
    pub validate_on_focus: bool,
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self {
            validate_on_blur: true,
            validate_on_submit: true,
            validate_on_key_up: false,
            validate_on_key_down: false,
            validate_on_focus: false,
        }
    }
}

impl TriggerSettings {
    pub fn is_enabled(&self, trigger: ValidationTrigger) -> bool {
        match trigger {
            ValidationTrigger::Blur => self.validate_on_blur,
            ValidationTrigger::Submit => self.validate_on_submit,
            ValidationTrigger::KeyUp => self.validate_on_key_up,
            ValidationTrigger::KeyDown => self.validate_on_key_down,
            ValidationTrigger::Focus => self.validate_on_focus,
        }
    }
}

/// Receives validation outcomes.
pub trait ValidationHandler {
    fn on_validation_success(&mut self, field: &str);

    fn on_validation_error(&mut self, field: &str, errors: &FieldErrorList);

    /// Called once after a submit in which every field passed.
    fn after_form_validation_success(&mut self) {}

    /// Called once after a submit in which at least one field failed.
    fn after_form_validation_error(&mut self) {}
}

/// Handler that only logs outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler;

impl ValidationHandler for LoggingHandler {
    fn on_validation_success(&mut self, field: &str) {
        log::info!("Field '{}' is valid", field);
    }

    fn on_validation_error(&mut self, field: &str, errors: &FieldErrorList) {
        log::info!("Field '{}' is invalid: {}", field, describe_errors(errors));
    }

    fn after_form_validation_error(&mut self) {
        log::info!("Form submission rejected");
    }
}

pub struct ValidationService<H: ValidationHandler> {
    engine: FormValidationEngine,
    options: ValidationOptions,
    triggers: TriggerSettings,
    handler: H,
}

impl<H: ValidationHandler> ValidationService<H> {
    pub fn new(registry: SharedRegistry, config: &EngineConfig, handler: H) -> Self {
        Self {
            engine: FormValidationEngine::with_resolver(
                registry,
                DirectiveResolver::from_config(&config.directives),
            ),
            options: config.options,
            triggers: config.triggers,
            handler,
        }
    }

    pub fn engine(&self) -> &FormValidationEngine {
        &self.engine
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Handles a form submission.
    ///
    /// Returns `None` when submit validation is disabled. Otherwise every
    /// validated input is reported in document order, followed by exactly
    /// one after-form callback. Inputs sharing an identifier (radio groups)
    /// are each reported and any failing input makes the submit fail; the
    /// returned map holds the last one's errors.
    pub fn submit<Fm: FormAccessor>(&mut self, form: &mut Fm) -> EngineResult<Option<FormErrorMap>> {
        if !self.triggers.is_enabled(ValidationTrigger::Submit) {
            return Ok(None);
        }

        let _span = tracing::debug_span!("submit", fields = form.field_count()).entered();

        let mut errors = FormErrorMap::new();
        let mut any_invalid = false;
        for index in 0..form.field_count() {
            if let Some((field, field_errors)) =
                self.engine.validate_form_field(form, index, &self.options)?
            {
                any_invalid |= !field_errors.is_empty();
                self.dispatch(&field, &field_errors);
                errors.insert(&field, field_errors);
            }
        }

        if !any_invalid {
            self.handler.after_form_validation_success();
        } else {
            self.handler.after_form_validation_error();
        }
        Ok(Some(errors))
    }

    /// Handles a per-field event for the field at `index` of `form`.
    ///
    /// Returns `None` when the trigger is disabled or the field carries no
    /// validator directive.
    pub fn handle_field_event<Fm: FormAccessor>(
        &mut self,
        trigger: ValidationTrigger,
        form: &mut Fm,
        index: usize,
    ) -> EngineResult<Option<FieldErrorList>> {
        if !self.triggers.is_enabled(trigger) {
            return Ok(None);
        }

        let Some((field, errors)) = self.engine.validate_form_field(form, index, &self.options)?
        else {
            return Ok(None);
        };
        self.dispatch(&field, &errors);
        Ok(Some(errors))
    }

    /// Validates a field that lives outside any form.
    pub fn validate_detached<F: FieldAccessor>(
        &mut self,
        field: &mut F,
    ) -> EngineResult<FieldErrorList> {
        let errors = self.engine.validate_field(field, &NoLookup, &self.options)?;
        if self.engine.resolver().has_directive(&*field) {
            self.dispatch(field.identifier(), &errors);
        }
        Ok(errors)
    }

    fn dispatch(&mut self, field: &str, errors: &FieldErrorList) {
        if errors.is_empty() {
            self.handler.on_validation_success(field);
        } else {
            self.handler.on_validation_error(field, errors);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functional::error_codes::ErrorCode;
    use crate::functional::prelude::create_default_registry;
    use crate::models::form::{Form, InputField};

    #[derive(Debug, Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ValidationHandler for Recorder {
        fn on_validation_success(&mut self, field: &str) {
            self.events.push(format!("ok:{field}"));
        }

        fn on_validation_error(&mut self, field: &str, errors: &FieldErrorList) {
            self.events
                .push(format!("error:{field}:{}", describe_errors(errors)));
        }

        fn after_form_validation_success(&mut self) {
            self.events.push("form:ok".to_string());
        }

        fn after_form_validation_error(&mut self) {
            self.events.push("form:error".to_string());
        }
    }

    fn service(config: EngineConfig) -> ValidationService<Recorder> {
        ValidationService::new(create_default_registry().unwrap(), &config, Recorder::default())
    }

    fn contact_form() -> Form {
        Form::new()
            .with_field(
                InputField::new("email")
                    .with_value("a.b@example.com")
                    .with_attribute("validators", "mandatory,email"),
            )
            .with_field(InputField::new("notes"))
            .with_field(
                InputField::new("phone")
                    .with_value("12")
                    .with_attribute("validators", "phone"),
            )
    }

    #[test]
    fn test_submit_dispatches_in_order() {
        let mut service = service(EngineConfig::default());
        let mut form = contact_form();

        let errors = service.submit(&mut form).unwrap().unwrap();
        assert_eq!(errors.get("phone"), Some(&vec![ErrorCode::PhoneMatch]));
        assert_eq!(
            service.handler().events,
            vec!["ok:email", "error:phone:PHONE_MATCH_ERROR", "form:error"]
        );
    }

    #[test]
    fn test_submit_success() {
        let mut service = service(EngineConfig::default());
        let mut form = contact_form();
        form.by_name_mut("phone").unwrap().value = "+33 6 12 34 56 78".to_string();

        service.submit(&mut form).unwrap().unwrap();
        assert_eq!(
            service.into_handler().events,
            vec!["ok:email", "ok:phone", "form:ok"]
        );
    }

    #[test]
    fn test_submit_reports_each_input_of_a_group() {
        let mut service = service(EngineConfig::default());
        let mut form = Form::new()
            .with_field(InputField::new("color").with_attribute("validators", "mandatory"))
            .with_field(
                InputField::new("color")
                    .with_value("red")
                    .with_attribute("validators", "mandatory"),
            );

        let errors = service.submit(&mut form).unwrap().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("color"), Some(&vec![]));
        assert_eq!(
            service.handler().events,
            vec!["error:color:MANDATORY_ERROR", "ok:color", "form:error"]
        );
    }

    #[test]
    fn test_submit_disabled() {
        let mut config = EngineConfig::default();
        config.triggers.validate_on_submit = false;
        let mut service = service(config);

        assert!(service.submit(&mut contact_form()).unwrap().is_none());
        assert!(service.handler().events.is_empty());
    }

    #[test]
    fn test_field_event_respects_triggers() {
        let mut service = service(EngineConfig::default());
        let mut form = contact_form();

        assert_eq!(
            service
                .handle_field_event(ValidationTrigger::KeyUp, &mut form, 2)
                .unwrap(),
            None
        );
        assert_eq!(
            service
                .handle_field_event(ValidationTrigger::Blur, &mut form, 2)
                .unwrap(),
            Some(vec![ErrorCode::PhoneMatch])
        );
        assert_eq!(
            service
                .handle_field_event(ValidationTrigger::Blur, &mut form, 1)
                .unwrap(),
            None
        );
        assert_eq!(service.handler().events, vec!["error:phone:PHONE_MATCH_ERROR"]);
    }

    #[test]
    fn test_validate_detached() {
        let mut service = service(EngineConfig::default());
        let mut field = InputField::new("age")
            .with_value(" 7 ")
            .with_attribute("validators", "integer");

        assert!(service.validate_detached(&mut field).unwrap().is_empty());
        assert_eq!(field.value, "7");
        assert_eq!(service.handler().events, vec!["ok:age"]);
    }

    #[test]
    fn test_trigger_settings() {
        let triggers = TriggerSettings::default();
        assert!(triggers.is_enabled(ValidationTrigger::Blur));
        assert!(triggers.is_enabled(ValidationTrigger::Submit));
        assert!(!triggers.is_enabled(ValidationTrigger::KeyUp));
        assert!(!triggers.is_enabled(ValidationTrigger::KeyDown));
        assert!(!triggers.is_enabled(ValidationTrigger::Focus));
    }
}
