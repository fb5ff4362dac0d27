/// End-to-end checks of the public validation API: registry set-up, form
/// validation, option handling and configuration errors.

#[cfg(test)]
mod tests {
    use form_validator::functional::prelude::*;

    fn engine() -> FormValidationEngine {
        FormValidationEngine::new(create_default_registry().expect("core validators register"))
    }

    #[test]
    fn test_length_interval() {
        let engine = engine();
        let options = ValidationOptions::default();

        let cases = [
            ("ab", vec![ErrorCode::LengthMin]),
            ("abc", vec![]),
            ("abcd", vec![]),
            ("abcde", vec![ErrorCode::LengthMax]),
        ];
        for (value, expected) in cases {
            let mut field = InputField::new("code")
                .with_value(value)
                .with_attribute("validators", "length")
                .with_attribute("against-length", "]2,5[");
            assert_eq!(
                engine.validate_field(&mut field, &NoLookup, &options).unwrap(),
                expected,
                "{value}"
            );
        }
    }

    #[test]
    fn test_form_loaded_from_json() {
        let mut form: Form = serde_json::from_str(
            r##"{
                "fields": [
                    {"name": "email", "value": "not-an-email",
                     "attributes": {"validators": "mandatory,email"}},
                    {"id": "pwd", "name": "password", "value": "secret",
                     "attributes": {"validators": "mandatory"}},
                    {"name": "confirm", "value": "secret",
                     "attributes": {"validators": "consistency", "against-consistency": "#pwd"}},
                    {"name": "color", "value": "Red",
                     "attributes": {"validators": "checklist", "against-checklist": "red,green,blue"}},
                    {"name": "comment", "value": "free text"}
                ]
            }"##,
        )
        .unwrap();

        let errors = engine()
            .validate_form(&mut form, &ValidationOptions::default())
            .unwrap();

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({
                "email": ["EMAIL_MATCH_ERROR"],
                "password": [],
                "confirm": [],
                "color": ["CHECKLIST_MATCH_ERROR"],
            })
        );
        assert!(!errors.contains("comment"));
    }

    #[test]
    fn test_custom_validator_and_format_delegate() {
        let registry = create_registry(|registry| {
            registry.register(
                "zip",
                |value: &str, _against: Option<&str>, _ctx: &ValidatorContext<'_>| {
                    if value.is_empty() || (value.len() == 5 && value.chars().all(|c| c.is_ascii_digit())) {
                        Ok(vec![])
                    } else {
                        Ok(vec![ErrorCode::custom("ZIP_ERROR")])
                    }
                },
            )
        })
        .unwrap();
        let engine = FormValidationEngine::new(registry);

        let mut form = Form::new()
            .with_field(
                InputField::new("zip")
                    .with_value("7500")
                    .with_attribute("validators", "format")
                    .with_attribute("against-format", "zip"),
            )
            .with_field(
                InputField::new("code")
                    .with_value("7500")
                    .with_attribute("validators", "format")
                    .with_attribute("against-format", "postcode"),
            );

        let errors = engine
            .validate_form(&mut form, &ValidationOptions::default())
            .unwrap();
        assert_eq!(errors.get("zip"), Some(&vec![ErrorCode::custom("ZIP_ERROR")]));
        assert_eq!(errors.get("code"), Some(&vec![ErrorCode::UnknownFormat]));
    }

    #[test]
    fn test_trim_replace_and_clear() {
        let engine = engine();
        let mut form = Form::new()
            .with_field(
                InputField::new("name")
                    .with_value("  x  ")
                    .with_attribute("validators", "alphabetic"),
            )
            .with_field(
                InputField::new("age")
                    .with_value(" 4 2 ")
                    .with_attribute("validators", "integer"),
            );
        let options = ValidationOptions {
            keep_value_if_invalid: false,
            ..ValidationOptions::default()
        };

        let errors = engine.validate_form(&mut form, &options).unwrap();
        assert_eq!(errors.get("name"), Some(&vec![]));
        assert_eq!(errors.get("age"), Some(&vec![ErrorCode::IntegerMatch]));
        assert_eq!(form.by_name("name").unwrap().value, "x");
        assert_eq!(form.by_name("age").unwrap().value, "");
    }

    #[test]
    fn test_configuration_errors_propagate() {
        let engine = engine();
        let mut form = Form::new()
            .with_field(InputField::new("ok").with_attribute("validators", "mandatory"))
            .with_field(
                InputField::new("pattern")
                    .with_value("abc")
                    .with_attribute("validators", "expr"),
            );

        let err = engine
            .validate_form(&mut form, &ValidationOptions::default())
            .unwrap_err();
        assert!(matches!(&err, EngineError::Field { field, .. } if field == "pattern"));
        assert!(matches!(err.root(), EngineError::MissingAgainst { validator } if validator == "expr"));
    }

    #[test]
    fn test_shared_registry_across_threads() {
        let registry = create_default_registry().unwrap();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let engine = FormValidationEngine::new(registry.clone());
                std::thread::spawn(move || {
                    let mut field = InputField::new("n")
                        .with_value(&i.to_string())
                        .with_attribute("validators", "integer");
                    engine
                        .validate_field(&mut field, &NoLookup, &ValidationOptions::default())
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_empty());
        }
    }
}
