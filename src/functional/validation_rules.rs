//! Core validation rules
//!
//! The built-in validators behind the registry names `mandatory`, `length`,
//! `expr`, `alphabetic`, `email`, `number`, `integer`, `phone`,
//! `checklist`, `consistency` and `format`. Every rule except `mandatory`
//! treats an empty value as valid; combine with `mandatory` to require one.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{EngineError, EngineResult};
use crate::functional::error_codes::{ErrorCode, FieldErrorList};
use crate::functional::length_bounds::LengthBounds;
use crate::functional::validator_registry::{ValidatorContext, ValidatorRegistry};
use crate::models::field::FieldReference;

/// Cached regex patterns for the fixed formats
static ALPHABETIC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("alphabetic pattern compiles"));
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9_.\-])+@(([a-zA-Z0-9\-])+\.)+([a-zA-Z0-9]{2,4})+$")
        .expect("email pattern compiles")
});
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+|\-)?[0-9]+((\.|,)[0-9]+)?$").expect("number pattern compiles")
});
static INTEGER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+|\-)?[0-9]+$").expect("integer pattern compiles"));
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ]{5,20}$").expect("phone pattern compiles"));

fn require_against<'a>(validator: &str, against: Option<&'a str>) -> EngineResult<&'a str> {
    against.ok_or_else(|| EngineError::MissingAgainst {
        validator: validator.to_string(),
    })
}

fn match_or(regex: &Regex, value: &str, code: ErrorCode) -> FieldErrorList {
    if value.is_empty() || regex.is_match(value) {
        Vec::new()
    } else {
        vec![code]
    }
}

/// `MANDATORY_ERROR` when the value is empty.
pub fn mandatory(
    value: &str,
    _against: Option<&str>,
    _ctx: &ValidatorContext<'_>,
) -> EngineResult<FieldErrorList> {
    if value.is_empty() {
        Ok(vec![ErrorCode::Mandatory])
    } else {
        Ok(Vec::new())
    }
}

/// Checks the character count against an interval such as `]2,5[`.
///
/// Without an against-parameter there is nothing to enforce.
pub fn length(
    value: &str,
    against: Option<&str>,
    _ctx: &ValidatorContext<'_>,
) -> EngineResult<FieldErrorList> {
    let Some(against) = against else {
        return Ok(Vec::new());
    };

    let bounds = against
        .parse::<LengthBounds>()
        .map_err(|err| EngineError::InvalidAgainst {
            validator: "length".to_string(),
            against: against.to_string(),
            reason: err.to_string(),
        })?;

    if value.is_empty() {
        return Ok(Vec::new());
    }
    Ok(bounds.check(value.chars().count()))
}

/// `EXPR_MATCH_ERROR` when the value contains no match of the against pattern.
///
/// The pattern is not anchored implicitly; write `^...$` for a whole-value match.
pub fn expr(
    value: &str,
    against: Option<&str>,
    ctx: &ValidatorContext<'_>,
) -> EngineResult<FieldErrorList> {
    let pattern = require_against("expr", against)?;
    let regex = ctx.registry.pattern(pattern)?;
    Ok(match_or(&regex, value, ErrorCode::ExprMatch))
}

pub fn alphabetic(
    value: &str,
    _against: Option<&str>,
    _ctx: &ValidatorContext<'_>,
) -> EngineResult<FieldErrorList> {
    Ok(match_or(&ALPHABETIC_REGEX, value, ErrorCode::AlphabeticMatch))
}

/// Deliberately loose e-mail shape: `local@label.label.tld` with a 2 to 4
/// character alphanumeric top-level label.
pub fn email(
    value: &str,
    _against: Option<&str>,
    _ctx: &ValidatorContext<'_>,
) -> EngineResult<FieldErrorList> {
    Ok(match_or(&EMAIL_REGEX, value, ErrorCode::EmailMatch))
}

/// Optional sign, digits, optional fraction separated by `.` or `,`.
pub fn number(
    value: &str,
    _against: Option<&str>,
    _ctx: &ValidatorContext<'_>,
) -> EngineResult<FieldErrorList> {
    Ok(match_or(&NUMBER_REGEX, value, ErrorCode::NumberMatch))
}

pub fn integer(
    value: &str,
    _against: Option<&str>,
    _ctx: &ValidatorContext<'_>,
) -> EngineResult<FieldErrorList> {
    Ok(match_or(&INTEGER_REGEX, value, ErrorCode::IntegerMatch))
}

/// Optional leading `+` followed by 5 to 20 digits or spaces.
pub fn phone(
    value: &str,
    _against: Option<&str>,
    _ctx: &ValidatorContext<'_>,
) -> EngineResult<FieldErrorList> {
    Ok(match_or(&PHONE_REGEX, value, ErrorCode::PhoneMatch))
}

/// `CHECKLIST_MATCH_ERROR` unless the value is exactly one of the
/// comma-separated items. Items are compared verbatim.
pub fn checklist(
    value: &str,
    against: Option<&str>,
    _ctx: &ValidatorContext<'_>,
) -> EngineResult<FieldErrorList> {
    let items = require_against("checklist", against)?;
    if value.is_empty() || items.split(',').any(|item| item == value) {
        Ok(Vec::new())
    } else {
        Ok(vec![ErrorCode::ChecklistMatch])
    }
}

/// Compares the value with another field resolved through the context lookup.
///
/// A reference that resolves to nothing counts as a mismatch.
pub fn consistency(
    value: &str,
    against: Option<&str>,
    ctx: &ValidatorContext<'_>,
) -> EngineResult<FieldErrorList> {
    let reference = require_against("consistency", against)?;
    if value.is_empty() {
        return Ok(Vec::new());
    }

    match ctx.lookup.lookup(&FieldReference::parse(reference)) {
        Some(other) if other == value => Ok(Vec::new()),
        _ => Ok(vec![ErrorCode::ConsistencyFailed]),
    }
}

/// Runs the validator named by the against-parameter, without an
/// against-parameter of its own.
pub fn format(
    value: &str,
    against: Option<&str>,
    ctx: &ValidatorContext<'_>,
) -> EngineResult<FieldErrorList> {
    let name = require_against("format", against)?;
    if value.is_empty() {
        return Ok(Vec::new());
    }

    if ctx.registry.contains(name) {
        ctx.registry.invoke(name, value, None, ctx)
    } else {
        Ok(vec![ErrorCode::UnknownFormat])
    }
}

/// Registers the core validators with the provided registry.
///
/// # Examples
///
/// ```
/// # use form_validator::functional::prelude::ValidatorRegistry;
/// # use form_validator::functional::validation_rules::register_core_validators;
/// let mut registry = ValidatorRegistry::new();
/// register_core_validators(&mut registry).unwrap();
/// assert!(registry.contains("email"));
/// ```
pub fn register_core_validators(registry: &mut ValidatorRegistry) -> EngineResult<()> {
    registry.register("mandatory", mandatory)?;
    registry.register("length", length)?;
    registry.register("expr", expr)?;
    registry.register("alphabetic", alphabetic)?;
    registry.register("email", email)?;
    registry.register("number", number)?;
    registry.register("integer", integer)?;
    registry.register("phone", phone)?;
    registry.register("checklist", checklist)?;
    registry.register("consistency", consistency)?;
    registry.register("format", format)?;

    Ok(())
}
