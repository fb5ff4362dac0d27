//! Validator Registry
//!
//! Maps validator names to validator functions. A registry is built once,
//! populated through `&mut` access, then frozen behind an [`Arc`] and shared
//! by every validation run.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use regex::Regex;

use crate::config::ValidationOptions;
use crate::error::{EngineError, EngineResult};
use crate::functional::error_codes::FieldErrorList;
use crate::models::field::FieldLookup;

/// Everything a validator may consult besides the value and its against-parameter.
pub struct ValidatorContext<'a> {
    pub options: &'a ValidationOptions,
    pub registry: &'a ValidatorRegistry,
    pub lookup: &'a dyn FieldLookup,
}

impl<'a> ValidatorContext<'a> {
    pub fn new(
        options: &'a ValidationOptions,
        registry: &'a ValidatorRegistry,
        lookup: &'a dyn FieldLookup,
    ) -> Self {
        Self {
            options,
            registry,
            lookup,
        }
    }
}

/// Signature shared by every validator: `(value, against, context) -> error codes`.
pub type ValidatorFn =
    dyn Fn(&str, Option<&str>, &ValidatorContext<'_>) -> EngineResult<FieldErrorList> + Send + Sync;

/// Registry frozen for concurrent readers.
pub type SharedRegistry = Arc<ValidatorRegistry>;

/// Most compiled `expr` patterns a registry keeps at once.
pub const PATTERN_CACHE_CAPACITY: usize = 256;

/// Compiled patterns, evicted oldest first once the cache is full.
#[derive(Default)]
struct PatternCache {
    entries: HashMap<String, Regex>,
    order: VecDeque<String>,
}

impl PatternCache {
    fn get(&self, source: &str) -> Option<&Regex> {
        self.entries.get(source)
    }

    fn insert(&mut self, source: &str, regex: Regex) {
        if self.entries.contains_key(source) {
            return;
        }
        while self.order.len() >= PATTERN_CACHE_CAPACITY {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(source.to_string());
        self.entries.insert(source.to_string(), regex);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Arc<ValidatorFn>>,
    patterns: RwLock<PatternCache>,
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.names())
            .finish()
    }
}

impl ValidatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the core validators.
    pub fn with_core_validators() -> EngineResult<Self> {
        let mut registry = Self::new();
        crate::functional::validation_rules::register_core_validators(&mut registry)?;
        Ok(registry)
    }

    /// Freezes the registry for sharing.
    pub fn shared(self) -> SharedRegistry {
        Arc::new(self)
    }

    /// Stores `validator` under `name`, replacing any previous registration.
    ///
    /// Names are referenced from comma-separated directives, so they must be
    /// non-empty and free of commas and whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// # use form_validator::functional::prelude::{ErrorCode, ValidatorRegistry};
    /// let mut registry = ValidatorRegistry::new();
    /// registry
    ///     .register("zip", |value, _against, _ctx| {
    ///         Ok(if value.len() == 5 { vec![] } else { vec![ErrorCode::custom("ZIP_ERROR")] })
    ///     })
    ///     .unwrap();
    /// assert!(registry.contains("zip"));
    /// ```
    pub fn register<F>(&mut self, name: &str, validator: F) -> EngineResult<()>
    where
        F: Fn(&str, Option<&str>, &ValidatorContext<'_>) -> EngineResult<FieldErrorList>
            + Send
            + Sync
            + 'static,
    {
        if name.is_empty() || name.contains(',') || name.chars().any(char::is_whitespace) {
            return Err(EngineError::InvalidValidatorName(name.to_string()));
        }

        if self
            .validators
            .insert(name.to_string(), Arc::new(validator))
            .is_some()
        {
            log::debug!("Validator '{}' replaced by a new registration", name);
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Runs the validator registered under `name`.
    ///
    /// # Errors
    ///
    /// `UnknownValidator` if nothing is registered under `name`, or whatever
    /// configuration error the validator itself reports.
    pub fn invoke(
        &self,
        name: &str,
        value: &str,
        against: Option<&str>,
        context: &ValidatorContext<'_>,
    ) -> EngineResult<FieldErrorList> {
        let validator = self
            .validators
            .get(name)
            .ok_or_else(|| EngineError::UnknownValidator(name.to_string()))?;
        validator(value, against, context)
    }

    /// Compiles `source`, caching the result for later runs.
    ///
    /// At most [`PATTERN_CACHE_CAPACITY`] patterns stay cached; the oldest is
    /// dropped to make room.
    pub fn pattern(&self, source: &str) -> EngineResult<Regex> {
        {
            let cache = self.patterns.read().unwrap_or_else(|poisoned| {
                log::warn!("Pattern cache lock was poisoned, recovering");
                PoisonError::into_inner(poisoned)
            });
            if let Some(regex) = cache.get(source) {
                return Ok(regex.clone());
            }
        }

        let regex = Regex::new(source).map_err(|source_err| EngineError::InvalidPattern {
            pattern: source.to_string(),
            source: source_err,
        })?;

        let mut cache = self
            .patterns
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        cache.insert(source, regex.clone());
        Ok(regex)
    }

    /// Number of compiled patterns currently cached.
    pub fn cached_patterns(&self) -> usize {
        self.patterns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
