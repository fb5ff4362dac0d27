use thiserror::Error;

/// Configuration errors raised by the engine.
///
/// Failed validations are not errors: they come back as
/// [`crate::functional::error_codes::ErrorCode`] lists. An `EngineError`
/// means the form or the registry is set up wrong and should be fixed by
/// the integrator.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown validator `{0}`")]
    UnknownValidator(String),
    #[error("invalid validator name `{0}`")]
    InvalidValidatorName(String),
    #[error("validator `{validator}` requires an against-parameter")]
    MissingAgainst { validator: String },
    #[error("invalid against-parameter `{against}` for validator `{validator}`: {reason}")]
    InvalidAgainst {
        validator: String,
        against: String,
        reason: String,
    },
    #[error("invalid regular expression `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("malformed validator directive `{directive}` on field `{field}`")]
    MalformedDirective { field: String, directive: String },
    #[error("field `{field}`: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<EngineError>,
    },
}

impl EngineError {
    /// Attaches the identifier of the field being validated.
    pub fn in_field(self, field: &str) -> Self {
        match self {
            EngineError::Field { .. } | EngineError::MalformedDirective { .. } => self,
            other => EngineError::Field {
                field: field.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Returns the innermost error, skipping field context.
    pub fn root(&self) -> &EngineError {
        match self {
            EngineError::Field { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while loading an [`crate::config::EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}
