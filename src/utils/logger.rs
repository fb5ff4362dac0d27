use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_VAR: &str = "FORM_VALIDATOR_LOG_FORMAT";

/// Log output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text format with timestamp, level, target, and message
    #[default]
    Text,
    /// JSON format with structured fields: timestamp, level, target, message
    Json,
}

impl LogFormat {
    /// Parses a format name, case-insensitively. Unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "text" => Some(LogFormat::Text),
            _ => None,
        }
    }

    /// Reads the format from `FORM_VALIDATOR_LOG_FORMAT` or returns the default Text format
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use form_validator::utils::logger::LogFormat;
    ///
    /// assert_eq!(LogFormat::from_env_or_default(), LogFormat::Text); // default
    /// std::env::set_var("FORM_VALIDATOR_LOG_FORMAT", "json");
    /// assert_eq!(LogFormat::from_env_or_default(), LogFormat::Json);
    /// ```
    pub fn from_env_or_default() -> Self {
        std::env::var(LOG_FORMAT_VAR)
            .ok()
            .and_then(|s| Self::parse(&s))
            .unwrap_or_default()
    }
}

/// Initializes the tracing subscriber with console output and env filter.
///
/// Sets up:
/// - `fmt::layer()` for console output, as text or JSON
/// - Environment filter for log level control (`RUST_LOG`, `info` by default)
/// - Log-to-tracing bridge so the engine's `log` records reach the subscriber
///
/// This function is safe to call multiple times. If a global subscriber is
/// already set, it returns `Ok(())` without error (idempotent).
///
/// # Examples
///
/// ```
/// use form_validator::utils::logger::{init_logging, LogFormat};
///
/// let _ = init_logging(LogFormat::from_env_or_default());
/// ```
pub fn init_logging(format: LogFormat) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_log::LogTracer;
    use tracing_subscriber::fmt;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Initialize LogTracer bridge first (idempotent - errors are ignored)
    let _ = LogTracer::init();

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true))
            .try_init(),
    };

    if let Err(e) = result {
        // Already initialized (typically by another test or the host app)
        eprintln!(
            "Tracing subscriber already initialized or failed to initialize: {:?}",
            e
        );
    }
    Ok(())
}
