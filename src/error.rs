// src/error.rs - Error handling for the Pixscope toolkit

use std::fmt;

use crate::color::ColorInputError;
use crate::geometry::PointParseError;

/// Main error type for the Pixscope toolkit
#[derive(Debug, thiserror::Error)]
pub enum ToolkitError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid arguments or tool state
    #[error("Validation error: {0}")]
    Validation(String),

    /// Rejected color input
    #[error("Color input error: {0}")]
    ColorInput(#[from] ColorInputError),

    /// Malformed point literal
    #[error("Point error: {0}")]
    Point(#[from] PointParseError),

    /// Image decoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("Error in {context}: {source}")]
    WithContext {
        context: String,
        source: Box<ToolkitError>,
    },
}

impl ToolkitError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        ToolkitError::Configuration(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ToolkitError::Validation(msg.into())
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ToolkitError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Bad input can simply be corrected and retried
            ToolkitError::Validation(_) => true,
            ToolkitError::ColorInput(_) => true,
            ToolkitError::Point(_) => true,

            ToolkitError::Configuration(_) => false,
            ToolkitError::Image(_) => false,
            ToolkitError::FileSystem(_) => false,
            ToolkitError::Json(_) => false,

            ToolkitError::WithContext { source, .. } => source.is_recoverable(),
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ToolkitError::Configuration(_) | ToolkitError::Json(_) => ErrorSeverity::High,

            ToolkitError::Image(_) | ToolkitError::FileSystem(_) => ErrorSeverity::Medium,

            ToolkitError::Validation(_) | ToolkitError::ColorInput(_) | ToolkitError::Point(_) => {
                ErrorSeverity::Low
            }

            ToolkitError::WithContext { source, .. } => source.severity(),
        }
    }

    /// Get suggested user action for this error
    pub fn suggested_action(&self) -> &'static str {
        match self {
            ToolkitError::Configuration(_) => "Check configuration file and command line arguments",
            ToolkitError::Validation(_) => "Correct the input data and try again",
            ToolkitError::ColorInput(_) => "Enter a color within the documented ranges",
            ToolkitError::Point(_) => "Pass points as \"x,y\" with finite numbers",
            ToolkitError::Image(_) => "Check that the file is a supported PNG or JPEG image",
            ToolkitError::FileSystem(_) => "Check file permissions and paths",
            ToolkitError::Json(_) => "Fix or delete the malformed JSON file",
            ToolkitError::WithContext { source, .. } => source.suggested_action(),
        }
    }

    /// Get error code for scripts driving the CLI
    pub fn error_code(&self) -> u32 {
        match self {
            ToolkitError::Configuration(_) => 5000,
            ToolkitError::Validation(_) => 5100,
            ToolkitError::ColorInput(_) => 5200,
            ToolkitError::Point(_) => 5300,
            ToolkitError::Image(_) => 6000,
            ToolkitError::FileSystem(_) => 7000,
            ToolkitError::Json(_) => 7100,
            ToolkitError::WithContext { source, .. } => source.error_code(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Low severity - bad input, nothing else affected
    Low,
    /// Medium severity - one operation failed
    Medium,
    /// High severity - the toolkit cannot start as configured
    High,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Low => write!(f, "LOW"),
            ErrorSeverity::Medium => write!(f, "MEDIUM"),
            ErrorSeverity::High => write!(f, "HIGH"),
        }
    }
}

/// Result type alias for toolkit operations
pub type ToolkitResult<T> = Result<T, ToolkitError>;

/// Extension trait for Results to add context
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context(self, context: impl Into<String>) -> ToolkitResult<T>;

    /// Add context using a closure (for lazy evaluation)
    fn with_context_lazy<F>(self, f: F) -> ToolkitResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ToolkitError>,
{
    fn with_context(self, context: impl Into<String>) -> ToolkitResult<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context_lazy<F>(self, f: F) -> ToolkitResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

/// Log an error at a level matching its severity
pub fn report_error(error: &ToolkitError) {
    use tracing::{error, info, warn};

    let severity = error.severity();
    let code = error.error_code();

    match severity {
        ErrorSeverity::High => {
            error!(
                error_code = code,
                severity = %severity,
                "❌ {} | Action: {}",
                error,
                error.suggested_action()
            );
        }
        ErrorSeverity::Medium => {
            warn!(
                error_code = code,
                severity = %severity,
                "⚠️ {} | Action: {}",
                error,
                error.suggested_action()
            );
        }
        ErrorSeverity::Low => {
            info!(
                error_code = code,
                severity = %severity,
                "ℹ️ {} | Action: {}",
                error,
                error.suggested_action()
            );
        }
    }
}
