//! Error types for folio.
//!
//! Missing page elements are not errors: controllers degrade to no-ops. The
//! variants here cover what can actually fail, which is configuration and the
//! handful of browser calls that report failure.

use miette::Diagnostic;

/// Main error type for folio operations
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum FolioError {
    /// A configuration value is out of range or empty
    #[error("invalid config value for `{field}`: {reason}")]
    #[diagnostic(
        code(folio::config::invalid),
        help("omit the field to fall back to the default page layout")
    )]
    InvalidConfig { field: &'static str, reason: String },

    /// The config object handed over from JavaScript could not be decoded
    #[error("could not decode config: {0}")]
    #[diagnostic(code(folio::config::decode))]
    ConfigDecode(String),

    /// JSON config parse error
    #[error(transparent)]
    #[diagnostic(code(folio::config::json))]
    Json(#[from] serde_json::Error),

    /// A browser global (window, document, root element) is unavailable
    #[error("no {0} available")]
    #[diagnostic(
        code(folio::browser::missing),
        help("folio must run on the main thread of a browser page")
    )]
    MissingGlobal(&'static str),

    /// A browser API call threw
    #[error("browser call failed: {0}")]
    #[diagnostic(code(folio::browser::call))]
    Browser(String),
}

impl FolioError {
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = FolioError> = std::result::Result<T, E>;
