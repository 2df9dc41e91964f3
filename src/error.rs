use thiserror::Error;

/// Result type alias for xcc operations
pub type Result<T> = std::result::Result<T, XccError>;

/// Errors that can occur during xcc operations
#[derive(Error, Debug)]
pub enum XccError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required credential was not supplied by flag, environment, or config file
    #[error("Missing credential: {0}. Pass it as a flag or environment variable, \
             or run 'xcc config init'. API keys are created in App Store Connect \
             under Users and Access > Integrations (https://appstoreconnect.apple.com/access/integrations/api).")]
    MissingCredential(&'static str),

    /// Both a git reference and a pull request number were supplied
    #[error("Conflicting source flags: --reference and --pull-request are mutually \
             exclusive; a build runs from exactly one source")]
    ConflictingSource,

    /// A selection filter matched no candidate
    #[error("{kind} not found: {wanted}. Available: {}", format_available(.available))]
    NotFound {
        kind: &'static str,
        wanted: String,
        available: Vec<String>,
    },

    /// API error with HTTP status
    #[error("App Store Connect API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// Token signing failed (malformed private key, usually)
    #[error("Failed to sign API token: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// TOML parsing error
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to write config file: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Interactive prompt failed or was cancelled
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        "(none)".to_string()
    } else {
        available.join(", ")
    }
}

impl XccError {
    /// Create an API error from HTTP status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a not-found error listing every candidate's display string
    pub fn not_found(
        kind: &'static str,
        wanted: impl Into<String>,
        available: Vec<String>,
    ) -> Self {
        Self::NotFound {
            kind,
            wanted: wanted.into(),
            available,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingCredential(_)
            | Self::ConflictingSource
            | Self::InvalidArgument(_)
            | Self::Config(_) => 2,
            _ => 1,
        }
    }
}
