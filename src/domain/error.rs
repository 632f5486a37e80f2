use std::io;

use thiserror::Error;

/// Library-wide error type for hostup operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Config file was named explicitly but does not exist.
    #[error("Config file not found: {0}")]
    ConfigFileMissing(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Domain name is invalid.
    #[error("Invalid domain '{domain}': {reason}")]
    InvalidDomain { domain: String, reason: String },

    /// ACME notification email is invalid.
    #[error("Invalid email '{0}': expected a single '@' with non-empty local and domain parts")]
    InvalidEmail(String),

    /// Service account name is invalid.
    #[error(
        "Invalid service user '{0}': must start with a lowercase letter or underscore, \
         contain only lowercase letters, digits, hyphens, or underscores, and be at most 32 characters"
    )]
    InvalidServiceUser(String),

    /// Encryption key file exists but its content is not a valid key.
    #[error("Malformed encryption key at {path}: {reason}")]
    MalformedKey { path: String, reason: String },

    /// A rendered artifact failed validation before writing.
    #[error("Rendered {artifact} failed validation: {reason}")]
    InvalidArtifact { artifact: String, reason: String },

    /// Template rendering failed.
    #[error("Failed to render template '{template}': {details}")]
    TemplateRender { template: String, details: String },

    /// An external command exited non-zero or could not be spawned.
    #[error("Command failed '{command}': {details}")]
    Command { command: String, details: String },

    /// Downloading a remote resource failed.
    #[error("Download failed for {url}: {details}")]
    Download { url: String, details: String },

    /// A provisioning step failed; carries the underlying cause.
    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: Box<AppError>,
    },

    /// The user declined a confirmation prompt.
    #[error("Aborted: {0}")]
    Aborted(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::TomlParse(_)
            | AppError::YamlParse(_)
            | AppError::InvalidDomain { .. }
            | AppError::InvalidEmail(_)
            | AppError::InvalidServiceUser(_) => io::ErrorKind::InvalidInput,
            AppError::MalformedKey { .. } | AppError::InvalidArtifact { .. } => {
                io::ErrorKind::InvalidData
            }
            AppError::ConfigFileMissing(_) => io::ErrorKind::NotFound,
            AppError::TemplateRender { .. }
            | AppError::Command { .. }
            | AppError::Download { .. } => io::ErrorKind::Other,
            AppError::StepFailed { source, .. } => source.kind(),
            AppError::Aborted(_) => io::ErrorKind::Interrupted,
        }
    }
}
