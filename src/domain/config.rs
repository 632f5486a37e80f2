//! Provisioning configuration: defaults, file loading, CLI overrides, validation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Default config file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "hostup.toml";

/// Desired state of the provisioned host.
///
/// Every field has a default matching the stock single-host layout, so an
/// empty config file (or none at all) is a valid starting point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvisionConfig {
    /// Public hostname the stack is served under.
    pub domain: String,
    /// Notification email for the ACME certificate resolver.
    pub acme_email: String,
    /// System account that owns the data directory.
    pub service_user: String,
    /// Root directory for application data, certificates, and the key file.
    pub data_dir: PathBuf,
    /// Timezone handed to the application container.
    pub timezone: String,
    /// Application container image.
    pub n8n_image: String,
    /// Reverse-proxy container image.
    pub traefik_image: String,
    /// Compose file location; defaults to `<data_dir>/docker-compose.yml`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compose_path: Option<PathBuf>,
    /// Systemd unit file location.
    pub unit_path: PathBuf,
    /// TCP ports opened in the firewall.
    pub open_ports: Vec<u16>,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            domain: "n8n.example.com".to_string(),
            acme_email: "admin@example.com".to_string(),
            service_user: "n8n".to_string(),
            data_dir: PathBuf::from("/opt/n8n"),
            timezone: "UTC".to_string(),
            n8n_image: "docker.n8n.io/n8nio/n8n:latest".to_string(),
            traefik_image: "traefik:v3.1".to_string(),
            compose_path: None,
            unit_path: PathBuf::from("/etc/systemd/system/n8n-stack.service"),
            open_ports: vec![22, 80, 443],
        }
    }
}

/// Field overrides collected from CLI flags. `None` leaves the config value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub domain: Option<String>,
    pub acme_email: Option<String>,
    pub service_user: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub timezone: Option<String>,
    pub n8n_image: Option<String>,
}

impl ProvisionConfig {
    /// Load configuration from `path`, or from `hostup.toml` in the current
    /// directory, or fall back to defaults when neither exists.
    ///
    /// An explicitly named file that is missing is an error; the implicit
    /// lookup is not.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let candidate = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(AppError::ConfigFileMissing(p.display().to_string()));
                }
                Some(p.to_path_buf())
            }
            None => {
                let implicit = PathBuf::from(DEFAULT_CONFIG_FILE);
                implicit.exists().then_some(implicit)
            }
        };

        match candidate {
            Some(file) => {
                let content = std::fs::read_to_string(&file)?;
                Ok(toml::from_str(&content)?)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply CLI flag overrides on top of the loaded values.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(domain) = overrides.domain {
            self.domain = domain;
        }
        if let Some(email) = overrides.acme_email {
            self.acme_email = email;
        }
        if let Some(user) = overrides.service_user {
            self.service_user = user;
        }
        if let Some(dir) = overrides.data_dir {
            self.data_dir = dir;
        }
        if let Some(tz) = overrides.timezone {
            self.timezone = tz;
        }
        if let Some(image) = overrides.n8n_image {
            self.n8n_image = image;
        }
    }

    /// Validate all fields, normalizing the port list in place.
    pub fn validate(&mut self) -> Result<(), AppError> {
        validate_domain(&self.domain)?;
        validate_email(&self.acme_email)?;
        validate_service_user(&self.service_user)?;

        if !self.data_dir.is_absolute() {
            return Err(AppError::config_error(format!(
                "data_dir must be an absolute path, got '{}'",
                self.data_dir.display()
            )));
        }
        if self.unit_path.extension().and_then(|e| e.to_str()) != Some("service") {
            return Err(AppError::config_error(format!(
                "unit_path must name a .service file, got '{}'",
                self.unit_path.display()
            )));
        }
        if self.timezone.trim().is_empty() {
            return Err(AppError::config_error("timezone must not be empty"));
        }
        if self.n8n_image.trim().is_empty() || self.traefik_image.trim().is_empty() {
            return Err(AppError::config_error("container images must not be empty"));
        }

        if self.open_ports.is_empty() {
            return Err(AppError::config_error("open_ports must list at least one port"));
        }
        if self.open_ports.contains(&0) {
            return Err(AppError::config_error("port 0 is not a valid firewall port"));
        }
        let mut seen = Vec::new();
        self.open_ports.retain(|port| {
            if seen.contains(port) {
                false
            } else {
                seen.push(*port);
                true
            }
        });

        Ok(())
    }

    /// Effective compose file location.
    pub fn compose_path(&self) -> PathBuf {
        self.compose_path.clone().unwrap_or_else(|| self.data_dir.join("docker-compose.yml"))
    }

    /// Location of the persisted encryption key.
    pub fn key_path(&self) -> PathBuf {
        self.data_dir.join("encryption.key")
    }

    /// Unit name as systemd refers to it (file name of `unit_path`).
    pub fn unit_name(&self) -> String {
        self.unit_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "n8n-stack.service".to_string())
    }

    /// External webhook base URL derived from the domain.
    pub fn webhook_url(&self) -> Result<Url, AppError> {
        Url::parse(&format!("https://{}/", self.domain)).map_err(|e| AppError::InvalidDomain {
            domain: self.domain.clone(),
            reason: e.to_string(),
        })
    }
}

fn validate_domain(domain: &str) -> Result<(), AppError> {
    let invalid = |reason: &str| AppError::InvalidDomain {
        domain: domain.to_string(),
        reason: reason.to_string(),
    };

    if domain.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if domain.len() > 253 {
        return Err(invalid("exceeds 253 characters"));
    }
    if !domain.contains('.') {
        return Err(invalid("must be fully qualified (at least one dot)"));
    }
    for label in domain.split('.') {
        if label.is_empty() {
            return Err(invalid("empty label (leading, trailing, or doubled dot)"));
        }
        if label.len() > 63 {
            return Err(invalid("label exceeds 63 characters"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(invalid("label must not start or end with a hyphen"));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(invalid("labels may contain only ASCII letters, digits, and hyphens"));
        }
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(host), None) if !local.is_empty() && !host.is_empty() => Ok(()),
        _ => Err(AppError::InvalidEmail(email.to_string())),
    }
}

fn validate_service_user(name: &str) -> Result<(), AppError> {
    let mut chars = name.chars();
    let valid_first = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_');
    let valid_rest =
        chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if name.is_empty() || name.len() > 32 || !valid_first || !valid_rest {
        return Err(AppError::InvalidServiceUser(name.to_string()));
    }
    Ok(())
}
