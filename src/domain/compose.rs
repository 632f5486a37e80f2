//! Typed view of the rendered compose specification, used to validate
//! artifacts before they are written to disk.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::{AppError, ProvisionConfig};

/// Service name of the reverse proxy in the generated stack.
pub const PROXY_SERVICE: &str = "traefik";
/// Service name of the automation application in the generated stack.
pub const APP_SERVICE: &str = "n8n";

#[derive(Debug, Deserialize)]
pub struct ComposeDocument {
    pub services: BTreeMap<String, ComposeService>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ComposeService {
    pub image: String,
    pub restart: Option<String>,
    pub command: Vec<String>,
    pub ports: Vec<String>,
    pub environment: Vec<String>,
    pub volumes: Vec<String>,
    pub labels: Vec<String>,
}

impl ComposeDocument {
    pub fn parse(yaml: &str) -> Result<Self, AppError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Schema-check the document against the configured desired state.
    ///
    /// Exactly the proxy and application services must exist, the proxy must
    /// bind 80 and 443, and the application router rule must carry the
    /// configured domain.
    pub fn validate(&self, config: &ProvisionConfig) -> Result<(), AppError> {
        let fail = |reason: String| AppError::InvalidArtifact {
            artifact: "compose file".to_string(),
            reason,
        };

        if self.services.len() != 2 {
            return Err(fail(format!(
                "expected exactly 2 services, found {}: {}",
                self.services.len(),
                self.services.keys().cloned().collect::<Vec<_>>().join(", ")
            )));
        }

        let proxy = self
            .services
            .get(PROXY_SERVICE)
            .ok_or_else(|| fail(format!("missing '{PROXY_SERVICE}' service")))?;
        let app = self
            .services
            .get(APP_SERVICE)
            .ok_or_else(|| fail(format!("missing '{APP_SERVICE}' service")))?;

        for binding in ["80:80", "443:443"] {
            if !proxy.ports.iter().any(|p| p == binding) {
                return Err(fail(format!("proxy must publish port binding '{binding}'")));
            }
        }
        if !proxy.command.iter().any(|c| c.contains(&config.acme_email)) {
            return Err(fail("proxy is missing the ACME notification email".to_string()));
        }

        if app.image != config.n8n_image {
            return Err(fail(format!(
                "application image '{}' does not match configured '{}'",
                app.image, config.n8n_image
            )));
        }

        let host_rule = format!("Host(`{}`)", config.domain);
        if !app.labels.iter().any(|l| l.contains(&host_rule)) {
            return Err(fail(format!("application router rule must match {host_rule}")));
        }
        if !app.environment.iter().any(|e| e.starts_with("N8N_ENCRYPTION_KEY=")) {
            return Err(fail("application is missing N8N_ENCRYPTION_KEY".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProvisionConfig {
        ProvisionConfig { domain: "flows.example.org".to_string(), ..Default::default() }
    }

    fn minimal_yaml(domain: &str) -> String {
        format!(
            r#"services:
  traefik:
    image: traefik:v3.1
    command:
      - "--certificatesresolvers.letsencrypt.acme.email=admin@example.com"
    ports:
      - "80:80"
      - "443:443"
  n8n:
    image: docker.n8n.io/n8nio/n8n:latest
    environment:
      - "N8N_ENCRYPTION_KEY=abc"
    labels:
      - "traefik.http.routers.n8n.rule=Host(`{domain}`)"
"#
        )
    }

    #[test]
    fn accepts_well_formed_document() {
        let doc = ComposeDocument::parse(&minimal_yaml("flows.example.org")).unwrap();
        doc.validate(&config()).unwrap();
    }

    #[test]
    fn rejects_wrong_domain_in_router_rule() {
        let doc = ComposeDocument::parse(&minimal_yaml("other.example.org")).unwrap();
        let err = doc.validate(&config()).unwrap_err();
        assert!(matches!(err, AppError::InvalidArtifact { .. }));
    }

    #[test]
    fn rejects_extra_service() {
        let mut yaml = minimal_yaml("flows.example.org");
        yaml.push_str("  sidecar:\n    image: busybox\n");
        let doc = ComposeDocument::parse(&yaml).unwrap();
        assert!(doc.validate(&config()).is_err());
    }

    #[test]
    fn rejects_missing_port_binding() {
        let yaml = minimal_yaml("flows.example.org").replace("      - \"443:443\"\n", "");
        let doc = ComposeDocument::parse(&yaml).unwrap();
        let err = doc.validate(&config()).unwrap_err();
        assert!(err.to_string().contains("443:443"));
    }

    #[test]
    fn rejects_missing_encryption_key() {
        let yaml = minimal_yaml("flows.example.org")
            .replace("    environment:\n      - \"N8N_ENCRYPTION_KEY=abc\"\n", "");
        let doc = ComposeDocument::parse(&yaml).unwrap();
        assert!(doc.validate(&config()).is_err());
    }
}
