//! Rendering of the compose file and systemd unit from embedded templates.
//!
//! Every rendered artifact is validated before callers are allowed to write
//! it: the compose output is parsed back into a typed document and
//! schema-checked, the unit output is checked for its required sections.

use minijinja::{Environment, context};

use crate::domain::{AppError, ComposeDocument, EncryptionKey, ProvisionConfig};

static COMPOSE_TEMPLATE: &str = include_str!("../templates/compose.yml.j2");
static UNIT_TEMPLATE: &str = include_str!("../templates/stack.service.j2");

const COMPOSE_TEMPLATE_NAME: &str = "compose.yml";
const UNIT_TEMPLATE_NAME: &str = "stack.service";

pub struct ArtifactRenderer {
    env: Environment<'static>,
}

impl ArtifactRenderer {
    pub fn new() -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);

        for (name, source) in
            [(COMPOSE_TEMPLATE_NAME, COMPOSE_TEMPLATE), (UNIT_TEMPLATE_NAME, UNIT_TEMPLATE)]
        {
            env.add_template(name, source).map_err(|e| AppError::TemplateRender {
                template: name.to_string(),
                details: e.to_string(),
            })?;
        }

        Ok(Self { env })
    }

    /// Render and validate the compose specification.
    pub fn render_compose(
        &self,
        config: &ProvisionConfig,
        key: &EncryptionKey,
    ) -> Result<String, AppError> {
        let webhook_url = config.webhook_url()?;
        let rendered = self.render(
            COMPOSE_TEMPLATE_NAME,
            context! {
                domain => config.domain,
                acme_email => config.acme_email,
                data_dir => config.data_dir.display().to_string(),
                timezone => config.timezone,
                n8n_image => config.n8n_image,
                traefik_image => config.traefik_image,
                webhook_url => webhook_url.as_str(),
                encryption_key => key.expose(),
            },
        )?;

        ComposeDocument::parse(&rendered)?.validate(config)?;
        Ok(rendered)
    }

    /// Render and validate the systemd unit.
    pub fn render_unit(&self, config: &ProvisionConfig) -> Result<String, AppError> {
        let rendered = self.render(
            UNIT_TEMPLATE_NAME,
            context! {
                domain => config.domain,
                data_dir => config.data_dir.display().to_string(),
                compose_path => config.compose_path().display().to_string(),
            },
        )?;

        validate_unit(&rendered, config)?;
        Ok(rendered)
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String, AppError> {
        let template = self.env.get_template(name).map_err(|e| AppError::TemplateRender {
            template: name.to_string(),
            details: e.to_string(),
        })?;
        template.render(ctx).map_err(|e| AppError::TemplateRender {
            template: name.to_string(),
            details: e.to_string(),
        })
    }
}

fn validate_unit(rendered: &str, config: &ProvisionConfig) -> Result<(), AppError> {
    let fail = |reason: String| AppError::InvalidArtifact {
        artifact: "systemd unit".to_string(),
        reason,
    };

    for section in ["[Unit]", "[Service]", "[Install]"] {
        if !rendered.lines().any(|line| line.trim() == section) {
            return Err(fail(format!("missing {section} section")));
        }
    }

    let working_dir = format!("WorkingDirectory={}", config.data_dir.display());
    if !rendered.lines().any(|line| line.trim() == working_dir) {
        return Err(fail(format!("expected '{working_dir}'")));
    }
    if !rendered.contains("WantedBy=multi-user.target") {
        return Err(fail("unit must be wanted by multi-user.target".to_string()));
    }
    if !rendered.contains("ExecStart=") || !rendered.contains("ExecStop=") {
        return Err(fail("unit must define ExecStart and ExecStop".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProvisionConfig {
        ProvisionConfig { domain: "flows.example.org".to_string(), ..Default::default() }
    }

    #[test]
    fn compose_renders_two_services_with_domain_rule() {
        let renderer = ArtifactRenderer::new().unwrap();
        let key = EncryptionKey::generate();

        let rendered = renderer.render_compose(&config(), &key).unwrap();
        let doc = ComposeDocument::parse(&rendered).unwrap();

        assert_eq!(doc.services.len(), 2);
        assert!(rendered.contains("traefik.http.routers.n8n.rule=Host(`flows.example.org`)"));
        assert!(rendered.contains(&format!("N8N_ENCRYPTION_KEY={}", key.expose())));
        assert!(rendered.contains("WEBHOOK_URL=https://flows.example.org/"));
    }

    #[test]
    fn compose_redirects_http_and_terminates_tls() {
        let renderer = ArtifactRenderer::new().unwrap();
        let rendered = renderer.render_compose(&config(), &EncryptionKey::generate()).unwrap();

        assert!(rendered.contains("redirections.entrypoint.to=websecure"));
        assert!(rendered.contains("acme.email=admin@example.com"));
    }

    #[test]
    fn unit_references_working_directory_and_boot_target() {
        let renderer = ArtifactRenderer::new().unwrap();
        let rendered = renderer.render_unit(&config()).unwrap();

        assert!(rendered.contains("WorkingDirectory=/opt/n8n"));
        assert!(rendered.contains("WantedBy=multi-user.target"));
        assert!(rendered.contains("ExecStart=/usr/bin/docker compose -f /opt/n8n/docker-compose.yml up -d"));
        assert!(rendered.contains("Requires=docker.service"));
    }

    #[test]
    fn unit_honors_custom_compose_path() {
        let renderer = ArtifactRenderer::new().unwrap();
        let custom = ProvisionConfig {
            compose_path: Some(std::path::PathBuf::from("/srv/stack/compose.yml")),
            ..config()
        };

        let rendered = renderer.render_unit(&custom).unwrap();
        assert!(rendered.contains("-f /srv/stack/compose.yml up -d"));
    }
}
