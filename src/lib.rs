//! hostup: provision a self-hosted n8n + Traefik stack on a single Ubuntu host.
//!
//! The host is described as a sequence of desired-state steps (packages,
//! container runtime, service account, data directory, encryption key,
//! rendered artifacts, firewall, running stack, autostart). Commands check
//! each step and apply only what diverges, so re-running is always safe.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use app::AppContext;
use app::commands::{config_show, doctor, plan, provision, render};
use ports::{AutoApprove, ConfirmPrompt};
use services::{
    AptPackageManager, ArtifactRenderer, DialoguerPrompt, DockerCli, SystemctlInit, UfwFirewall,
    UseraddDatabase,
};

pub use app::commands::config_show::ConfigFormat;
pub use app::commands::doctor::{DoctorOptions, DoctorOutcome};
pub use app::commands::provision::ProvisionOptions;
pub use app::commands::render::RenderOptions;
pub use domain::{AppError, ConfigOverrides, ConvergenceReport, ProvisionConfig};

fn load_config(path: Option<&Path>, overrides: ConfigOverrides) -> Result<ProvisionConfig, AppError> {
    let mut config = ProvisionConfig::load(path)?;
    config.apply_overrides(overrides);
    config.validate()?;
    Ok(config)
}

/// System adapter bundle backing every command that talks to the host.
struct SystemPorts {
    packages: AptPackageManager,
    runtime: DockerCli,
    users: UseraddDatabase,
    firewall: UfwFirewall,
    init: SystemctlInit,
    renderer: ArtifactRenderer,
}

impl SystemPorts {
    fn new() -> Result<Self, AppError> {
        Ok(Self {
            packages: AptPackageManager::new(),
            runtime: DockerCli::new(),
            users: UseraddDatabase::new(),
            firewall: UfwFirewall::new(),
            init: SystemctlInit::new(),
            renderer: ArtifactRenderer::new()?,
        })
    }

    fn ctx<'a>(&'a self, config: &'a ProvisionConfig) -> AppContext<'a> {
        AppContext {
            config,
            packages: &self.packages,
            runtime: &self.runtime,
            users: &self.users,
            firewall: &self.firewall,
            init: &self.init,
            renderer: &self.renderer,
        }
    }
}

/// Converge the host to the configured desired state.
pub fn provision(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
    options: ProvisionOptions,
) -> Result<ConvergenceReport, AppError> {
    let config = load_config(config_path, overrides)?;
    let ports = SystemPorts::new()?;

    let prompt: Box<dyn ConfirmPrompt> = if options.assume_yes {
        Box::new(AutoApprove)
    } else {
        Box::new(DialoguerPrompt)
    };

    provision::execute(&ports.ctx(&config), &options, prompt.as_ref())
}

/// Check every step without applying changes.
pub fn plan(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<ConvergenceReport, AppError> {
    let config = load_config(config_path, overrides)?;
    let ports = SystemPorts::new()?;
    plan::execute(&ports.ctx(&config))
}

/// Render and validate the compose file and systemd unit.
pub fn render(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
    options: RenderOptions,
) -> Result<(), AppError> {
    let config = load_config(config_path, overrides)?;
    let renderer = ArtifactRenderer::new()?;
    render::execute(&config, &renderer, &options)
}

/// Diagnose host prerequisites.
pub fn doctor(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
    options: DoctorOptions,
) -> Result<DoctorOutcome, AppError> {
    // Doctor reports config problems as diagnostics instead of failing fast.
    let mut config = ProvisionConfig::load(config_path)?;
    config.apply_overrides(overrides);
    let ports = SystemPorts::new()?;
    doctor::execute(&ports.ctx(&config), options)
}

/// Print the effective configuration.
pub fn config_show(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
    format: ConfigFormat,
) -> Result<String, AppError> {
    let config = load_config(config_path, overrides)?;
    config_show::execute(&config, format)
}
