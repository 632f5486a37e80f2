use std::path::Path;

use crate::domain::AppError;
use crate::ports::ContainerRuntime;

use super::command;

/// Default location of the Docker convenience install script.
pub const INSTALL_SCRIPT_URL: &str = "https://get.docker.com";

/// Docker CLI adapter; compose operations go through the compose plugin.
#[derive(Debug)]
pub struct DockerCli {
    install_script_url: String,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerCli {
    pub fn new() -> Self {
        Self { install_script_url: INSTALL_SCRIPT_URL.to_string() }
    }

    /// Override the install script source (used by tests).
    pub fn with_install_url(url: impl Into<String>) -> Self {
        Self { install_script_url: url.into() }
    }

    fn compose_args<'a>(compose_file: &'a Path, tail: &[&'a str]) -> Vec<&'a str> {
        let mut args = vec!["compose", "-f"];
        args.push(compose_file.to_str().unwrap_or_default());
        args.extend_from_slice(tail);
        args
    }
}

impl ContainerRuntime for DockerCli {
    fn engine_version(&self) -> Option<String> {
        command::run("docker", &["--version"], &[]).ok()
    }

    fn compose_version(&self) -> Option<String> {
        command::run("docker", &["compose", "version"], &[]).ok()
    }

    fn install_engine(&self) -> Result<(), AppError> {
        let response = reqwest::blocking::get(&self.install_script_url)
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::Download {
                url: self.install_script_url.clone(),
                details: e.to_string(),
            })?;
        let script = response.text().map_err(|e| AppError::Download {
            url: self.install_script_url.clone(),
            details: e.to_string(),
        })?;

        let script_path =
            std::env::temp_dir().join(format!("hostup-get-docker-{}.sh", rand::random::<u32>()));
        std::fs::write(&script_path, script)?;
        let result =
            command::run("sh", &[script_path.to_str().unwrap_or_default()], &[]).map(|_| ());
        let _ = std::fs::remove_file(&script_path);
        result
    }

    fn compose_up(&self, compose_file: &Path) -> Result<(), AppError> {
        command::run("docker", &Self::compose_args(compose_file, &["up", "-d"]), &[])?;
        Ok(())
    }

    fn running_services(&self, compose_file: &Path) -> Result<Vec<String>, AppError> {
        let output = command::run(
            "docker",
            &Self::compose_args(compose_file, &["ps", "--services", "--status", "running"]),
            &[],
        )?;
        Ok(output.lines().map(|line| line.trim().to_string()).filter(|l| !l.is_empty()).collect())
    }
}
