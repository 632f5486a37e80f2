use crate::domain::AppError;
use crate::ports::InitSystem;

use super::command;

/// `systemctl`-backed init system adapter.
#[derive(Debug, Default)]
pub struct SystemctlInit;

impl SystemctlInit {
    pub fn new() -> Self {
        Self
    }
}

impl InitSystem for SystemctlInit {
    fn version(&self) -> Option<String> {
        command::run("systemctl", &["--version"], &[]).ok()
    }

    fn daemon_reload(&self) -> Result<(), AppError> {
        command::run("systemctl", &["daemon-reload"], &[])?;
        Ok(())
    }

    fn enable(&self, unit: &str) -> Result<(), AppError> {
        command::run("systemctl", &["enable", unit], &[])?;
        Ok(())
    }

    fn is_enabled(&self, unit: &str) -> bool {
        command::run("systemctl", &["is-enabled", unit], &[])
            .map(|output| output == "enabled")
            .unwrap_or(false)
    }
}
