use crate::domain::AppError;
use crate::ports::{Firewall, FirewallState};

use super::command;

/// `ufw`-backed firewall adapter.
#[derive(Debug, Default)]
pub struct UfwFirewall;

impl UfwFirewall {
    pub fn new() -> Self {
        Self
    }
}

impl Firewall for UfwFirewall {
    fn state(&self) -> Result<FirewallState, AppError> {
        let output = command::run("ufw", &["status"], &[])?;
        Ok(parse_status(&output))
    }

    fn allow_tcp(&self, port: u16) -> Result<(), AppError> {
        let rule = format!("{port}/tcp");
        command::run("ufw", &["allow", &rule], &[])?;
        Ok(())
    }

    fn enable(&self) -> Result<(), AppError> {
        command::run("ufw", &["--force", "enable"], &[])?;
        Ok(())
    }
}

/// Parse `ufw status` output into active/inactive plus allowed TCP ports.
fn parse_status(output: &str) -> FirewallState {
    let mut state = FirewallState::default();

    for line in output.lines() {
        let line = line.trim();
        if let Some(status) = line.strip_prefix("Status:") {
            state.active = status.trim() == "active";
            continue;
        }
        // Rule lines look like "22/tcp  ALLOW  Anywhere".
        if !line.contains("ALLOW") {
            continue;
        }
        if let Some(spec) = line.split_whitespace().next()
            && let Some(port) = spec.strip_suffix("/tcp")
            && let Ok(port) = port.parse::<u16>()
            && !state.allowed_tcp.contains(&port)
        {
            state.allowed_tcp.push(port);
        }
    }

    state
}
