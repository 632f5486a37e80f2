use crate::app::AppContext;
use crate::app::steps::Step;
use crate::domain::{AppError, StepStatus};

/// Open the configured TCP ports and enable the firewall.
pub struct FirewallRules;

impl Step for FirewallRules {
    fn name(&self) -> &'static str {
        "firewall"
    }

    fn check(&self, ctx: &AppContext) -> Result<StepStatus, AppError> {
        // ufw may not be installed yet on a bare host; that resolves once the
        // packages step has run.
        let state = match ctx.firewall.state() {
            Ok(state) => state,
            Err(e) => return Ok(StepStatus::Needed(format!("firewall status unavailable: {e}"))),
        };

        let missing: Vec<String> = ctx
            .config
            .open_ports
            .iter()
            .filter(|port| !state.allowed_tcp.contains(port))
            .map(|port| port.to_string())
            .collect();

        if !missing.is_empty() {
            return Ok(StepStatus::Needed(format!(
                "missing allow rules for ports {}",
                missing.join(", ")
            )));
        }
        if !state.active {
            return Ok(StepStatus::Needed("firewall is inactive".to_string()));
        }
        Ok(StepStatus::Satisfied)
    }

    fn apply(&self, ctx: &AppContext) -> Result<(), AppError> {
        let state = ctx.firewall.state()?;

        for port in &ctx.config.open_ports {
            if !state.allowed_tcp.contains(port) {
                ctx.firewall.allow_tcp(*port)?;
            }
        }
        if !state.active {
            ctx.firewall.enable()?;
        }
        Ok(())
    }
}
