use crate::app::AppContext;
use crate::app::steps::Step;
use crate::domain::{APP_SERVICE, AppError, PROXY_SERVICE, StepStatus};

/// Bring the compose stack up and keep it converged.
pub struct StackUp;

impl Step for StackUp {
    fn name(&self) -> &'static str {
        "stack-up"
    }

    fn check(&self, ctx: &AppContext) -> Result<StepStatus, AppError> {
        if ctx.runtime.compose_version().is_none() {
            return Ok(StepStatus::Needed("docker compose is unavailable".to_string()));
        }
        let compose_path = ctx.config.compose_path();
        if !compose_path.exists() {
            return Ok(StepStatus::Needed("compose file not yet written".to_string()));
        }

        let running = ctx.runtime.running_services(&compose_path)?;
        let stopped: Vec<&str> = [PROXY_SERVICE, APP_SERVICE]
            .into_iter()
            .filter(|service| !running.iter().any(|r| r == service))
            .collect();

        if stopped.is_empty() {
            Ok(StepStatus::Satisfied)
        } else {
            Ok(StepStatus::Needed(format!("services not running: {}", stopped.join(", "))))
        }
    }

    fn apply(&self, ctx: &AppContext) -> Result<(), AppError> {
        ctx.runtime.compose_up(&ctx.config.compose_path())
    }
}
