use crate::app::AppContext;
use crate::app::steps::Step;
use crate::domain::{AppError, StepStatus};

const PLUGIN_PACKAGE: &str = "docker-compose-plugin";

/// Install the compose plugin when `docker compose` is unavailable.
pub struct ComposePlugin;

impl Step for ComposePlugin {
    fn name(&self) -> &'static str {
        "compose-plugin"
    }

    fn check(&self, ctx: &AppContext) -> Result<StepStatus, AppError> {
        match ctx.runtime.compose_version() {
            Some(_) => Ok(StepStatus::Satisfied),
            None => Ok(StepStatus::Needed("docker compose is unavailable".to_string())),
        }
    }

    fn apply(&self, ctx: &AppContext) -> Result<(), AppError> {
        ctx.packages.install(&[PLUGIN_PACKAGE])
    }
}
