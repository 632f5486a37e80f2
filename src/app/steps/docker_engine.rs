use crate::app::AppContext;
use crate::app::steps::Step;
use crate::domain::{AppError, StepStatus};

/// Install the container engine via the vendor convenience script.
///
/// Presence-only guard: an installed engine is never upgraded here.
pub struct DockerEngine;

impl Step for DockerEngine {
    fn name(&self) -> &'static str {
        "docker-engine"
    }

    fn check(&self, ctx: &AppContext) -> Result<StepStatus, AppError> {
        match ctx.runtime.engine_version() {
            Some(_) => Ok(StepStatus::Satisfied),
            None => Ok(StepStatus::Needed("docker engine not installed".to_string())),
        }
    }

    fn apply(&self, ctx: &AppContext) -> Result<(), AppError> {
        ctx.runtime.install_engine()
    }
}
