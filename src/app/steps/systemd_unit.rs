use crate::app::AppContext;
use crate::app::steps::{Step, write_file};
use crate::domain::{AppError, StepStatus};

/// Render, validate, and install the systemd unit file.
pub struct SystemdUnit;

impl Step for SystemdUnit {
    fn name(&self) -> &'static str {
        "systemd-unit"
    }

    fn check(&self, ctx: &AppContext) -> Result<StepStatus, AppError> {
        let desired = ctx.renderer.render_unit(ctx.config)?;
        let path = &ctx.config.unit_path;

        if !path.exists() {
            return Ok(StepStatus::Needed("unit file missing".to_string()));
        }
        if std::fs::read_to_string(path)? != desired {
            return Ok(StepStatus::Needed("unit file content drift".to_string()));
        }
        Ok(StepStatus::Satisfied)
    }

    fn apply(&self, ctx: &AppContext) -> Result<(), AppError> {
        let desired = ctx.renderer.render_unit(ctx.config)?;
        write_file(&ctx.config.unit_path, &desired)?;
        Ok(())
    }
}
