use crate::app::AppContext;
use crate::app::steps::Step;
use crate::domain::{AppError, StepStatus};

/// Register the unit with the init system and enable it at boot.
pub struct Autostart;

impl Step for Autostart {
    fn name(&self) -> &'static str {
        "autostart"
    }

    fn check(&self, ctx: &AppContext) -> Result<StepStatus, AppError> {
        let unit = ctx.config.unit_name();
        if ctx.init.is_enabled(&unit) {
            Ok(StepStatus::Satisfied)
        } else {
            Ok(StepStatus::Needed(format!("unit '{unit}' is not enabled")))
        }
    }

    fn apply(&self, ctx: &AppContext) -> Result<(), AppError> {
        ctx.init.daemon_reload()?;
        ctx.init.enable(&ctx.config.unit_name())
    }
}
