use crate::app::AppContext;
use crate::app::steps::Step;
use crate::domain::{AppError, StepStatus};

/// Create the system account that owns the data directory.
pub struct ServiceUser;

impl Step for ServiceUser {
    fn name(&self) -> &'static str {
        "service-user"
    }

    fn check(&self, ctx: &AppContext) -> Result<StepStatus, AppError> {
        let name = &ctx.config.service_user;
        match ctx.users.lookup(name)? {
            Some(_) => Ok(StepStatus::Satisfied),
            None => Ok(StepStatus::Needed(format!("system user '{name}' does not exist"))),
        }
    }

    fn apply(&self, ctx: &AppContext) -> Result<(), AppError> {
        ctx.users.create_service_user(&ctx.config.service_user, &ctx.config.data_dir)
    }
}
