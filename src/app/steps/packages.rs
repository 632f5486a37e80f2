use crate::app::AppContext;
use crate::app::steps::Step;
use crate::domain::{AppError, StepStatus};

/// Packages the later steps rely on. ufw is pulled in here so the firewall
/// step can assume it exists.
pub const PREREQUISITE_PACKAGES: &[&str] =
    &["ca-certificates", "curl", "gnupg", "lsb-release", "ufw"];

/// Install OS prerequisite packages.
pub struct Packages;

impl Packages {
    fn missing(ctx: &AppContext) -> Vec<&'static str> {
        PREREQUISITE_PACKAGES
            .iter()
            .copied()
            .filter(|package| !ctx.packages.is_installed(package))
            .collect()
    }
}

impl Step for Packages {
    fn name(&self) -> &'static str {
        "packages"
    }

    fn check(&self, ctx: &AppContext) -> Result<StepStatus, AppError> {
        let missing = Self::missing(ctx);
        if missing.is_empty() {
            Ok(StepStatus::Satisfied)
        } else {
            Ok(StepStatus::Needed(format!("missing packages: {}", missing.join(", "))))
        }
    }

    fn apply(&self, ctx: &AppContext) -> Result<(), AppError> {
        let missing = Self::missing(ctx);
        ctx.packages.refresh_index()?;
        ctx.packages.install(&missing)
    }
}
