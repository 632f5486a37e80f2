//! Plan command: a read-only convergence pass.

use crate::app::AppContext;
use crate::app::steps::{self, Step};
use crate::domain::{AppError, ConvergenceReport, StepOutcome, StepStatus};

/// Check every step and report divergence without applying anything.
pub fn execute(ctx: &AppContext) -> Result<ConvergenceReport, AppError> {
    let mut report = ConvergenceReport::default();

    for step in steps::sequence(false) {
        match step.check(ctx)? {
            StepStatus::Satisfied => {
                println!("  {}: up to date", step.name());
                report.record(step.name(), StepOutcome::Skipped, None);
            }
            StepStatus::Needed(reason) => {
                println!("→ {}: {reason}", step.name());
                report.record(step.name(), StepOutcome::WouldApply, Some(reason));
            }
        }
    }

    if report.converged() {
        println!("✅ Host matches the desired state");
    } else {
        println!("{} change(s) pending; run 'hostup provision' to apply", report.pending());
    }

    Ok(report)
}
