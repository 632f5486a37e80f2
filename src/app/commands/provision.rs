//! Provision command: converge the host step by step.

use crate::app::AppContext;
use crate::app::steps::{self, FirewallRules, Step};
use crate::domain::{AppError, ConvergenceReport, StepOutcome, StepStatus};
use crate::ports::ConfirmPrompt;

#[derive(Debug, Clone, Default)]
pub struct ProvisionOptions {
    /// Report what would change without touching the host.
    pub dry_run: bool,
    /// Regenerate the encryption key even when a valid one exists.
    pub rotate_key: bool,
    /// Skip interactive confirmations.
    pub assume_yes: bool,
}

/// Execute the convergence sequence.
///
/// The first failing apply aborts the run; everything already reported
/// stays reported, and the error names the failing step.
pub fn execute(
    ctx: &AppContext,
    options: &ProvisionOptions,
    prompt: &dyn ConfirmPrompt,
) -> Result<ConvergenceReport, AppError> {
    confirm_firewall_if_needed(ctx, options, prompt)?;

    let mut report = ConvergenceReport::default();

    for step in steps::sequence(options.rotate_key) {
        match step.check(ctx)? {
            StepStatus::Satisfied => {
                println!("  {}: up to date", step.name());
                report.record(step.name(), StepOutcome::Skipped, None);
            }
            StepStatus::Needed(reason) => {
                if options.dry_run {
                    println!("→ {}: would apply ({reason})", step.name());
                    report.record(step.name(), StepOutcome::WouldApply, Some(reason));
                    continue;
                }

                step.apply(ctx).map_err(|e| AppError::StepFailed {
                    step: step.name().to_string(),
                    source: Box::new(e),
                })?;
                println!("✅ {}: applied ({reason})", step.name());
                report.record(step.name(), StepOutcome::Applied, Some(reason));
            }
        }
    }

    if report.converged() {
        println!("✅ Host already converged ({} steps checked)", report.steps().len());
    } else if options.dry_run {
        println!(
            "Plan: {} change(s) pending, {} step(s) up to date",
            report.pending(),
            report.skipped()
        );
    } else {
        println!(
            "✅ Converged: {} change(s) applied, {} step(s) already up to date",
            report.applied(),
            report.skipped()
        );
    }

    Ok(report)
}

/// Enabling ufw can cut off a remote session when the SSH port is not in the
/// configured list, so ask before the run makes any firewall change.
fn confirm_firewall_if_needed(
    ctx: &AppContext,
    options: &ProvisionOptions,
    prompt: &dyn ConfirmPrompt,
) -> Result<(), AppError> {
    if options.dry_run || options.assume_yes {
        return Ok(());
    }
    if let StepStatus::Needed(_) = FirewallRules.check(ctx)? {
        let ports: Vec<String> =
            ctx.config.open_ports.iter().map(|port| port.to_string()).collect();
        let message = format!(
            "Provisioning will enable the ufw firewall allowing only TCP ports {}. Continue?",
            ports.join(", ")
        );
        if !prompt.confirm(&message)? {
            return Err(AppError::Aborted("firewall change declined".to_string()));
        }
    }
    Ok(())
}
