//! Doctor command: host prerequisite diagnostics.

use crate::app::AppContext;
use crate::domain::{AppError, ProvisionConfig};
use crate::services::adapters;

#[derive(Debug, Clone, Default)]
pub struct DoctorOptions {
    /// Treat warnings as a failure (exit code 2).
    pub strict: bool,
}

#[derive(Debug, Clone)]
pub struct DoctorOutcome {
    pub errors: usize,
    pub warnings: usize,
    pub exit_code: i32,
}

#[derive(Debug, Default)]
struct Diagnostics {
    errors: Vec<(String, String)>,
    warnings: Vec<(String, String)>,
}

impl Diagnostics {
    fn push_error(&mut self, check: impl Into<String>, message: impl Into<String>) {
        self.errors.push((check.into(), message.into()));
    }

    fn push_warning(&mut self, check: impl Into<String>, message: impl Into<String>) {
        self.warnings.push((check.into(), message.into()));
    }

    fn emit(&self) {
        for (check, message) in &self.errors {
            eprintln!("[ERROR] {check}: {message}");
        }
        for (check, message) in &self.warnings {
            eprintln!("[WARN] {check}: {message}");
        }
    }
}

pub fn execute(ctx: &AppContext, options: DoctorOptions) -> Result<DoctorOutcome, AppError> {
    let mut diagnostics = Diagnostics::default();

    config_checks(ctx.config, &mut diagnostics);
    privilege_checks(&mut diagnostics);
    tooling_checks(ctx, &mut diagnostics);

    diagnostics.emit();

    let errors = diagnostics.errors.len();
    let warnings = diagnostics.warnings.len();
    let exit_code = if errors > 0 {
        1
    } else if warnings > 0 && options.strict {
        2
    } else {
        0
    };

    if errors == 0 && warnings == 0 {
        println!("All checks passed.");
    } else if errors == 0 && !options.strict {
        eprintln!("Check completed with {} warning(s).", warnings);
    } else {
        eprintln!("Check failed: {} error(s), {} warning(s) found.", errors, warnings);
    }

    Ok(DoctorOutcome { errors, warnings, exit_code })
}

fn config_checks(config: &ProvisionConfig, diagnostics: &mut Diagnostics) {
    let mut candidate = config.clone();
    if let Err(e) = candidate.validate() {
        diagnostics.push_error("config", e.to_string());
    }
}

fn privilege_checks(diagnostics: &mut Diagnostics) {
    match adapters::run("id", &["-u"], &[]) {
        Ok(uid) if uid == "0" => {}
        Ok(_) => diagnostics.push_warning(
            "privileges",
            "not running as root; 'hostup provision' needs root to change the host",
        ),
        Err(_) => diagnostics.push_warning("privileges", "could not determine effective user"),
    }
}

fn tooling_checks(ctx: &AppContext, diagnostics: &mut Diagnostics) {
    if ctx.packages.version().is_none() {
        diagnostics.push_error(
            "apt",
            "apt-get not found; hostup supports Debian/Ubuntu hosts only",
        );
    }
    if ctx.init.version().is_none() {
        diagnostics.push_error("systemd", "systemctl not found; autostart cannot be managed");
    }

    if ctx.runtime.engine_version().is_none() {
        diagnostics
            .push_warning("docker", "docker engine not installed (provision will install it)");
    } else if ctx.runtime.compose_version().is_none() {
        diagnostics.push_warning(
            "docker",
            "compose plugin not installed (provision will install it)",
        );
    }
    // The adapter reports an error when the ufw binary itself is absent.
    if ctx.firewall.state().is_err() {
        diagnostics.push_warning("ufw", "ufw not installed (provision will install it)");
    }
}
