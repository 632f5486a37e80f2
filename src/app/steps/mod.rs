//! Desired-state steps, each with a read-only check and an apply action.
//!
//! The provision and plan commands walk [`sequence`] in order; each step's
//! `check` inspects the host without side effects and `apply` converges the
//! one concern it owns.

mod autostart;
mod compose_file;
mod compose_plugin;
mod data_dir;
mod docker_engine;
mod encryption_key;
mod firewall;
mod packages;
mod service_user;
mod stack_up;
mod systemd_unit;

use std::io;
use std::path::Path;

pub use autostart::Autostart;
pub use compose_file::ComposeFile;
pub use compose_plugin::ComposePlugin;
pub use data_dir::DataDir;
pub use docker_engine::DockerEngine;
pub use encryption_key::EncryptionKeyStep;
pub use firewall::FirewallRules;
pub use packages::{PREREQUISITE_PACKAGES, Packages};
pub use service_user::ServiceUser;
pub use stack_up::StackUp;
pub use systemd_unit::SystemdUnit;

use crate::app::AppContext;
use crate::domain::{AppError, StepStatus};

/// One idempotent provisioning concern.
pub trait Step {
    fn name(&self) -> &'static str;

    /// Inspect the host; must not change anything.
    fn check(&self, ctx: &AppContext) -> Result<StepStatus, AppError>;

    /// Converge the host for this concern.
    fn apply(&self, ctx: &AppContext) -> Result<(), AppError>;
}

/// The full provisioning sequence, in dependency order.
pub fn sequence(rotate_key: bool) -> Vec<Box<dyn Step>> {
    vec![
        Box::new(Packages),
        Box::new(DockerEngine),
        Box::new(ComposePlugin),
        Box::new(ServiceUser),
        Box::new(DataDir),
        Box::new(EncryptionKeyStep::new(rotate_key)),
        Box::new(ComposeFile),
        Box::new(SystemdUnit),
        Box::new(FirewallRules),
        Box::new(StackUp),
        Box::new(Autostart),
    ]
}

/// Write `content` to `path`, creating parent directories.
pub(crate) fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

/// Write `content` to `path` with owner-only permissions.
pub(crate) fn write_private(path: &Path, content: &str) -> io::Result<()> {
    write_file(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }

    Ok(())
}
