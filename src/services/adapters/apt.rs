use crate::domain::AppError;
use crate::ports::PackageManager;

use super::command;

/// `apt-get`/`dpkg-query`-backed package manager for Debian-family hosts.
#[derive(Debug, Default)]
pub struct AptPackageManager;

impl AptPackageManager {
    pub fn new() -> Self {
        Self
    }
}

const NONINTERACTIVE: &[(&str, &str)] = &[("DEBIAN_FRONTEND", "noninteractive")];

impl PackageManager for AptPackageManager {
    fn version(&self) -> Option<String> {
        command::run("apt-get", &["--version"], &[]).ok()
    }

    fn refresh_index(&self) -> Result<(), AppError> {
        command::run("apt-get", &["update", "-q"], NONINTERACTIVE)?;
        Ok(())
    }

    fn install(&self, packages: &[&str]) -> Result<(), AppError> {
        let mut args = vec!["install", "-y", "-q"];
        args.extend_from_slice(packages);
        command::run("apt-get", &args, NONINTERACTIVE)?;
        Ok(())
    }

    fn is_installed(&self, package: &str) -> bool {
        // dpkg-query exits non-zero for unknown packages; "install ok installed"
        // distinguishes fully installed from removed-but-configured states.
        command::run("dpkg-query", &["-W", "-f=${Status}", package], &[])
            .map(|status| status.contains("install ok installed"))
            .unwrap_or(false)
    }
}
