use crate::domain::AppError;

/// OS package manager operations used by provisioning.
pub trait PackageManager {
    /// Package manager version banner, or `None` when it is unavailable.
    fn version(&self) -> Option<String>;

    /// Refresh the package index.
    fn refresh_index(&self) -> Result<(), AppError>;

    /// Install the named packages, accepting all prompts.
    fn install(&self, packages: &[&str]) -> Result<(), AppError>;

    /// Check whether a package is installed.
    fn is_installed(&self, package: &str) -> bool;
}
