use crate::domain::AppError;

/// Init-system operations for unit registration and autostart.
pub trait InitSystem {
    /// Init system version banner, or `None` when it is unavailable.
    fn version(&self) -> Option<String>;

    /// Reload unit definitions after writing or changing a unit file.
    fn daemon_reload(&self) -> Result<(), AppError>;

    /// Enable a unit for the default boot target.
    fn enable(&self, unit: &str) -> Result<(), AppError>;

    /// Check whether a unit is enabled.
    fn is_enabled(&self, unit: &str) -> bool;
}
