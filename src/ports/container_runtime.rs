use std::path::Path;

use crate::domain::AppError;

/// Container runtime and compose orchestration operations.
pub trait ContainerRuntime {
    /// Engine version string, or `None` when the engine is not installed.
    fn engine_version(&self) -> Option<String>;

    /// Compose plugin version string, or `None` when unavailable.
    fn compose_version(&self) -> Option<String>;

    /// Install the container engine on the host.
    fn install_engine(&self) -> Result<(), AppError>;

    /// Bring the stack described by `compose_file` up in detached mode.
    fn compose_up(&self, compose_file: &Path) -> Result<(), AppError>;

    /// Names of services from `compose_file` that are currently running.
    fn running_services(&self, compose_file: &Path) -> Result<Vec<String>, AppError>;
}
