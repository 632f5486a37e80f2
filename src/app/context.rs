use crate::domain::ProvisionConfig;
use crate::ports::{ContainerRuntime, Firewall, InitSystem, PackageManager, UserDatabase};
use crate::services::ArtifactRenderer;

/// Application context holding dependencies for command execution.
pub struct AppContext<'a> {
    pub config: &'a ProvisionConfig,
    pub packages: &'a dyn PackageManager,
    pub runtime: &'a dyn ContainerRuntime,
    pub users: &'a dyn UserDatabase,
    pub firewall: &'a dyn Firewall,
    pub init: &'a dyn InitSystem,
    pub renderer: &'a ArtifactRenderer,
}
