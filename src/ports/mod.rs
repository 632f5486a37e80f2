mod confirm;
mod container_runtime;
mod firewall;
mod init_system;
mod package_manager;
mod user_database;

pub use confirm::{AutoApprove, ConfirmPrompt};
pub use container_runtime::ContainerRuntime;
pub use firewall::{Firewall, FirewallState};
pub use init_system::InitSystem;
pub use package_manager::PackageManager;
pub use user_database::{SystemUser, UserDatabase};
