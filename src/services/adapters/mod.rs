mod apt;
mod command;
mod docker;
mod prompt;
mod systemctl;
mod ufw;
mod useradd;

pub use apt::AptPackageManager;
pub use docker::{DockerCli, INSTALL_SCRIPT_URL};
pub use prompt::DialoguerPrompt;
pub use systemctl::SystemctlInit;
pub use ufw::UfwFirewall;
pub use useradd::UseraddDatabase;

pub(crate) use command::{run, succeeds};
