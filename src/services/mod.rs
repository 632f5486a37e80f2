pub mod adapters;
mod render;

pub use adapters::{
    AptPackageManager, DialoguerPrompt, DockerCli, SystemctlInit, UfwFirewall, UseraddDatabase,
};
pub use render::ArtifactRenderer;
