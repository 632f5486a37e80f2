pub mod compose;
pub mod config;
pub mod error;
pub mod report;
pub mod secret;

pub use compose::{APP_SERVICE, ComposeDocument, PROXY_SERVICE};
pub use config::{ConfigOverrides, DEFAULT_CONFIG_FILE, ProvisionConfig};
pub use error::AppError;
pub use report::{ConvergenceReport, StepOutcome, StepReport, StepStatus};
pub use secret::{EncryptionKey, KeySource};
