use crate::app::AppContext;
use crate::app::steps::Step;
use crate::domain::{AppError, EncryptionKey, StepStatus};

/// Ensure a persisted application encryption key exists.
///
/// A valid existing key is left alone so re-provisioning never rotates it;
/// rotation happens only on explicit request.
pub struct EncryptionKeyStep {
    rotate: bool,
}

impl EncryptionKeyStep {
    pub fn new(rotate: bool) -> Self {
        Self { rotate }
    }
}

impl Step for EncryptionKeyStep {
    fn name(&self) -> &'static str {
        "encryption-key"
    }

    fn check(&self, ctx: &AppContext) -> Result<StepStatus, AppError> {
        if self.rotate {
            return Ok(StepStatus::Needed("key rotation requested".to_string()));
        }
        match EncryptionKey::load(&ctx.config.key_path()) {
            Ok(Some(_)) => Ok(StepStatus::Satisfied),
            Ok(None) => Ok(StepStatus::Needed("key file missing".to_string())),
            Err(AppError::MalformedKey { reason, .. }) => {
                Ok(StepStatus::Needed(format!("malformed key file ({reason})")))
            }
            Err(e) => Err(e),
        }
    }

    fn apply(&self, ctx: &AppContext) -> Result<(), AppError> {
        let path = ctx.config.key_path();
        if self.rotate {
            return EncryptionKey::generate().persist(&path);
        }
        match EncryptionKey::load_or_generate(&path) {
            Ok(_) => Ok(()),
            // A malformed file never round-trips; replace it.
            Err(AppError::MalformedKey { .. }) => EncryptionKey::generate().persist(&path),
            Err(e) => Err(e),
        }
    }
}
