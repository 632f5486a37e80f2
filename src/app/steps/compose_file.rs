use crate::app::AppContext;
use crate::app::steps::{Step, write_private};
use crate::domain::{AppError, EncryptionKey, StepStatus};

/// Render, validate, and write the compose specification.
///
/// Drift is detected by comparing the on-disk file with a fresh render, so
/// manual edits are reported (and reverted on apply) rather than silently
/// clobbered.
pub struct ComposeFile;

impl ComposeFile {
    fn desired(ctx: &AppContext) -> Result<Option<String>, AppError> {
        let key = match EncryptionKey::load(&ctx.config.key_path()) {
            Ok(Some(key)) => key,
            // Absent or malformed resolves once the key step has run.
            Ok(None) | Err(AppError::MalformedKey { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        ctx.renderer.render_compose(ctx.config, &key).map(Some)
    }
}

impl Step for ComposeFile {
    fn name(&self) -> &'static str {
        "compose-file"
    }

    fn check(&self, ctx: &AppContext) -> Result<StepStatus, AppError> {
        let Some(desired) = Self::desired(ctx)? else {
            return Ok(StepStatus::Needed("waiting for encryption key".to_string()));
        };

        let path = ctx.config.compose_path();
        if !path.exists() {
            return Ok(StepStatus::Needed("compose file missing".to_string()));
        }
        if std::fs::read_to_string(&path)? != desired {
            return Ok(StepStatus::Needed("compose file content drift".to_string()));
        }
        Ok(StepStatus::Satisfied)
    }

    fn apply(&self, ctx: &AppContext) -> Result<(), AppError> {
        let desired = Self::desired(ctx)?.ok_or_else(|| {
            AppError::config_error("encryption key missing; the key step must run first")
        })?;
        write_private(&ctx.config.compose_path(), &desired)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ComposeDocument;
    use crate::testing::TestHarness;

    fn harness_with_key() -> TestHarness {
        let harness = TestHarness::bare();
        EncryptionKey::generate().persist(&harness.config.key_path()).unwrap();
        harness
    }

    #[test]
    fn waits_for_key() {
        let harness = TestHarness::bare();
        match ComposeFile.check(&harness.ctx()).unwrap() {
            StepStatus::Needed(reason) => assert!(reason.contains("encryption key")),
            StepStatus::Satisfied => panic!("expected Needed"),
        }
    }

    #[test]
    fn malformed_key_defers_to_the_key_step() {
        let harness = TestHarness::bare();
        let path = harness.config.key_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "garbage").unwrap();

        match ComposeFile.check(&harness.ctx()).unwrap() {
            StepStatus::Needed(reason) => assert!(reason.contains("encryption key")),
            StepStatus::Satisfied => panic!("expected Needed"),
        }
    }

    #[test]
    fn key_read_failures_are_not_swallowed() {
        let harness = TestHarness::bare();
        // A directory where the key file belongs makes the read fail outright.
        std::fs::create_dir_all(harness.config.key_path()).unwrap();

        assert!(matches!(ComposeFile.check(&harness.ctx()), Err(AppError::Io(_))));
    }

    #[test]
    fn writes_validated_file_then_satisfied() {
        let harness = harness_with_key();

        ComposeFile.apply(&harness.ctx()).unwrap();

        let written = std::fs::read_to_string(harness.config.compose_path()).unwrap();
        let doc = ComposeDocument::parse(&written).unwrap();
        doc.validate(&harness.config).unwrap();
        assert_eq!(ComposeFile.check(&harness.ctx()).unwrap(), StepStatus::Satisfied);
    }

    #[test]
    fn manual_edit_reports_drift_and_is_reverted() {
        let harness = harness_with_key();
        ComposeFile.apply(&harness.ctx()).unwrap();

        let path = harness.config.compose_path();
        let pristine = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, format!("{pristine}# local tweak\n")).unwrap();

        match ComposeFile.check(&harness.ctx()).unwrap() {
            StepStatus::Needed(reason) => assert!(reason.contains("drift")),
            StepStatus::Satisfied => panic!("expected drift"),
        }

        ComposeFile.apply(&harness.ctx()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), pristine);
    }

    #[cfg(unix)]
    #[test]
    fn compose_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let harness = harness_with_key();
        ComposeFile.apply(&harness.ctx()).unwrap();

        let mode =
            std::fs::metadata(harness.config.compose_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
