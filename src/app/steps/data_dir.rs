use std::path::PathBuf;

use crate::app::AppContext;
use crate::app::steps::Step;
use crate::domain::{AppError, StepStatus};

/// Create the data directory tree and hand it to the service user.
pub struct DataDir;

impl DataDir {
    fn subdirs(ctx: &AppContext) -> [PathBuf; 3] {
        let root = ctx.config.data_dir.clone();
        [root.join("letsencrypt"), root.join("data"), root]
    }
}

impl Step for DataDir {
    fn name(&self) -> &'static str {
        "data-dir"
    }

    fn check(&self, ctx: &AppContext) -> Result<StepStatus, AppError> {
        for dir in Self::subdirs(ctx) {
            if !dir.is_dir() {
                return Ok(StepStatus::Needed(format!("directory {} missing", dir.display())));
            }
        }

        let name = &ctx.config.service_user;
        match ctx.users.lookup(name)? {
            None => Ok(StepStatus::Needed(format!("waiting for service user '{name}'"))),
            Some(user) => {
                if ctx.users.is_owned_by(&ctx.config.data_dir, &user)? {
                    Ok(StepStatus::Satisfied)
                } else {
                    Ok(StepStatus::Needed(format!(
                        "{} is not owned by '{name}'",
                        ctx.config.data_dir.display()
                    )))
                }
            }
        }
    }

    fn apply(&self, ctx: &AppContext) -> Result<(), AppError> {
        for dir in Self::subdirs(ctx) {
            std::fs::create_dir_all(&dir)?;
        }
        ctx.users.chown_recursive(&ctx.config.service_user, &ctx.config.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::UserDatabase;
    use crate::testing::TestHarness;

    #[test]
    fn needed_until_created_and_owned() {
        let harness = TestHarness::bare();
        harness.users.create_service_user("n8n", &harness.config.data_dir).unwrap();

        assert!(matches!(DataDir.check(&harness.ctx()).unwrap(), StepStatus::Needed(_)));

        DataDir.apply(&harness.ctx()).unwrap();

        assert!(harness.config.data_dir.join("letsencrypt").is_dir());
        assert!(harness.config.data_dir.join("data").is_dir());
        assert_eq!(DataDir.check(&harness.ctx()).unwrap(), StepStatus::Satisfied);
    }

    #[test]
    fn reports_ownership_drift() {
        let harness = TestHarness::bare();
        harness.users.create_service_user("n8n", &harness.config.data_dir).unwrap();
        for dir in DataDir::subdirs(&harness.ctx()) {
            std::fs::create_dir_all(dir).unwrap();
        }

        // Directories exist but were never chowned.
        match DataDir.check(&harness.ctx()).unwrap() {
            StepStatus::Needed(reason) => assert!(reason.contains("not owned")),
            StepStatus::Satisfied => panic!("expected ownership drift"),
        }
    }

    #[test]
    fn waits_for_service_user() {
        let harness = TestHarness::bare();
        for dir in DataDir::subdirs(&harness.ctx()) {
            std::fs::create_dir_all(dir).unwrap();
        }

        match DataDir.check(&harness.ctx()).unwrap() {
            StepStatus::Needed(reason) => assert!(reason.contains("waiting for service user")),
            StepStatus::Satisfied => panic!("expected Needed"),
        }
    }
}
