use dialoguer::Confirm;

use crate::domain::AppError;
use crate::ports::ConfirmPrompt;

/// Terminal confirmation prompt.
pub struct DialoguerPrompt;

impl ConfirmPrompt for DialoguerPrompt {
    fn confirm(&self, message: &str) -> Result<bool, AppError> {
        Confirm::new().with_prompt(message).default(false).interact().map_err(|e| {
            AppError::Aborted(format!(
                "confirmation required but no interactive terminal available ({e}); \
                 re-run with --yes"
            ))
        })
    }
}
