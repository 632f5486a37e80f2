use crate::domain::AppError;

/// Interactive confirmation before destructive or lock-out-prone actions.
pub trait ConfirmPrompt {
    /// Ask the user to confirm; `Ok(false)` means they declined.
    fn confirm(&self, message: &str) -> Result<bool, AppError>;
}

/// Prompt that approves everything, for `--yes` runs and tests.
pub struct AutoApprove;

impl ConfirmPrompt for AutoApprove {
    fn confirm(&self, _message: &str) -> Result<bool, AppError> {
        Ok(true)
    }
}
