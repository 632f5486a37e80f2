use std::path::Path;

use crate::domain::AppError;

/// A resolved system account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemUser {
    pub name: String,
    pub uid: u32,
    pub gid: u32,
}

/// System user management operations.
pub trait UserDatabase {
    /// Look up an account by name.
    fn lookup(&self, name: &str) -> Result<Option<SystemUser>, AppError>;

    /// Create a system (non-login) account with the given home directory.
    fn create_service_user(&self, name: &str, home: &Path) -> Result<(), AppError>;

    /// Recursively hand ownership of `path` to `name`.
    fn chown_recursive(&self, name: &str, path: &Path) -> Result<(), AppError>;

    /// Whether `path` is owned by `user`.
    fn is_owned_by(&self, path: &Path, user: &SystemUser) -> Result<bool, AppError>;
}
