use std::path::Path;

use crate::domain::AppError;
use crate::ports::{SystemUser, UserDatabase};

use super::command;

/// `id`/`useradd`/`chown`-backed user management.
#[derive(Debug, Default)]
pub struct UseraddDatabase;

impl UseraddDatabase {
    pub fn new() -> Self {
        Self
    }
}

impl UserDatabase for UseraddDatabase {
    fn lookup(&self, name: &str) -> Result<Option<SystemUser>, AppError> {
        // `id` exits non-zero for unknown accounts; that is the "absent" case,
        // not an error.
        let uid = match command::run("id", &["-u", name], &[]) {
            Ok(output) => output,
            Err(_) => return Ok(None),
        };
        let gid = command::run("id", &["-g", name], &[])?;

        let parse = |value: &str, what: &str| {
            value.parse::<u32>().map_err(|e| AppError::Command {
                command: format!("id for '{name}'"),
                details: format!("unparseable {what} '{value}': {e}"),
            })
        };

        Ok(Some(SystemUser {
            name: name.to_string(),
            uid: parse(&uid, "uid")?,
            gid: parse(&gid, "gid")?,
        }))
    }

    fn create_service_user(&self, name: &str, home: &Path) -> Result<(), AppError> {
        command::run(
            "useradd",
            &[
                "--system",
                "--home-dir",
                home.to_str().unwrap_or_default(),
                "--shell",
                "/usr/sbin/nologin",
                name,
            ],
            &[],
        )?;
        Ok(())
    }

    fn chown_recursive(&self, name: &str, path: &Path) -> Result<(), AppError> {
        let owner = format!("{name}:{name}");
        command::run("chown", &["-R", &owner, path.to_str().unwrap_or_default()], &[])?;
        Ok(())
    }

    #[cfg(unix)]
    fn is_owned_by(&self, path: &Path, user: &SystemUser) -> Result<bool, AppError> {
        use std::os::unix::fs::MetadataExt;
        let metadata = std::fs::metadata(path)?;
        Ok(metadata.uid() == user.uid)
    }

    #[cfg(not(unix))]
    fn is_owned_by(&self, _path: &Path, _user: &SystemUser) -> Result<bool, AppError> {
        Ok(true)
    }
}
