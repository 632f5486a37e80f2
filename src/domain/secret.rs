//! Application encryption key: generated once, persisted, never rotated implicitly.

use std::fmt;
use std::path::Path;

use rand::RngCore;

use crate::domain::AppError;

/// Where a key came from during `load_or_generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Read back from an existing key file.
    Existing,
    /// Freshly generated this run.
    Generated,
}

/// A 32-byte application encryption key, hex-encoded.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey(String);

impl EncryptionKey {
    pub const BYTE_LEN: usize = 32;
    pub const HEX_LEN: usize = Self::BYTE_LEN * 2;

    /// Generate a fresh random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; Self::BYTE_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Parse a key from its hex form; surrounding whitespace is tolerated.
    pub fn parse(content: &str) -> Result<Self, String> {
        let trimmed = content.trim();
        if trimmed.len() != Self::HEX_LEN {
            return Err(format!("expected {} hex characters, found {}", Self::HEX_LEN, trimmed.len()));
        }
        if !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("contains non-hexadecimal characters".to_string());
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Read the key at `path` if one exists and is well formed.
    ///
    /// Returns `Ok(None)` when the file is absent; a present-but-malformed
    /// file is reported so callers can decide whether to regenerate.
    pub fn load(path: &Path) -> Result<Option<Self>, AppError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map(Some)
            .map_err(|reason| AppError::MalformedKey { path: path.display().to_string(), reason })
    }

    /// Read the key at `path`, generating and persisting one when absent.
    ///
    /// A valid existing key is always preserved; re-running provisioning
    /// must not rotate it.
    pub fn load_or_generate(path: &Path) -> Result<(Self, KeySource), AppError> {
        if let Some(existing) = Self::load(path)? {
            return Ok((existing, KeySource::Existing));
        }
        let key = Self::generate();
        key.persist(path)?;
        Ok((key, KeySource::Generated))
    }

    /// Write the key to `path` with owner-only permissions.
    pub fn persist(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, format!("{}\n", self.0))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// The hex-encoded key material.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Keep key material out of debug output and reports.
impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey(<redacted>)")
    }
}
