//! Render command: emit validated artifacts without converging the host.

use std::path::PathBuf;

use crate::app::steps::{write_file, write_private};
use crate::domain::{AppError, EncryptionKey, ProvisionConfig};
use crate::services::ArtifactRenderer;

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Write artifacts into this directory instead of the configured paths.
    pub output: Option<PathBuf>,
    /// Print artifacts instead of writing them.
    pub stdout: bool,
}

pub fn execute(
    config: &ProvisionConfig,
    renderer: &ArtifactRenderer,
    options: &RenderOptions,
) -> Result<(), AppError> {
    // Use the persisted key when one exists; otherwise render with an
    // ephemeral key rather than writing secrets outside a provision run.
    let (key, ephemeral) = match EncryptionKey::load(&config.key_path())? {
        Some(key) => (key, false),
        None => (EncryptionKey::generate(), true),
    };

    let compose = renderer.render_compose(config, &key)?;
    let unit = renderer.render_unit(config)?;

    if options.stdout {
        println!("# --- {} ---", config.compose_path().display());
        print!("{compose}");
        println!("# --- {} ---", config.unit_path.display());
        print!("{unit}");
    } else {
        let (compose_path, unit_path) = match &options.output {
            Some(dir) => (dir.join("docker-compose.yml"), dir.join(config.unit_name())),
            None => (config.compose_path(), config.unit_path.clone()),
        };

        write_private(&compose_path, &compose)?;
        write_file(&unit_path, &unit)?;
        println!("✅ Wrote {}", compose_path.display());
        println!("✅ Wrote {}", unit_path.display());
    }

    if ephemeral {
        eprintln!(
            "note: no persisted encryption key at {}; rendered with an ephemeral key",
            config.key_path().display()
        );
    }

    Ok(())
}
