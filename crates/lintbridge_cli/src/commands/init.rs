//! Init command implementation

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use tracing::info;

use lintbridge_core::Config;

/// Starter configuration written to the first config file name.
const STARTER_CONFIG: &str = Config::TEMPLATE;

pub fn run_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(Config::CONFIG_FILES[0]);
    write_starter_config(&config_path, force)?;
    info!("Created {}", config_path.display());
    Ok(())
}

/// Writes the starter config to `path`.
///
/// An existing file is only replaced with `force`. Symlinks at `path` are
/// never followed.
fn write_starter_config(path: &Path, force: bool) -> Result<()> {
    if force {
        match fs::remove_file(path) {
            Ok(()) => info!("Replacing {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e).into_diagnostic(),
        }
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW);
    }

    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(miette::miette!(
                "{} already exists. Use --force to overwrite.",
                path.display()
            ));
        }
        Err(e) => return Err(e).into_diagnostic(),
    };

    file.write_all(STARTER_CONFIG.as_bytes()).into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".lintbridge.jsonc");

        write_starter_config(&path, false).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.tool.program, "verible-verilog-lint");
    }

    #[test]
    fn test_existing_file_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".lintbridge.jsonc");
        fs::write(&path, "{}").unwrap();

        assert!(write_starter_config(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");

        write_starter_config(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), STARTER_CONFIG);
    }
}
