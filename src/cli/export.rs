//! JSON export of route results with overwrite protection

use std::io::Write;
use std::path::Path;

use ecoroute::{Error, Result};
use serde::Serialize;

/// Overwrite behavior for existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteBehavior {
    /// Prompt user for confirmation (default)
    #[default]
    Prompt,
    /// Force overwrite without prompting
    Force,
    /// Never overwrite, fail if file exists
    NeverOverwrite,
}

impl OverwriteBehavior {
    pub fn from_flags(force: bool, no_clobber: bool) -> Self {
        if force {
            OverwriteBehavior::Force
        } else if no_clobber {
            OverwriteBehavior::NeverOverwrite
        } else {
            OverwriteBehavior::Prompt
        }
    }
}

/// Check if destination file exists and handle overwrite behavior
pub fn check_overwrite_permission(file_path: &Path, behavior: OverwriteBehavior) -> Result<()> {
    if !file_path.exists() {
        return Ok(());
    }

    let shown = file_path.display();
    match behavior {
        OverwriteBehavior::Force => {
            eprintln!("⚠️  Overwriting existing file: {shown}");
            Ok(())
        }
        OverwriteBehavior::NeverOverwrite => Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("File already exists: {shown} (use --force to overwrite)"),
        ))),
        OverwriteBehavior::Prompt => {
            eprintln!("⚠️  File already exists: {shown}");
            eprint!("Overwrite? [y/N]: ");
            std::io::stderr().flush()?;

            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;

            match input.trim().to_lowercase().as_str() {
                "y" | "yes" => Ok(()),
                _ => Err(Error::IoError(std::io::Error::new(
                    std::io::ErrorKind::Interrupted,
                    "Export cancelled by user",
                ))),
            }
        }
    }
}

/// Write `value` as pretty JSON to `file_path`, honoring the overwrite behavior
pub fn write_json<T: Serialize>(
    file_path: &Path,
    value: &T,
    behavior: OverwriteBehavior,
) -> Result<()> {
    check_overwrite_permission(file_path, behavior)?;

    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::InvalidInput(format!("could not serialize result: {e}")))?;
    std::fs::write(file_path, json + "\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_from_flags() {
        assert_eq!(OverwriteBehavior::from_flags(true, false), OverwriteBehavior::Force);
        assert_eq!(
            OverwriteBehavior::from_flags(false, true),
            OverwriteBehavior::NeverOverwrite
        );
        assert_eq!(OverwriteBehavior::from_flags(false, false), OverwriteBehavior::Prompt);
    }

    #[test]
    fn test_new_file_is_always_allowed() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("route.json");
        for behavior in [
            OverwriteBehavior::Force,
            OverwriteBehavior::NeverOverwrite,
            OverwriteBehavior::Prompt,
        ] {
            assert!(check_overwrite_permission(&file_path, behavior).is_ok());
        }
    }

    #[test]
    fn test_never_overwrite_existing_file() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "existing content").unwrap();

        match check_overwrite_permission(temp_file.path(), OverwriteBehavior::NeverOverwrite) {
            Err(Error::IoError(io_err)) => {
                assert_eq!(io_err.kind(), std::io::ErrorKind::AlreadyExists);
                assert!(io_err.to_string().contains("use --force to overwrite"));
            }
            other => panic!("Expected AlreadyExists error, got {other:?}"),
        }
    }

    #[test]
    fn test_write_json_force_replaces_content() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "existing content").unwrap();

        write_json(
            temp_file.path(),
            &serde_json::json!({ "eco_friendly": "bike" }),
            OverwriteBehavior::Force,
        )
        .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(temp_file.path()).unwrap()).unwrap();
        assert_eq!(written["eco_friendly"], "bike");
    }
}
