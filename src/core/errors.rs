//! Application error helpers
//!
//! Everything outside the math library reports errors through `anyhow`.
//! File operations attach what was being done and to which path.

use std::fmt::Display;
use std::path::Path;

use anyhow::{bail, Context};

pub type AppResult<T> = anyhow::Result<T>;

/// Attach an action and a path to a fallible file operation.
pub trait FileContext<T> {
    fn with_file_context(self, action: &str, path: &Path) -> AppResult<T>;
}

impl<T, E> FileContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_file_context(self, action: &str, path: &Path) -> AppResult<T> {
        self.with_context(|| format!("Failed to {} {}", action, path.display()))
    }
}

/// Check that `path` looks like a UFO directory before handing it to norad.
pub fn validate_ufo_path(path: &Path) -> AppResult<()> {
    if !path.exists() {
        bail!(
            "Font source does not exist: {}\nMake sure the path is correct and the directory exists.",
            path.display()
        );
    }
    if !path.is_dir() {
        bail!(
            "Not a UFO directory: {}\nGlyph math works on UFO sources only.",
            path.display()
        );
    }
    if !path.join("metainfo.plist").exists() {
        bail!(
            "Not a valid UFO directory: missing metainfo.plist in {}",
            path.display()
        );
    }
    Ok(())
}

/// Reject factors that would poison every coordinate.
pub fn validate_factor(label: &str, value: impl Into<f64> + Display + Copy) -> AppResult<()> {
    if !value.into().is_finite() {
        bail!("{} must be a finite number, got {}", label, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_is_rejected() {
        let error = validate_ufo_path(Path::new("/definitely/not/here.ufo")).unwrap_err();
        assert!(error.to_string().contains("does not exist"));
    }

    #[test]
    fn test_directory_without_metainfo_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let error = validate_ufo_path(dir.path()).unwrap_err();
        assert!(error.to_string().contains("metainfo.plist"));

        std::fs::write(dir.path().join("metainfo.plist"), "").unwrap();
        assert!(validate_ufo_path(dir.path()).is_ok());
    }

    #[test]
    fn test_file_context_message() {
        let path = Path::new("missing.ufo");
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let error = result.with_file_context("load", path).unwrap_err();
        assert_eq!(error.to_string(), "Failed to load missing.ufo");
    }

    #[test]
    fn test_factor_validation() {
        assert!(validate_factor("--factor", 0.5).is_ok());
        assert!(validate_factor("--factor", f64::NAN).is_err());
        assert!(validate_factor("--factor-y", f64::INFINITY).is_err());
    }
}
