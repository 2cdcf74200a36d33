//! Command line interface for glyphmath
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::core::config_file::ConfigFile;
use crate::core::errors::{validate_factor, validate_ufo_path, AppResult};
use crate::math::{CompatibilityOptions, Factor};

/// glyphmath CLI arguments
///
/// Examples:
///   glyphmath check Light.ufo Bold.ufo                  # Compare every glyph
///   glyphmath check Light.ufo Bold.ufo -g a -g b --json # Compare two glyphs as JSON
///   glyphmath interpolate Light.ufo Bold.ufo --factor 0.5 --output Regular.ufo
///   glyphmath --new-config                              # Write default settings
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "glyphmath",
    version,
    about = "Glyph math on UFO sources",
    long_about = "glyphmath checks glyph compatibility between UFO masters and interpolates instances from them by adding, subtracting and scaling outlines, anchors and components."
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    /// Initialize user configuration directory with settings
    ///
    /// This creates the ~/.config/glyphmath directory with a settings.json
    /// holding the default values and a logs/ directory.
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with default settings"
    )]
    pub new_config: bool,

    /// Also write logs to ~/.config/glyphmath/logs/
    #[clap(long = "log-file", global = true)]
    pub log_file: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Report glyph compatibility between two UFO sources
    Check(CheckArgs),
    /// Interpolate glyphs between two UFO sources into a new UFO
    Interpolate(InterpolateArgs),
}

/// The two sources and the glyph subset shared by every command
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// First UFO source
    pub first: PathBuf,

    /// Second UFO source
    pub second: PathBuf,

    /// Restrict to these glyphs (repeatable); defaults to every glyph
    #[clap(long = "glyph", short = 'g')]
    pub glyphs: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[clap(flatten)]
    pub sources: SourceArgs,

    /// Also require matching components
    #[clap(long)]
    pub components: bool,

    /// Also require matching anchors
    #[clap(long)]
    pub anchors: bool,

    /// Print the report as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InterpolateArgs {
    #[clap(flatten)]
    pub sources: SourceArgs,

    /// Interpolation factor; 0 is the first source, 1 the second
    #[clap(long, short = 'f', allow_negative_numbers = true)]
    pub factor: Option<f64>,

    /// Separate vertical factor; defaults to --factor
    #[clap(long = "factor-y", allow_negative_numbers = true)]
    pub factor_y: Option<f64>,

    /// Where to write the interpolated UFO
    #[clap(long, short = 'o')]
    pub output: PathBuf,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that all paths exist and factors are usable before any
    /// font is loaded, providing clear error messages for common mistakes.
    pub fn validate(&self) -> AppResult<()> {
        match &self.command {
            Some(Command::Check(args)) => args.sources.validate(),
            Some(Command::Interpolate(args)) => {
                args.sources.validate()?;
                if let Some(factor) = args.factor {
                    validate_factor("--factor", factor)?;
                }
                if let Some(factor_y) = args.factor_y {
                    validate_factor("--factor-y", factor_y)?;
                }
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl SourceArgs {
    fn validate(&self) -> AppResult<()> {
        validate_ufo_path(&self.first)?;
        validate_ufo_path(&self.second)
    }
}

impl CheckArgs {
    /// Compatibility options from CLI flags, then the config file
    pub fn compatibility_options(&self, config: &ConfigFile) -> CompatibilityOptions {
        CompatibilityOptions {
            contours: true,
            components: self.components || config.test_components.unwrap_or(false),
            anchors: self.anchors || config.test_anchors.unwrap_or(false),
        }
    }
}

impl InterpolateArgs {
    /// Get the interpolation factor from CLI args, config file, or default
    ///
    /// Priority order:
    /// 1. CLI argument (--factor, --factor-y)
    /// 2. Config file setting (~/.config/glyphmath/settings.json)
    /// 3. Built-in default (0.5)
    pub fn get_factor(&self, config: &ConfigFile) -> Factor {
        let x = match self.factor {
            Some(factor) => {
                debug!("Using factor from CLI: {}", factor);
                factor
            }
            None => {
                debug!("Using factor from settings: {}", config.factor());
                config.factor()
            }
        };
        match self.factor_y {
            Some(y) if y != x => Factor::PerAxis(x, y),
            _ => Factor::Uniform(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let args = CliArgs::parse_from([
            "glyphmath", "check", "A.ufo", "B.ufo", "-g", "a", "--glyph", "b", "--anchors", "--json",
        ]);
        let Some(Command::Check(check)) = args.command else {
            panic!("expected check");
        };
        assert_eq!(check.sources.glyphs, vec!["a", "b"]);
        assert!(check.anchors);
        assert!(!check.components);
        assert!(check.json);

        let options = check.compatibility_options(&ConfigFile::default());
        assert_eq!(
            options,
            CompatibilityOptions {
                contours: true,
                components: false,
                anchors: true,
            }
        );
    }

    #[test]
    fn test_factor_priority() {
        let args = CliArgs::parse_from([
            "glyphmath", "interpolate", "A.ufo", "B.ufo", "--output", "C.ufo",
        ]);
        let Some(Command::Interpolate(interpolate)) = args.command else {
            panic!("expected interpolate");
        };
        assert_eq!(interpolate.get_factor(&ConfigFile::default()), Factor::Uniform(0.5));

        let config = ConfigFile {
            default_factor: Some(0.25),
            ..ConfigFile::default()
        };
        assert_eq!(interpolate.get_factor(&config), Factor::Uniform(0.25));

        let args = CliArgs::parse_from([
            "glyphmath", "interpolate", "A.ufo", "B.ufo", "-o", "C.ufo", "--factor", "-0.5",
            "--factor-y", "1.5",
        ]);
        let Some(Command::Interpolate(interpolate)) = args.command else {
            panic!("expected interpolate");
        };
        assert_eq!(interpolate.get_factor(&config), Factor::PerAxis(-0.5, 1.5));
    }

    #[test]
    fn test_validate_missing_source() {
        let args = CliArgs::parse_from(["glyphmath", "check", "/nope/A.ufo", "/nope/B.ufo"]);
        assert!(args.validate().is_err());
        assert!(CliArgs::parse_from(["glyphmath", "--new-config"]).validate().is_ok());
    }
}
