//! Application runner logic
//!
//! Handles the different commands of the glyphmath binary

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::core::cli::{CheckArgs, CliArgs, Command, InterpolateArgs};
use crate::core::config_file::ConfigFile;
use crate::data::ufo::{check_fonts, interpolate_fonts, load_ufo_from_path, save_ufo_to_path, GlyphReport};
use crate::logging;

/// Run glyphmath with the given CLI arguments.
/// Handles special CLI flags and delegates to the command runners.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    // --new-config runs before logging so a broken settings file can be replaced
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory();
    }

    let (config, settings_error) = settings_or_default(ConfigFile::load());
    let _guard = logging::init_logging(config.log_filter(), cli_args.log_file)?;
    if let Some(error) = settings_error {
        warn!("{:#}; using default settings", error);
    }

    cli_args.validate()?;
    match &cli_args.command {
        Some(Command::Check(args)) => run_check(args, &config),
        Some(Command::Interpolate(args)) => run_interpolate(args, &config),
        None => bail!("No command given. Use `glyphmath check` or `glyphmath interpolate`."),
    }
}

/// Fall back to default settings, keeping the error to report once a
/// subscriber is installed.
fn settings_or_default(loaded: Result<ConfigFile>) -> (ConfigFile, Option<anyhow::Error>) {
    match loaded {
        Ok(config) => (config, None),
        Err(error) => (ConfigFile::default(), Some(error)),
    }
}

fn run_check(args: &CheckArgs, config: &ConfigFile) -> Result<()> {
    let font1 = load_ufo_from_path(&args.sources.first)?;
    let font2 = load_ufo_from_path(&args.sources.second)?;
    let options = args.compatibility_options(config);

    let reports = check_fonts(&font1, &font2, &args.sources.glyphs, options);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}", format_report(report));
        }
    }

    let incompatible = reports.iter().filter(|report| !report.compatible).count();
    info!(
        "{} of {} glyphs compatible",
        reports.len() - incompatible,
        reports.len()
    );
    Ok(())
}

fn format_report(report: &GlyphReport) -> String {
    if report.missing {
        format!("{}: missing", report.name)
    } else if report.compatible {
        format!("{}: compatible", report.name)
    } else {
        match &report.mismatch {
            Some(mismatch) => format!("{}: incompatible ({})", report.name, mismatch),
            None => format!("{}: incompatible (components or anchors)", report.name),
        }
    }
}

fn run_interpolate(args: &InterpolateArgs, config: &ConfigFile) -> Result<()> {
    let factor = args.get_factor(config);
    let font1 = load_ufo_from_path(&args.sources.first)?;
    let font2 = load_ufo_from_path(&args.sources.second)?;

    let (font, summary) = interpolate_fonts(&font1, &font2, factor, &args.sources.glyphs);
    if summary.interpolated.is_empty() {
        warn!("No glyph could be interpolated");
    }
    save_ufo_to_path(&font, &args.output)?;

    println!(
        "Wrote {} ({} glyphs interpolated, {} skipped)",
        args.output.display(),
        summary.interpolated.len(),
        summary.skipped.len()
    );
    Ok(())
}
