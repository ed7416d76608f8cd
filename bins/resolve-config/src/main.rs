//! resolve-config
//!
//! Resolves Android build-variant configuration from layered property
//! files and prints it for downstream build tooling.

mod render;

use buildvar_android::{BuildDefaults, ConfigResolver};
use buildvar_cli::output::{self, format_count, format_duration, Status};
use buildvar_core::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
use buildvar_core::properties::{parse_assignment, PropertySource};
use buildvar_telemetry::{TelemetryConfig, Timer};
use clap::Parser;
use render::OutputFormat;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resolve-config")]
#[command(about = "Resolve Android build-variant configuration from layered property files")]
#[command(version)]
struct Cli {
    /// Property files, lowest precedence first; missing files are skipped
    sources: Vec<PathBuf>,

    /// Defaults file (TOML); searched in standard locations when omitted
    #[arg(short, long, env = "BUILDVAR_DEFAULTS")]
    defaults: Option<PathBuf>,

    /// Override a property, applied after every file
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Fail instead of signing release builds with the debug keystore
    #[arg(long)]
    strict_signing: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }
    output::set_quiet(cli.quiet);

    let mut telemetry = TelemetryConfig::from_verbosity(cli.verbose, cli.quiet);
    telemetry.ansi = !cli.no_color;
    if let Err(e) = buildvar_telemetry::init_with_config(telemetry) {
        Status::warning(&format!("Logging disabled: {}", e));
    }

    let exit_code = match run(&cli) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            tracing::debug!(code = %e.code, "Resolution failed");
            render::error(&e, cli.format);
            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let timer = Timer::start("resolve-config");

    let defaults = load_defaults(cli.defaults.as_deref())?;

    let mut sources = load_sources(&cli.sources)?;
    if !cli.overrides.is_empty() {
        sources.push(Some(inline_overrides(&cli.overrides)?));
    }
    let present = sources.iter().flatten().count();

    let config = ConfigResolver::new().resolve(&sources, &defaults)?;

    if config.release_signing_fallback() {
        if cli.strict_signing {
            return Err(Error::new(
                ErrorCode::SigningFallbackRefused,
                "No release signing credentials supplied",
            )
            .with_suggestion(
                "Provide storeFile, storePassword, keyAlias and keyPassword (usually in android/key.properties)",
            ));
        }
        Status::warning(
            "No release keystore configured; release builds will be signed with the debug keystore and must not be distributed",
        );
    }

    render::config(&config, cli.format)?;

    Status::success(&format!(
        "Resolved {} from {} in {}",
        config.application_id(),
        format_count(present, "source", "sources"),
        format_duration(timer.stop())
    ));

    Ok(())
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

fn load_defaults(path: Option<&Path>) -> Result<BuildDefaults> {
    if let Some(path) = path {
        let path = expand(path);
        return BuildDefaults::load(&path).context("Loading build defaults");
    }

    match BuildDefaults::discover(Path::new("."))? {
        Some((path, defaults)) => {
            tracing::info!(path = %path.display(), "Using discovered defaults file");
            Ok(defaults)
        }
        None => {
            tracing::debug!("No defaults file found; starting from empty defaults");
            Ok(BuildDefaults::default())
        }
    }
}

fn load_sources(paths: &[PathBuf]) -> Result<Vec<Option<PropertySource>>> {
    paths
        .iter()
        .map(|path| -> Result<Option<PropertySource>> {
            let source = PropertySource::load(expand(path))?;
            if source.is_none() {
                Status::info(&format!("Skipping missing property file {}", path.display()));
            }
            Ok(source)
        })
        .collect()
}

fn inline_overrides(assignments: &[String]) -> Result<PropertySource> {
    let pairs = assignments
        .iter()
        .map(|arg| parse_assignment(arg).context("Parsing --set"))
        .collect::<Result<Vec<_>>>()?;

    Ok(PropertySource::from_pairs(pairs).with_origin("--set"))
}
