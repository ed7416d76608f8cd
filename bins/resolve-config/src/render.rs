//! Output rendering for resolved configurations and errors

use buildvar_android::signing::redact;
use buildvar_android::{BuildConfig, BuildVariant};
use buildvar_cli::output::Status;
use buildvar_core::error::{Error, Result};
use clap::ValueEnum;

const LABEL_WIDTH: usize = 14;

/// How the resolved configuration is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary with secrets masked
    Text,
    /// Full configuration as JSON
    Json,
    /// Flat key=value lines, usable as a property source
    Properties,
}

/// Print a resolved configuration to stdout
pub fn config(config: &BuildConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => text(config),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Properties => {
            println!("# Resolved by resolve-config");
            print!("{}", config.to_property_source().to_properties_string());
        }
    }
    Ok(())
}

fn text(config: &BuildConfig) {
    Status::header("Build configuration");
    Status::field("applicationId", config.application_id(), LABEL_WIDTH);
    Status::field("namespace", config.namespace(), LABEL_WIDTH);
    Status::field("minSdk", &config.min_sdk().to_string(), LABEL_WIDTH);
    Status::field("targetSdk", &config.target_sdk().to_string(), LABEL_WIDTH);
    Status::field("compileSdk", &config.compile_sdk().to_string(), LABEL_WIDTH);
    Status::field("versionCode", &config.version_code().to_string(), LABEL_WIDTH);
    Status::field("versionName", config.version_name(), LABEL_WIDTH);
    Status::field("ndkVersion", config.ndk_version().unwrap_or("(toolchain default)"), LABEL_WIDTH);
    Status::field("jvmTarget", config.jvm_target(), LABEL_WIDTH);

    Status::subheader("Signing");
    for (variant, creds) in config.signing_map().iter() {
        let summary = if variant == BuildVariant::Release && config.release_signing_fallback() {
            "debug keystore (fallback)".to_string()
        } else {
            format!(
                "{} alias={} storePassword={} keyPassword={}",
                creds.store_file.as_deref().unwrap_or("(unset)"),
                creds.key_alias.as_deref().unwrap_or("(unset)"),
                redact(creds.store_password.as_deref()),
                redact(creds.key_password.as_deref()),
            )
        };
        Status::field(variant.as_str(), &summary, LABEL_WIDTH);
    }
}

/// Report a failure; JSON output gets a machine-readable report on stdout
pub fn error(err: &Error, format: OutputFormat) {
    if format == OutputFormat::Json {
        if let Ok(json) = serde_json::to_string_pretty(&err.to_report()) {
            println!("{}", json);
        }
    }

    Status::error(&format!("[{}] {}", err.code, err.message));
    if let Some(context) = &err.context {
        Status::hint(context);
    }
    if let Some(suggestion) = &err.suggestion {
        Status::hint(suggestion);
    }
}
