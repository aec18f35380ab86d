//! Health check and configuration display.

use std::path::Path;

use anyhow::Result;

use pankha_ilo::config::types::{ConfigOptions, DEFAULTS_SECTION};
use pankha_ilo::credentials::{self, ConnectionArgs};
use pankha_ilo::system::executor::check_available;

pub fn banner() {
    println!("\x1b[32mpankha-agent-ilo v{} ({})\x1b[0m", env!("CARGO_PKG_VERSION"), std::env::consts::ARCH);
}

/// Findings of a health check, one line each.
#[derive(Debug, Default)]
pub struct HealthReport {
    pub lines: Vec<String>,
    pub all_ok: bool,
}

pub async fn collect_health(config_path: &Path, options: &ConfigOptions) -> HealthReport {
    let mut lines = Vec::new();
    let mut all_ok = true;

    if config_path.exists() {
        lines.push(format!("✓ Config file: {}", config_path.display()));
    } else {
        lines.push(format!("✗ Config file: NOT FOUND ({})", config_path.display()));
        lines.push("  Run: ./pankha-agent-ilo --setup".to_string());
        all_ok = false;
    }

    let tool = options.tool_settings();
    match check_available(&tool).await {
        Ok(()) => lines.push(format!("✓ hpilo_cli: {}", tool.cli_path)),
        Err(e) => {
            lines.push(format!("✗ hpilo_cli: {}", e));
            lines.push("  Install python-hpilo or set 'hpilo.cli_path' in the config".to_string());
            all_ok = false;
        }
    }

    match credentials::resolve(&ConnectionArgs::default(), options) {
        Ok(creds) => lines.push(format!("✓ Default credentials: {}@{}", creds.login, creds.hostname)),
        Err(e) => lines.push(format!("⚠ Default credentials: {}", e)),
    }

    let profiles = options.profile_names();
    if profiles.is_empty() {
        lines.push("- Host profiles: none".to_string());
    } else {
        for name in profiles {
            match credentials::resolve(&ConnectionArgs::profile(name), options) {
                Ok(creds) => lines.push(format!("✓ Profile {}: {}@{}", name, creds.login, creds.hostname)),
                Err(e) => {
                    lines.push(format!("✗ Profile {}: {}", name, e));
                    all_ok = false;
                }
            }
        }
    }

    HealthReport { lines, all_ok }
}

/// Run health check to verify the module can reach its tooling.
pub async fn run_health_check(config_path: &Path, options: &ConfigOptions) -> Result<bool> {
    banner();
    println!("Health Check");
    println!("============\n");

    let report = collect_health(config_path, options).await;
    for line in &report.lines {
        println!("{}", line);
    }

    println!();
    if report.all_ok {
        println!("\x1b[32m✓ All checks passed!\x1b[0m");
    } else {
        println!("\x1b[33m⚠ Some issues found - see above\x1b[0m");
    }

    Ok(report.all_ok)
}

pub fn show_config(config_path: &Path, options: &ConfigOptions) -> Result<()> {
    banner();
    println!("Config file: {}", config_path.display());
    if options.option(DEFAULTS_SECTION).is_none() && options.profile_names().is_empty() {
        println!("(no iLO defaults or profiles configured)");
    }
    println!("{}", serde_json::to_string_pretty(&options.masked())?);
    Ok(())
}
