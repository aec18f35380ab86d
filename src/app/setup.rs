//! Interactive setup wizard for first-run configuration.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use serde_json::{json, Map, Value};

use pankha_ilo::config::persistence::{load_config, save_config};
use pankha_ilo::config::types::{ConfigOptions, DEFAULTS_SECTION, DEFAULT_CLI_PATH};
use pankha_ilo::credentials::ConnectionArgs;
use pankha_ilo::operations::{self, ExecContext, Outcome};
use pankha_ilo::system::executor::check_available;

fn prompt(label: &str, default: Option<&str>) -> Result<String> {
    match default {
        Some(d) if !d.is_empty() => print!("{} [{}]: ", label, d),
        _ => print!("{}: ", label),
    }
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();
    Ok(if input.is_empty() { default.unwrap_or_default().to_string() } else { input.to_string() })
}

fn confirm(label: &str, default_yes: bool) -> Result<bool> {
    print!("{} {}: ", label, if default_yes { "(Y/n)" } else { "(y/N)" });
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();
    Ok(if input.is_empty() {
        default_yes
    } else {
        input.eq_ignore_ascii_case("y") || input.eq_ignore_ascii_case("yes")
    })
}

/// Password prompt; an existing password is kept on Enter and never echoed.
fn prompt_password(label: &str, existing: Option<&str>) -> Result<String> {
    let shown = existing.map(|_| "********");
    let answer = prompt(label, shown)?;
    Ok(match existing {
        Some(current) if answer == "********" => current.to_string(),
        _ => answer,
    })
}

/// Credentials section with the given fields, preserving any other keys in `section`.
pub fn credential_section(section: Option<&Value>, login: &str, password: &str, hostname: &str) -> Value {
    let mut map = section.and_then(Value::as_object).cloned().unwrap_or_else(Map::new);
    map.insert("login".to_string(), json!(login));
    map.insert("password".to_string(), json!(password));
    map.insert("hostname".to_string(), json!(hostname));
    Value::Object(map)
}

pub async fn run_setup_wizard(config_file: &Path) -> Result<()> {
    println!("\n╔══════════════════════════════════════════╗");
    println!("║     Pankha iLO Module Setup Wizard       ║");
    println!("╚══════════════════════════════════════════╝");
    println!("Build: \x1b[32mpankha-agent-ilo v{} ({})\x1b[0m\n", env!("CARGO_PKG_VERSION"), std::env::consts::ARCH);

    let existing = if config_file.exists() {
        println!("⚠️  Config file already exists: {:?}", config_file);
        if !confirm("Update it?", false)? {
            println!("Config unchanged.");
            return Ok(());
        }
        load_config(config_file.to_str()).await?
    } else {
        ConfigOptions::default()
    };

    println!("\n📋 Default iLO credentials:\n");
    println!("Values in [brackets] are defaults - press Enter to use them.\n");

    let hostname = prompt("iLO hostname", existing.option_str("hpilo.hostname"))?;
    let login = prompt("iLO login", Some(existing.option_str("hpilo.login").unwrap_or("Administrator")))?;
    let password = prompt_password("iLO password", existing.option_str("hpilo.password"))?;
    let current_tool = existing.tool_settings();
    let cli_path = prompt("hpilo_cli path", Some(current_tool.cli_path.as_str()))?;

    let mut root = existing.as_map().clone();
    let mut defaults = credential_section(root.get(DEFAULTS_SECTION), &login, &password, &hostname);
    if let Some(section) = defaults.as_object_mut() {
        if cli_path == DEFAULT_CLI_PATH {
            section.remove("cli_path");
        } else {
            section.insert("cli_path".to_string(), json!(cli_path));
        }
    }
    root.insert(DEFAULTS_SECTION.to_string(), defaults);

    while confirm("\nAdd a host profile?", false)? {
        let name = prompt("Profile name (e.g. server2-ilo)", None)?;
        if name.is_empty() || name == DEFAULTS_SECTION || name == "logging" {
            println!("   ⚠ '{}' cannot be used as a profile name", name);
            continue;
        }
        let profile_host = prompt("  iLO hostname", None)?;
        let profile_login = prompt("  iLO login", Some(login.as_str()))?;
        let profile_password = prompt_password("  iLO password", None)?;
        let section = credential_section(root.get(&name), &profile_login, &profile_password, &profile_host);
        root.insert(name, section);
    }

    let config = ConfigOptions::new(root);
    save_config(&config, config_file).await?;
    println!("\n✅ Configuration saved to: {:?}", config_file);

    if confirm("\n🔍 Test iLO connectivity now?", true)? {
        println!("\nTesting iLO connectivity...\n");

        let tool = config.tool_settings();
        if let Err(e) = check_available(&tool).await {
            println!("   ⚠ {}", e);
            println!("   Install python-hpilo (pip install python-hpilo) and re-run the test.");
        } else {
            let ctx = ExecContext::with_cli(config.clone());
            match operations::get_power_status(&ctx, &ConnectionArgs::default()).await {
                Ok(Outcome::Completed(status)) => {
                    println!("✅ {} reachable, host power is {}", hostname, if status.power { "ON" } else { "OFF" });
                }
                Ok(Outcome::Failed(failure)) => {
                    println!("   ⚠ {} answered with an error: {}", failure.hostname, failure.message);
                }
                Err(e) => println!("   ⚠ {}", e),
            }
        }
    }

    println!("\n✨ Setup complete!");
    println!("\n   Try: ./pankha-agent-ilo get_power_status");

    Ok(())
}
