//! pankha-agent-ilo entry point: CLI dispatch and async runtime.

mod app;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::{debug, error, warn};

use app::cli::Args;
use app::logging::{init_tracing, level_filter, set_level};
use app::setup::run_setup_wizard;
use app::status::{run_health_check, show_config};
use pankha_ilo::config::persistence::{load_config, resolve_config_path};
use pankha_ilo::operations::{invoke, ExecContext, Request};
use pankha_ilo::system::executor::check_available;

#[tokio::main]
async fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Custom version output with architecture (green)
            if err.kind() == clap::error::ErrorKind::DisplayVersion {
                println!("\x1b[32mpankha-agent-ilo {} ({})\x1b[0m", env!("CARGO_PKG_VERSION"), std::env::consts::ARCH);
                std::process::exit(0);
            }
            err.exit();
        }
    };

    // Priority: 1. --log-level flag, 2. LOG_LEVEL env, 3. config file, 4. default (info)
    let requested_level = args
        .log_level
        .clone()
        .or_else(|| std::env::var("LOG_LEVEL").ok());
    let filter = match requested_level.as_deref() {
        Some(level) => level_filter(level).unwrap_or_else(|| {
            eprintln!("Invalid log level '{}'. Using INFO. Valid levels: TRACE, DEBUG, INFO, WARN, ERROR, CRITICAL", level);
            "info"
        }),
        None => "info",
    };
    let reload_handle = init_tracing(filter);

    let config_path = resolve_config_path(args.config.as_deref())?;

    if args.setup {
        return run_setup_wizard(&config_path).await;
    }

    let options = load_config(config_path.to_str()).await?;

    if requested_level.is_none() {
        let configured = options.logging().log_level;
        match level_filter(&configured) {
            Some(level) => set_level(&reload_handle, level)?,
            None => warn!("Invalid log level '{}' in config, keeping INFO", configured),
        }
    }

    if args.check {
        let healthy = run_health_check(&config_path, &options).await?;
        std::process::exit(if healthy { 0 } else { 1 });
    }

    if args.show_config {
        return show_config(&config_path, &options);
    }

    let Some(command) = args.operation else {
        eprintln!("ERROR: No operation specified.");
        eprintln!();
        Args::command().print_help()?;
        eprintln!();
        eprintln!("Common commands:");
        eprintln!("  ./pankha-agent-ilo get_power_status --profile server1-ilo");
        eprintln!("  ./pankha-agent-ilo power_off --hold --profile server1-ilo");
        eprintln!("  ./pankha-agent-ilo --check");
        std::process::exit(1);
    };

    let tool = options.tool_settings();
    if let Err(e) = check_available(&tool).await {
        error!("The iLO module cannot run: {}", e);
        error!("Install python-hpilo or set 'hpilo.cli_path' in {:?}", config_path);
        std::process::exit(1);
    }

    let request: Request = command.into();
    debug!("Invoking {}", request.operation());

    let ctx = ExecContext::with_cli(options);
    match invoke(&ctx, &request).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            error!("{} failed: {}", request.operation(), e);
            std::process::exit(1);
        }
    }
}
