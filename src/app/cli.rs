//! Command-line argument definitions (clap).

use clap::{Args as ClapArgs, Parser, Subcommand};

use pankha_ilo::credentials::ConnectionArgs;
use pankha_ilo::operations::{ListUsersArgs, PowerOffArgs, Request};

#[derive(Parser, Debug)]
#[command(name = "pankha-agent-ilo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pankha HP iLO execution module: out-of-band power, inventory and boot queries", long_about = None)]
#[command(after_help = "Credentials: pass --hostname, --login and --password together, or --profile <name>, \
or configure the 'hpilo' defaults in config.json.")]
pub struct Args {
    /// Path to config.json (default: next to the executable)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Set log level (TRACE, DEBUG, INFO, WARN, ERROR, CRITICAL)
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    // === Setup & Diagnostics ===
    /// Run interactive setup wizard
    #[arg(short = 'e', long, help_heading = "Setup & Diagnostics")]
    pub setup: bool,

    /// Run health check (config, hpilo_cli, credentials)
    #[arg(long, help_heading = "Setup & Diagnostics")]
    pub check: bool,

    /// Show current configuration (passwords masked)
    #[arg(short = 'c', long = "show-config", help_heading = "Setup & Diagnostics")]
    pub show_config: bool,

    #[command(subcommand)]
    pub operation: Option<OperationCommand>,
}

/// Connection flags shared by every operation.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ConnectionFlags {
    /// Named host profile from the configuration
    #[arg(long)]
    pub profile: Option<String>,

    /// iLO hostname (needs --login and --password too)
    #[arg(long)]
    pub hostname: Option<String>,

    /// iLO login name
    #[arg(long)]
    pub login: Option<String>,

    /// iLO password
    #[arg(long)]
    pub password: Option<String>,

    /// Defer connecting to the iLO until the first request
    #[arg(long)]
    pub delay: bool,
}

impl From<ConnectionFlags> for ConnectionArgs {
    fn from(flags: ConnectionFlags) -> Self {
        ConnectionArgs {
            profile: flags.profile,
            hostname: flags.hostname,
            login: flags.login,
            password: flags.password,
            delay: flags.delay,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
#[command(rename_all = "snake_case")]
pub enum OperationCommand {
    /// Current host power state
    GetPowerStatus(ConnectionFlags),

    /// Power on the host
    PowerOn(ConnectionFlags),

    /// Power off the host by pressing (or holding) the power button
    PowerOff {
        /// Hold the button to force the host off
        #[arg(long)]
        hold: bool,
        #[command(flatten)]
        connection: ConnectionFlags,
    },

    /// Configured iLO users
    ListUsers {
        /// Full per-user records instead of names
        #[arg(long)]
        detailed: bool,
        #[command(flatten)]
        connection: ConnectionFlags,
    },

    /// Product name, firmware versions and asset tag
    ProductInfo(ConnectionFlags),

    /// iLO network configuration
    NetworkSettings(ConnectionFlags),

    /// Persistent boot order
    GetBootOrder(ConnectionFlags),
}

impl From<OperationCommand> for Request {
    fn from(command: OperationCommand) -> Self {
        match command {
            OperationCommand::GetPowerStatus(c) => Request::GetPowerStatus(c.into()),
            OperationCommand::PowerOn(c) => Request::PowerOn(c.into()),
            OperationCommand::PowerOff { hold, connection } => Request::PowerOff(PowerOffArgs {
                hold,
                connection: connection.into(),
            }),
            OperationCommand::ListUsers { detailed, connection } => Request::ListUsers(ListUsersArgs {
                detailed,
                connection: connection.into(),
            }),
            OperationCommand::ProductInfo(c) => Request::ProductInfo(c.into()),
            OperationCommand::NetworkSettings(c) => Request::NetworkSettings(c.into()),
            OperationCommand::GetBootOrder(c) => Request::GetBootOrder(c.into()),
        }
    }
}
