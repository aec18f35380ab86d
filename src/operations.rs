//! iLO operations.
//!
//! Every operation resolves one credential set, builds one client handle and
//! makes one remote call (`product_info` makes three queries on its handle).
//! A failing remote call is logged with the iLO hostname and comes back as
//! [`Outcome::Failed`]; only credential problems are `Err`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::types::ConfigOptions;
use crate::credentials::{self, ConnectionArgs};
use crate::error::{IloError, Result};
use crate::ilo::{CliClientFactory, ClientFactory, IloClient, Record};

pub mod invoke;

pub use invoke::{invoke, Operation, Request};

/// Everything an operation needs besides its own arguments.
#[derive(Clone)]
pub struct ExecContext {
    pub options: ConfigOptions,
    factory: Arc<dyn ClientFactory>,
}

impl ExecContext {
    pub fn new(options: ConfigOptions, factory: Arc<dyn ClientFactory>) -> Self {
        Self { options, factory }
    }

    /// Context that talks to real iLOs through `hpilo_cli`.
    pub fn with_cli(options: ConfigOptions) -> Self {
        let factory = CliClientFactory::new(options.tool_settings());
        Self::new(options, Arc::new(factory))
    }

    async fn login(&self, args: &ConnectionArgs) -> Result<Box<dyn IloClient>> {
        let creds = credentials::resolve(args, &self.options)?;
        self.factory.connect(creds, args.delay).await
    }
}

/// A remote call that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFailure {
    pub hostname: String,
    pub message: String,
}

/// Result of an operation that got as far as talking to the iLO.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Completed(T),
    Failed(RemoteFailure),
}

impl<T> Outcome<T> {
    /// Log a failed remote call and wrap it.
    fn failed(client: &dyn IloClient, action: &str, err: IloError) -> Self {
        error!("Failed to {} {}: {}", action, client.hostname(), err);
        Outcome::Failed(RemoteFailure {
            hostname: client.hostname().to_string(),
            message: err.to_string(),
        })
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

impl<T: Serialize> Outcome<T> {
    /// JSON for the calling framework. Failures become `on_failure`.
    pub fn render(self, on_failure: Value) -> Value {
        match self {
            Outcome::Completed(value) => serde_json::to_value(value).unwrap_or(on_failure),
            Outcome::Failed(_) => on_failure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerStatus {
    pub power: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerState {
    pub power_state: Option<bool>,
}

impl PowerState {
    pub const ON: Self = Self { power_state: Some(true) };
    pub const OFF: Self = Self { power_state: Some(false) };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserList {
    Names(Vec<String>),
    /// Full records keyed by login name
    Detailed(Record),
}

pub type ProductInfo = Record;
pub type NetworkSettings = Record;
pub type BootOrder = Vec<String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerOffArgs {
    /// Hold the power button (forced off) instead of pressing it
    #[serde(default)]
    pub hold: bool,
    #[serde(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListUsersArgs {
    #[serde(default)]
    pub detailed: bool,
    #[serde(flatten)]
    pub connection: ConnectionArgs,
}

/// Current host power, `{power: true}` only for "ON".
pub async fn get_power_status(ctx: &ExecContext, args: &ConnectionArgs) -> Result<Outcome<PowerStatus>> {
    let ilo = ctx.login(args).await?;

    match ilo.get_host_power_status().await {
        Ok(state) => Ok(Outcome::Completed(PowerStatus { power: state == "ON" })),
        Err(e) => Ok(Outcome::failed(&*ilo, "get power state of", e)),
    }
}

pub async fn power_on(ctx: &ExecContext, args: &ConnectionArgs) -> Result<Outcome<PowerState>> {
    let ilo = ctx.login(args).await?;

    info!("Powering on {}", ilo.hostname());
    match ilo.set_host_power(true).await {
        Ok(()) => Ok(Outcome::Completed(PowerState::ON)),
        Err(e) => Ok(Outcome::failed(&*ilo, "power on", e)),
    }
}

/// Power off via the power button: pressed by default (the OS shuts down),
/// held with `hold` (forced off).
///
/// Pressing the button on a host that is off turns it on, so a host that
/// reports off is left alone. An unknown power state does not count as off.
pub async fn power_off(ctx: &ExecContext, args: &PowerOffArgs) -> Result<Outcome<PowerState>> {
    if let Outcome::Completed(PowerStatus { power: false }) =
        get_power_status(ctx, &args.connection).await?
    {
        debug!("Host is already powered off, not touching the power button");
        return Ok(Outcome::Completed(PowerState::OFF));
    }

    let ilo = ctx.login(&args.connection).await?;

    let pressed = if args.hold {
        info!("Holding power button on {}", ilo.hostname());
        ilo.hold_pwr_btn().await
    } else {
        info!("Pressing power button on {}", ilo.hostname());
        ilo.press_pwr_btn().await
    };

    match pressed {
        Ok(()) => Ok(Outcome::Completed(PowerState::OFF)),
        Err(e) => Ok(Outcome::failed(&*ilo, "power off", e)),
    }
}

pub async fn list_users(ctx: &ExecContext, args: &ListUsersArgs) -> Result<Outcome<UserList>> {
    let ilo = ctx.login(&args.connection).await?;

    let users = if args.detailed {
        ilo.get_all_user_info().await.map(UserList::Detailed)
    } else {
        ilo.get_all_users().await.map(UserList::Names)
    };

    match users {
        Ok(users) => Ok(Outcome::Completed(users)),
        Err(e) => Ok(Outcome::failed(&*ilo, "get all users from", e)),
    }
}

/// Product name, asset tag and firmware fields in one flat record.
/// On key collisions firmware fields win over asset tag fields.
pub async fn product_info(ctx: &ExecContext, args: &ConnectionArgs) -> Result<Outcome<ProductInfo>> {
    let ilo = ctx.login(args).await?;

    let queried = async {
        let product_name = ilo.get_product_name().await?;
        let fw_version = ilo.get_fw_version().await?;
        let asset_tag = ilo.get_asset_tag().await?;
        Ok::<_, IloError>((product_name, fw_version, asset_tag))
    }
    .await;

    match queried {
        Ok((product_name, fw_version, asset_tag)) => {
            let mut info = Record::new();
            info.insert("product_name".to_string(), Value::String(product_name));
            info.extend(asset_tag);
            info.extend(fw_version);
            Ok(Outcome::Completed(info))
        }
        Err(e) => Ok(Outcome::failed(&*ilo, "get product name and version from", e)),
    }
}

pub async fn network_settings(ctx: &ExecContext, args: &ConnectionArgs) -> Result<Outcome<NetworkSettings>> {
    let ilo = ctx.login(args).await?;

    match ilo.get_network_settings().await {
        Ok(settings) => Ok(Outcome::Completed(settings)),
        Err(e) => Ok(Outcome::failed(&*ilo, "get network settings from", e)),
    }
}

pub async fn get_boot_order(ctx: &ExecContext, args: &ConnectionArgs) -> Result<Outcome<BootOrder>> {
    let ilo = ctx.login(args).await?;

    match ilo.get_persistent_boot().await {
        Ok(order) => Ok(Outcome::Completed(order)),
        Err(e) => Ok(Outcome::failed(&*ilo, "get boot order from", e)),
    }
}
