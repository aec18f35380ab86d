//! Name-based invocation for the calling framework.
//!
//! Requests arrive either typed (from the CLI) or as a keyword bag
//! (`{"profile": "server1-ilo", "hold": true}`), and results leave as plain
//! JSON with remote failures already collapsed to their empty shapes.

use std::str::FromStr;

use serde_json::{json, Value};

use crate::credentials::ConnectionArgs;
use crate::error::{ModuleError, Result};

use super::{ExecContext, ListUsersArgs, Outcome, PowerOffArgs, PowerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetPowerStatus,
    PowerOn,
    PowerOff,
    ListUsers,
    ProductInfo,
    NetworkSettings,
    GetBootOrder,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::GetPowerStatus,
        Operation::PowerOn,
        Operation::PowerOff,
        Operation::ListUsers,
        Operation::ProductInfo,
        Operation::NetworkSettings,
        Operation::GetBootOrder,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetPowerStatus => "get_power_status",
            Operation::PowerOn => "power_on",
            Operation::PowerOff => "power_off",
            Operation::ListUsers => "list_users",
            Operation::ProductInfo => "product_info",
            Operation::NetworkSettings => "network_settings",
            Operation::GetBootOrder => "get_boot_order",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Operation {
    type Err = ModuleError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| ModuleError::InvalidRequest(format!("unknown operation '{}'", s)))
    }
}

/// One operation with its validated arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    GetPowerStatus(ConnectionArgs),
    PowerOn(ConnectionArgs),
    PowerOff(PowerOffArgs),
    ListUsers(ListUsersArgs),
    ProductInfo(ConnectionArgs),
    NetworkSettings(ConnectionArgs),
    GetBootOrder(ConnectionArgs),
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::GetPowerStatus(_) => Operation::GetPowerStatus,
            Request::PowerOn(_) => Operation::PowerOn,
            Request::PowerOff(_) => Operation::PowerOff,
            Request::ListUsers(_) => Operation::ListUsers,
            Request::ProductInfo(_) => Operation::ProductInfo,
            Request::NetworkSettings(_) => Operation::NetworkSettings,
            Request::GetBootOrder(_) => Operation::GetBootOrder,
        }
    }

    /// Build a request from an operation name and a keyword bag.
    pub fn from_kwargs(name: &str, kwargs: Value) -> Result<Self> {
        let operation: Operation = name.parse()?;
        let kwargs = if kwargs.is_null() { json!({}) } else { kwargs };
        let invalid = |e: serde_json::Error| {
            ModuleError::InvalidRequest(format!("invalid arguments for {}: {}", operation, e))
        };

        Ok(match operation {
            Operation::GetPowerStatus => Request::GetPowerStatus(serde_json::from_value(kwargs).map_err(invalid)?),
            Operation::PowerOn => Request::PowerOn(serde_json::from_value(kwargs).map_err(invalid)?),
            Operation::PowerOff => Request::PowerOff(serde_json::from_value(kwargs).map_err(invalid)?),
            Operation::ListUsers => Request::ListUsers(serde_json::from_value(kwargs).map_err(invalid)?),
            Operation::ProductInfo => Request::ProductInfo(serde_json::from_value(kwargs).map_err(invalid)?),
            Operation::NetworkSettings => Request::NetworkSettings(serde_json::from_value(kwargs).map_err(invalid)?),
            Operation::GetBootOrder => Request::GetBootOrder(serde_json::from_value(kwargs).map_err(invalid)?),
        })
    }
}

/// `power_off` is the one operation that reports a null state on failure.
pub fn render_power_off(outcome: Outcome<PowerState>) -> Value {
    outcome.render(json!({ "power_state": null }))
}

/// Run a request and render its result for the framework.
pub async fn invoke(ctx: &ExecContext, request: &Request) -> Result<Value> {
    let empty = || json!({});

    let rendered = match request {
        Request::GetPowerStatus(args) => super::get_power_status(ctx, args).await?.render(empty()),
        Request::PowerOn(args) => super::power_on(ctx, args).await?.render(empty()),
        Request::PowerOff(args) => render_power_off(super::power_off(ctx, args).await?),
        Request::ListUsers(args) => super::list_users(ctx, args).await?.render(empty()),
        Request::ProductInfo(args) => super::product_info(ctx, args).await?.render(empty()),
        Request::NetworkSettings(args) => super::network_settings(ctx, args).await?.render(empty()),
        Request::GetBootOrder(args) => super::get_boot_order(ctx, args).await?.render(empty()),
    };

    Ok(rendered)
}
