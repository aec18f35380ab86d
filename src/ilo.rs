//! Remote-management client seam.
//!
//! [`IloClient`] is one handle bound to one credential set. Operations never
//! talk to the iLO any other way, which keeps the transport swappable and the
//! operations testable against a scripted client.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::credentials::Credentials;
use crate::error::{IloError, Result};

pub mod cli_client;
#[cfg(test)]
pub(crate) mod mock;

pub use cli_client::{CliClientFactory, HpiloCliClient};

/// Flat record returned by inventory queries.
pub type Record = Map<String, Value>;

pub type IloResult<T> = std::result::Result<T, IloError>;

/// One iLO endpoint, one credential set.
#[async_trait]
pub trait IloClient: Send + Sync {
    /// Hostname this handle talks to (for log messages)
    fn hostname(&self) -> &str;

    /// Host power state as reported by the iLO, "ON" or "OFF"
    async fn get_host_power_status(&self) -> IloResult<String>;

    async fn set_host_power(&self, on: bool) -> IloResult<()>;

    /// Momentary power button press (graceful shutdown on a running host)
    async fn press_pwr_btn(&self) -> IloResult<()>;

    /// Held power button (forced power off)
    async fn hold_pwr_btn(&self) -> IloResult<()>;

    async fn get_all_users(&self) -> IloResult<Vec<String>>;

    /// Per-user records keyed by login name
    async fn get_all_user_info(&self) -> IloResult<Record>;

    async fn get_product_name(&self) -> IloResult<String>;

    async fn get_fw_version(&self) -> IloResult<Record>;

    async fn get_asset_tag(&self) -> IloResult<Record>;

    async fn get_network_settings(&self) -> IloResult<Record>;

    /// Persistent boot devices, in boot sequence
    async fn get_persistent_boot(&self) -> IloResult<Vec<String>>;
}

/// Builds client handles. Construction never contacts the iLO; `delay` is
/// passed through for backends that batch requests.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn connect(&self, creds: Credentials, delay: bool) -> Result<Box<dyn IloClient>>;
}
