//! [`IloClient`] backed by the `hpilo_cli` tool.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::types::ToolSettings;
use crate::credentials::Credentials;
use crate::error::Result;
use crate::ilo::{ClientFactory, IloClient, IloResult, Record};
use crate::system::{executor, parser};

#[derive(Debug)]
pub struct HpiloCliClient {
    tool: ToolSettings,
    creds: Credentials,
}

impl HpiloCliClient {
    pub fn new(tool: ToolSettings, creds: Credentials) -> Self {
        Self { tool, creds }
    }

    async fn call(&self, method: &str, args: &[&str]) -> IloResult<Value> {
        let stdout = executor::run_hpilo_method(&self.tool, &self.creds, method, args).await?;
        parser::parse_output(&stdout)
    }
}

#[async_trait]
impl IloClient for HpiloCliClient {
    fn hostname(&self) -> &str {
        &self.creds.hostname
    }

    async fn get_host_power_status(&self) -> IloResult<String> {
        let method = "get_host_power_status";
        parser::expect_string(self.call(method, &[]).await?, method)
    }

    async fn set_host_power(&self, on: bool) -> IloResult<()> {
        let arg = if on { "host_power=True" } else { "host_power=False" };
        self.call("set_host_power", &[arg]).await?;
        Ok(())
    }

    async fn press_pwr_btn(&self) -> IloResult<()> {
        self.call("press_pwr_btn", &[]).await?;
        Ok(())
    }

    async fn hold_pwr_btn(&self) -> IloResult<()> {
        self.call("hold_pwr_btn", &[]).await?;
        Ok(())
    }

    async fn get_all_users(&self) -> IloResult<Vec<String>> {
        let method = "get_all_users";
        parser::expect_string_list(self.call(method, &[]).await?, method)
    }

    async fn get_all_user_info(&self) -> IloResult<Record> {
        let method = "get_all_user_info";
        parser::expect_object(self.call(method, &[]).await?, method)
    }

    async fn get_product_name(&self) -> IloResult<String> {
        let method = "get_product_name";
        parser::expect_string(self.call(method, &[]).await?, method)
    }

    async fn get_fw_version(&self) -> IloResult<Record> {
        let method = "get_fw_version";
        parser::expect_object(self.call(method, &[]).await?, method)
    }

    async fn get_asset_tag(&self) -> IloResult<Record> {
        let method = "get_asset_tag";
        parser::expect_object(self.call(method, &[]).await?, method)
    }

    async fn get_network_settings(&self) -> IloResult<Record> {
        let method = "get_network_settings";
        parser::expect_object(self.call(method, &[]).await?, method)
    }

    async fn get_persistent_boot(&self) -> IloResult<Vec<String>> {
        let method = "get_persistent_boot";
        parser::expect_string_list(self.call(method, &[]).await?, method)
    }
}

/// Produces [`HpiloCliClient`] handles.
///
/// Every call is its own `hpilo_cli` process, so building a handle never
/// touches the network and `delay` changes nothing here. An unreachable
/// iLO shows up as an [`IloError`](crate::error::IloError) on the first call.
#[derive(Debug, Clone, Default)]
pub struct CliClientFactory {
    tool: ToolSettings,
}

impl CliClientFactory {
    pub fn new(tool: ToolSettings) -> Self {
        Self { tool }
    }
}

#[async_trait]
impl ClientFactory for CliClientFactory {
    async fn connect(&self, creds: Credentials, delay: bool) -> Result<Box<dyn IloClient>> {
        debug!("New hpilo_cli handle for {} (delay={})", creds.hostname, delay);
        Ok(Box::new(HpiloCliClient::new(self.tool.clone(), creds)))
    }
}
