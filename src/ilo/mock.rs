//! Scripted in-memory iLO for tests. Records every handle and remote call.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::credentials::Credentials;
use crate::error::{IloError, Result};
use crate::ilo::{ClientFactory, IloClient, IloResult, Record};

pub struct MockState {
    pub power: String,
    pub users: Vec<String>,
    pub user_info: Record,
    pub product_name: String,
    pub fw_version: Record,
    pub asset_tag: Record,
    pub network: Record,
    pub boot: Vec<String>,
    /// Methods that fail with an iLO error
    pub failing: HashSet<&'static str>,
    pub calls: Vec<&'static str>,
    pub connects: Vec<(Credentials, bool)>,
}

fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Record::new(),
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            power: "ON".to_string(),
            users: vec!["Administrator".to_string(), "operator".to_string()],
            user_info: record(json!({
                "Administrator": { "user_name": "Administrator", "admin_priv": true },
                "operator": { "user_name": "operator", "admin_priv": false },
            })),
            product_name: "ProLiant DL360 Gen9".to_string(),
            fw_version: record(json!({
                "firmware_date": "Feb 05 2018",
                "firmware_version": "2.55",
                "license_type": "iLO Advanced",
                "management_processor": "iLO4",
            })),
            asset_tag: record(json!({ "asset_tag": "RACK-A1-07" })),
            network: record(json!({
                "dhcp_enable": false,
                "dns_name": "server1-ilo",
                "ip_address": "10.0.0.21",
                "subnet_mask": "255.255.255.0",
            })),
            boot: vec!["cdrom".to_string(), "usb".to_string(), "hdd".to_string(), "network".to_string()],
            failing: HashSet::new(),
            calls: Vec::new(),
            connects: Vec::new(),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockFactory {
    pub state: Arc<Mutex<MockState>>,
}

impl MockFactory {
    pub fn with_power(power: &str) -> Self {
        let factory = Self::default();
        factory.state.lock().unwrap().power = power.to_string();
        factory
    }

    pub fn fail(&self, method: &'static str) {
        self.state.lock().unwrap().failing.insert(method);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn connects(&self) -> Vec<(Credentials, bool)> {
        self.state.lock().unwrap().connects.clone()
    }
}

#[async_trait]
impl ClientFactory for MockFactory {
    async fn connect(&self, creds: Credentials, delay: bool) -> Result<Box<dyn IloClient>> {
        let hostname = creds.hostname.clone();
        self.state.lock().unwrap().connects.push((creds, delay));
        Ok(Box::new(MockClient {
            hostname,
            state: Arc::clone(&self.state),
        }))
    }
}

pub struct MockClient {
    hostname: String,
    state: Arc<Mutex<MockState>>,
}

impl MockClient {
    fn record<T>(&self, method: &'static str, read: impl FnOnce(&mut MockState) -> T) -> IloResult<T> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(method);
        if state.failing.contains(method) {
            return Err(IloError::CommandFailed(format!("Login failed. ({})", method)));
        }
        Ok(read(&mut *state))
    }
}

#[async_trait]
impl IloClient for MockClient {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    async fn get_host_power_status(&self) -> IloResult<String> {
        self.record("get_host_power_status", |s| s.power.clone())
    }

    async fn set_host_power(&self, on: bool) -> IloResult<()> {
        self.record("set_host_power", |s| s.power = if on { "ON" } else { "OFF" }.to_string())
    }

    async fn press_pwr_btn(&self) -> IloResult<()> {
        self.record("press_pwr_btn", |s| {
            s.power = if s.power == "ON" { "OFF" } else { "ON" }.to_string()
        })
    }

    async fn hold_pwr_btn(&self) -> IloResult<()> {
        self.record("hold_pwr_btn", |s| s.power = "OFF".to_string())
    }

    async fn get_all_users(&self) -> IloResult<Vec<String>> {
        self.record("get_all_users", |s| s.users.clone())
    }

    async fn get_all_user_info(&self) -> IloResult<Record> {
        self.record("get_all_user_info", |s| s.user_info.clone())
    }

    async fn get_product_name(&self) -> IloResult<String> {
        self.record("get_product_name", |s| s.product_name.clone())
    }

    async fn get_fw_version(&self) -> IloResult<Record> {
        self.record("get_fw_version", |s| s.fw_version.clone())
    }

    async fn get_asset_tag(&self) -> IloResult<Record> {
        self.record("get_asset_tag", |s| s.asset_tag.clone())
    }

    async fn get_network_settings(&self) -> IloResult<Record> {
        self.record("get_network_settings", |s| s.network.clone())
    }

    async fn get_persistent_boot(&self) -> IloResult<Vec<String>> {
        self.record("get_persistent_boot", |s| s.boot.clone())
    }
}
