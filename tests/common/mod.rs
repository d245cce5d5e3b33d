#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use cosmosup::azure::{AccountSpec, AzureError, ManagementApi};
use cosmosup::provision::Settings;
use std::{collections::HashSet, sync::Mutex};

/// Recording management-plane fake
///
/// Resources live in an in-memory set keyed `rg:`, `acct:`, `db:`; every
/// create call is appended to `calls` so tests can assert exact sequences.
#[derive(Default)]
pub struct MockApi {
    pub existing: Mutex<HashSet<String>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_database_create: bool,
}

impl MockApi {
    pub fn with_existing(names: &[&str]) -> Self {
        Self {
            existing: Mutex::new(names.iter().map(ToString::to_string).collect()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> usize {
        self.calls().len()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn exists(&self, key: &str) -> bool {
        self.existing.lock().unwrap().contains(key)
    }

    fn insert(&self, key: String) {
        self.existing.lock().unwrap().insert(key);
    }
}

impl ManagementApi for MockApi {
    async fn resource_group_exists(&self, name: &str) -> Result<bool, AzureError> {
        Ok(self.exists(&format!("rg:{name}")))
    }

    async fn create_resource_group(&self, name: &str, location: &str) -> Result<(), AzureError> {
        self.record(format!("create-rg:{name}:{location}"));
        self.insert(format!("rg:{name}"));
        Ok(())
    }

    async fn account_exists(&self, _resource_group: &str, name: &str) -> Result<bool, AzureError> {
        Ok(self.exists(&format!("acct:{name}")))
    }

    async fn create_account(
        &self,
        resource_group: &str,
        spec: &AccountSpec,
    ) -> Result<(), AzureError> {
        self.record(format!(
            "create-acct:{resource_group}:{}:{}:{}:{}",
            spec.name,
            spec.kind,
            spec.location,
            spec.ip_allow_list.join("|")
        ));
        self.insert(format!("acct:{}", spec.name));
        Ok(())
    }

    async fn database_exists(
        &self,
        _resource_group: &str,
        _account: &str,
        database: &str,
    ) -> Result<bool, AzureError> {
        Ok(self.exists(&format!("db:{database}")))
    }

    async fn create_database(
        &self,
        _resource_group: &str,
        _account: &str,
        database: &str,
        throughput: u32,
    ) -> Result<(), AzureError> {
        self.record(format!("create-db:{database}:{throughput}"));
        if self.fail_database_create {
            return Err(AzureError::provisioning(
                format!("database {database}"),
                "503 ServiceUnavailable",
            ));
        }
        self.insert(format!("db:{database}"));
        Ok(())
    }
}

pub fn test_settings() -> Settings {
    Settings {
        subscription_id: "sub1".into(),
        tenant_id: "tenant1".into(),
        client_id: "client1".into(),
        client_secret: "secret".into(),
        location: "eastus".into(),
        resource_group: "rgX".into(),
        account: "acctX".into(),
        kind: "MongoDB".into(),
        allowed_ips: vec!["1.2.3.4".into()],
        databases: vec!["mydb1".into(), "mydb2".into()],
        throughput: 3000,
        strict_databases: false,
    }
}
