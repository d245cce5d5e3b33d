//! Request and response bodies for the ARM REST endpoints
//!
//! Only the fields this tool reads or writes are modeled; ARM responses
//! carry much more, and serde ignores the rest.

use serde::{Deserialize, Serialize};

/// Inputs for a database-account create call
///
/// Consistency level and multi-region writes are fixed policy: every
/// account is created with `Session` consistency (session-consistent
/// prefix ordering) and multiple write locations enabled, in a single
/// region with failover priority 0.
#[derive(Debug, Clone)]
pub struct AccountSpec {
    pub name: String,
    /// Sent verbatim as the ARM account `kind`. The original tool passed
    /// its SKU name through the same flag as the API kind, so the last
    /// value won; that pass-through is preserved here.
    pub kind: String,
    pub location: String,
    pub ip_allow_list: Vec<String>,
}

pub const CONSISTENCY_LEVEL: &str = "Session";
pub const OFFER_TYPE: &str = "Standard";

#[derive(Debug, Serialize)]
pub struct ResourceGroupCreateRequest {
    pub location: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreateRequest {
    pub kind: String,
    pub location: String,
    pub properties: AccountProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProperties {
    pub database_account_offer_type: &'static str,
    pub consistency_policy: ConsistencyPolicy,
    pub enable_multiple_write_locations: bool,
    pub ip_rules: Vec<IpRule>,
    pub locations: Vec<AccountLocation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyPolicy {
    pub default_consistency_level: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpRule {
    pub ip_address_or_range: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLocation {
    pub location_name: String,
    pub failover_priority: u8,
}

impl From<&AccountSpec> for AccountCreateRequest {
    fn from(spec: &AccountSpec) -> Self {
        Self {
            kind: spec.kind.clone(),
            location: spec.location.clone(),
            properties: AccountProperties {
                database_account_offer_type: OFFER_TYPE,
                consistency_policy: ConsistencyPolicy {
                    default_consistency_level: CONSISTENCY_LEVEL,
                },
                enable_multiple_write_locations: true,
                ip_rules: spec
                    .ip_allow_list
                    .iter()
                    .map(|ip| IpRule {
                        ip_address_or_range: ip.clone(),
                    })
                    .collect(),
                locations: vec![AccountLocation {
                    location_name: spec.location.clone(),
                    failover_priority: 0,
                }],
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MongoDatabaseCreateRequest {
    pub properties: MongoDatabaseProperties,
}

#[derive(Debug, Serialize)]
pub struct MongoDatabaseProperties {
    pub resource: MongoDatabaseResource,
    pub options: ThroughputOptions,
}

#[derive(Debug, Serialize)]
pub struct MongoDatabaseResource {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ThroughputOptions {
    pub throughput: u32,
}

impl MongoDatabaseCreateRequest {
    #[must_use]
    pub fn new(database: &str, throughput: u32) -> Self {
        Self {
            properties: MongoDatabaseProperties {
                resource: MongoDatabaseResource {
                    id: database.to_string(),
                },
                options: ThroughputOptions { throughput },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountGetResponse {
    #[serde(default)]
    pub properties: AccountStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatus {
    pub provisioning_state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
