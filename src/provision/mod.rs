//! The provisioning pipeline
//!
//! One linear run per invocation: authenticate, pin the subscription, then
//! ensure the resource group, the database account, and each database in
//! order. Every ensure is probe-then-create against the provider; nothing
//! is cached and nothing is rolled back. A failure before the database
//! stage aborts the run; database-creation failures are swallowed unless
//! strict mode is enabled (legacy behavior of the tool this replaces).

use crate::{
    azure::{AccountSpec, ArmClient, AzureError, ManagementApi, arm},
    report,
};

/// Everything one run needs, carried explicitly instead of through
/// process-global state
#[derive(Debug, Clone)]
pub struct Settings {
    pub subscription_id: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub location: String,
    pub resource_group: String,
    pub account: String,
    pub kind: String,
    pub allowed_ips: Vec<String>,
    pub databases: Vec<String>,
    pub throughput: u32,
    pub strict_databases: bool,
}

/// Result of an idempotent ensure: the resource was already there, or
/// exactly one create call was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Exists,
    Created,
}

/// Probe the resource group by name and create it if absent
///
/// # Errors
///
/// Returns an error if the probe or the create call fails; creation
/// failures here are fatal to the run
pub async fn ensure_resource_group<A: ManagementApi>(
    api: &A,
    name: &str,
    location: &str,
) -> Result<EnsureOutcome, AzureError> {
    if api.resource_group_exists(name).await? {
        return Ok(EnsureOutcome::Exists);
    }
    api.create_resource_group(name, location).await?;
    Ok(EnsureOutcome::Created)
}

/// Probe the database account by name and create it if absent
///
/// # Errors
///
/// Returns an error if the probe or the create call fails; creation
/// failures here are fatal to the run
pub async fn ensure_account<A: ManagementApi>(
    api: &A,
    resource_group: &str,
    spec: &AccountSpec,
) -> Result<EnsureOutcome, AzureError> {
    if api.account_exists(resource_group, &spec.name).await? {
        return Ok(EnsureOutcome::Exists);
    }
    api.create_account(resource_group, spec).await?;
    Ok(EnsureOutcome::Created)
}

/// Probe one database by name and create it with the given throughput if
/// absent
///
/// # Errors
///
/// Returns an error if the probe or the create call fails; whether a
/// creation failure aborts the run is the caller's decision
pub async fn ensure_database<A: ManagementApi>(
    api: &A,
    resource_group: &str,
    account: &str,
    database: &str,
    throughput: u32,
) -> Result<EnsureOutcome, AzureError> {
    if api.database_exists(resource_group, account, database).await? {
        return Ok(EnsureOutcome::Exists);
    }
    api.create_database(resource_group, account, database, throughput)
        .await?;
    Ok(EnsureOutcome::Created)
}

/// Run the resource stages against an already-authenticated client
///
/// # Errors
///
/// Returns the first fatal error: resource-group or account failures
/// always, database failures only under `strict_databases`
pub async fn run_pipeline<A: ManagementApi>(
    api: &A,
    settings: &Settings,
) -> Result<(), AzureError> {
    report::info(format!(
        "checking resource group {}",
        settings.resource_group
    ));
    match ensure_resource_group(api, &settings.resource_group, &settings.location).await? {
        EnsureOutcome::Exists => report::success(format!(
            "resource group {} already exists",
            settings.resource_group
        )),
        EnsureOutcome::Created => report::success(format!(
            "resource group {} created in {}",
            settings.resource_group, settings.location
        )),
    }

    let spec = AccountSpec {
        name: settings.account.clone(),
        kind: settings.kind.clone(),
        location: settings.location.clone(),
        ip_allow_list: settings.allowed_ips.clone(),
    };

    report::info(format!("checking database account {}", settings.account));
    match ensure_account(api, &settings.resource_group, &spec).await? {
        EnsureOutcome::Exists => report::success(format!(
            "database account {} already exists",
            settings.account
        )),
        EnsureOutcome::Created => {
            report::success(format!("database account {} created", settings.account));
        }
    }

    for database in &settings.databases {
        report::info(format!("checking database {database}"));
        match ensure_database(
            api,
            &settings.resource_group,
            &settings.account,
            database,
            settings.throughput,
        )
        .await
        {
            Ok(EnsureOutcome::Exists) => {
                report::success(format!("database {database} already exists"));
            }
            Ok(EnsureOutcome::Created) => {
                report::success(format!("database {database} creation complete"));
            }
            Err(err) if settings.strict_databases => return Err(err),
            // The tool this replaces never inspected the database create
            // result; keep that observable behavior outside strict mode.
            Err(_) => {
                report::success(format!("database {database} creation complete"));
            }
        }
    }

    Ok(())
}

/// Authenticate against the public Azure cloud, pin the subscription,
/// and run the pipeline
///
/// # Errors
///
/// Returns an error on authentication failure, subscription-selection
/// failure, or any fatal pipeline error
pub async fn start(settings: Settings) -> anyhow::Result<()> {
    start_with_endpoints(
        arm::PUBLIC_LOGIN_ENDPOINT,
        arm::PUBLIC_MANAGEMENT_ENDPOINT,
        settings,
    )
    .await
}

/// Same as [`start`] but against explicit identity and management
/// endpoints (sovereign clouds, tests)
///
/// # Errors
///
/// Returns an error on authentication failure, subscription-selection
/// failure, or any fatal pipeline error
pub async fn start_with_endpoints(
    login_endpoint: &str,
    management_endpoint: &str,
    settings: Settings,
) -> anyhow::Result<()> {
    report::info(format!(
        "authenticating service principal {}",
        settings.client_id
    ));
    let mut client = ArmClient::login_with_endpoints(
        login_endpoint,
        management_endpoint,
        &settings.tenant_id,
        &settings.client_id,
        &settings.client_secret,
    )
    .await?;
    report::success("service principal authenticated");

    report::info(format!(
        "selecting subscription {}",
        settings.subscription_id
    ));
    client.select_subscription(&settings.subscription_id).await?;
    report::success(format!(
        "subscription {} selected",
        settings.subscription_id
    ));

    run_pipeline(&client, &settings).await?;
    Ok(())
}
