use crate::{cli::actions::Action, provision::Settings};
use anyhow::{Context, Result};
use clap::ArgMatches;

/// Split a comma-separated flag value, dropping empty segments
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("{name} is required"))
}

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if a required parameter is missing or the database
/// list is empty
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    let allowed_ips = split_list(&required(matches, "allowed-ips")?);

    let databases = split_list(&required(matches, "databases")?);
    anyhow::ensure!(!databases.is_empty(), "at least one database is required");

    // clap owns the default; a missing value here is a wiring bug
    let throughput = matches
        .get_one::<u32>("throughput")
        .copied()
        .context("throughput is required")?;

    let settings = Settings {
        subscription_id: required(matches, "subscription-id")?,
        tenant_id: required(matches, "tenant-id")?,
        client_id: required(matches, "client-id")?,
        client_secret: required(matches, "client-secret")?,
        location: required(matches, "location")?,
        resource_group: required(matches, "resource-group")?,
        account: required(matches, "account")?,
        kind: required(matches, "kind")?,
        allowed_ips,
        databases,
        throughput,
        strict_databases: matches.get_flag("strict-databases"),
    };

    Ok(Action::Provision { settings })
}
