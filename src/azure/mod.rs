//! Azure management-plane access
//!
//! # Module Organization
//!
//! - `arm` - Authenticated REST client for Azure Resource Manager
//! - `error` - Error taxonomy for management operations
//! - `models` - Request/response bodies for the ARM endpoints
//!
//! The provider is the sole source of truth: nothing is cached locally,
//! and every existence question is answered by a fresh probe.

pub mod arm;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use arm::ArmClient;
pub use error::AzureError;
pub use models::AccountSpec;

/// Management operations the provisioning pipeline consumes
///
/// [`ArmClient`] implements this against the live ARM API; tests substitute
/// a recording fake. Existence probes and creates are separate calls on
/// purpose: the pipeline's idempotence contract is probe-then-create,
/// never upsert.
#[allow(async_fn_in_trait)]
pub trait ManagementApi {
    /// # Errors
    ///
    /// Returns an error if the probe cannot reach the provider or is rejected
    async fn resource_group_exists(&self, name: &str) -> Result<bool, AzureError>;

    /// # Errors
    ///
    /// Returns an error if the provider rejects the create call
    async fn create_resource_group(&self, name: &str, location: &str) -> Result<(), AzureError>;

    /// # Errors
    ///
    /// Returns an error if the probe cannot reach the provider or is rejected
    async fn account_exists(&self, resource_group: &str, name: &str) -> Result<bool, AzureError>;

    /// # Errors
    ///
    /// Returns an error if the provider rejects the create call or the
    /// account ends in a failed provisioning state
    async fn create_account(
        &self,
        resource_group: &str,
        spec: &AccountSpec,
    ) -> Result<(), AzureError>;

    /// # Errors
    ///
    /// Returns an error if the probe cannot reach the provider or is rejected
    async fn database_exists(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
    ) -> Result<bool, AzureError>;

    /// # Errors
    ///
    /// Returns an error if the provider rejects the create call
    async fn create_database(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
        throughput: u32,
    ) -> Result<(), AzureError>;
}
