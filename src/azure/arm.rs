//! Authenticated REST client for Azure Resource Manager
//!
//! One client per run: [`ArmClient::login`] performs the OAuth2
//! client-credentials grant for the service principal, then
//! [`ArmClient::select_subscription`] validates and pins the subscription
//! used by every later call. There is no ambient global state; the token
//! and subscription travel inside the client.

use super::{
    AzureError, ManagementApi,
    models::{
        AccountCreateRequest, AccountGetResponse, AccountSpec, ErrorResponse,
        MongoDatabaseCreateRequest, ResourceGroupCreateRequest, TokenResponse,
    },
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tokio::time::sleep;

pub const PUBLIC_LOGIN_ENDPOINT: &str = "https://login.microsoftonline.com";
pub const PUBLIC_MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";

const SUBSCRIPTION_API_VERSION: &str = "2022-12-01";
const RESOURCE_GROUP_API_VERSION: &str = "2021-04-01";
const COSMOS_API_VERSION: &str = "2024-11-15";

// Account creation is a long-running operation; ARM acknowledges the PUT
// and provisions in the background, so the client polls until the account
// reaches a terminal state. No timeout: the run blocks until the provider
// answers, matching the rest of the pipeline.
const ACCOUNT_POLL_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub struct ArmClient {
    http: Client,
    management_endpoint: String,
    token: String,
    subscription: Option<String>,
}

/// Extract a printable reason from a failed response, preferring the ARM
/// error body when one is present
async fn error_detail(response: Response) -> String {
    let status = response.status();
    (response.json::<ErrorResponse>().await).map_or_else(
        |_| status.to_string(),
        |body| format!("{status}: {} ({})", body.error.message, body.error.code),
    )
}

/// Map an existence probe response: success means present, 404 means absent
async fn probe(response: Response, resource: &str) -> Result<bool, AzureError> {
    match response.status() {
        status if status.is_success() => Ok(true),
        StatusCode::NOT_FOUND => Ok(false),
        _ => Err(AzureError::provisioning(
            resource,
            error_detail(response).await,
        )),
    }
}

async fn ensure_accepted(response: Response, resource: &str) -> Result<(), AzureError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(AzureError::provisioning(
            resource,
            error_detail(response).await,
        ))
    }
}

impl ArmClient {
    /// Authenticate the service principal against the public Azure cloud
    ///
    /// # Errors
    ///
    /// Returns [`AzureError::Authentication`] if the identity endpoint
    /// rejects the credentials, or [`AzureError::Transport`] if it is
    /// unreachable
    pub async fn login(
        tenant_id: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Self, AzureError> {
        Self::login_with_endpoints(
            PUBLIC_LOGIN_ENDPOINT,
            PUBLIC_MANAGEMENT_ENDPOINT,
            tenant_id,
            client_id,
            client_secret,
        )
        .await
    }

    /// Same as [`ArmClient::login`] but against explicit identity and
    /// management endpoints (sovereign clouds, tests)
    ///
    /// # Errors
    ///
    /// Returns [`AzureError::Authentication`] if the identity endpoint
    /// rejects the credentials, or [`AzureError::Transport`] if it is
    /// unreachable
    pub async fn login_with_endpoints(
        login_endpoint: &str,
        management_endpoint: &str,
        tenant_id: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Self, AzureError> {
        let management_endpoint = management_endpoint.trim_end_matches('/').to_string();
        let login_endpoint = login_endpoint.trim_end_matches('/');
        let http = Client::new();

        let scope = format!("{management_endpoint}/.default");
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("scope", scope.as_str()),
        ];

        let response = http
            .post(format!("{login_endpoint}/{tenant_id}/oauth2/v2.0/token"))
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AzureError::Authentication(error_detail(response).await));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| AzureError::Authentication(format!("malformed token response: {err}")))?;

        Ok(Self {
            http,
            management_endpoint,
            token: token.access_token,
            subscription: None,
        })
    }

    /// Validate the subscription and pin it as the context for all
    /// subsequent resource operations
    ///
    /// # Errors
    ///
    /// Returns [`AzureError::Context`] if the subscription does not exist
    /// or is not visible to the authenticated principal
    pub async fn select_subscription(&mut self, subscription_id: &str) -> Result<(), AzureError> {
        let url = format!(
            "{}/subscriptions/{subscription_id}?api-version={SUBSCRIPTION_API_VERSION}",
            self.management_endpoint
        );
        let response = self.request(Method::GET, &url).send().await?;

        if !response.status().is_success() {
            return Err(AzureError::Context(format!(
                "subscription {subscription_id}: {}",
                error_detail(response).await
            )));
        }

        self.subscription = Some(subscription_id.to_string());
        Ok(())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http.request(method, url).bearer_auth(&self.token)
    }

    fn subscription(&self) -> Result<&str, AzureError> {
        self.subscription
            .as_deref()
            .ok_or_else(|| AzureError::Context("no subscription selected".into()))
    }

    fn resource_group_url(&self, name: &str) -> Result<String, AzureError> {
        Ok(format!(
            "{}/subscriptions/{}/resourcegroups/{name}?api-version={RESOURCE_GROUP_API_VERSION}",
            self.management_endpoint,
            self.subscription()?
        ))
    }

    fn account_url(&self, resource_group: &str, name: &str) -> Result<String, AzureError> {
        Ok(format!(
            "{}/subscriptions/{}/resourceGroups/{resource_group}/providers/Microsoft.DocumentDB/databaseAccounts/{name}?api-version={COSMOS_API_VERSION}",
            self.management_endpoint,
            self.subscription()?
        ))
    }

    fn database_url(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
    ) -> Result<String, AzureError> {
        Ok(format!(
            "{}/subscriptions/{}/resourceGroups/{resource_group}/providers/Microsoft.DocumentDB/databaseAccounts/{account}/mongodbDatabases/{database}?api-version={COSMOS_API_VERSION}",
            self.management_endpoint,
            self.subscription()?
        ))
    }

    async fn account_state(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<Option<String>, AzureError> {
        let url = self.account_url(resource_group, name)?;
        let response = self.request(Method::GET, &url).send().await?;

        if !response.status().is_success() {
            return Err(AzureError::provisioning(
                format!("database account {name}"),
                error_detail(response).await,
            ));
        }

        let body: AccountGetResponse = response.json().await.map_err(|err| {
            AzureError::provisioning(
                format!("database account {name}"),
                format!("malformed account response: {err}"),
            )
        })?;

        Ok(body.properties.provisioning_state)
    }
}

impl ManagementApi for ArmClient {
    async fn resource_group_exists(&self, name: &str) -> Result<bool, AzureError> {
        let url = self.resource_group_url(name)?;
        let response = self.request(Method::HEAD, &url).send().await?;
        probe(response, &format!("resource group {name}")).await
    }

    async fn create_resource_group(&self, name: &str, location: &str) -> Result<(), AzureError> {
        let url = self.resource_group_url(name)?;
        let body = ResourceGroupCreateRequest {
            location: location.to_string(),
        };
        let response = self.request(Method::PUT, &url).json(&body).send().await?;
        ensure_accepted(response, &format!("resource group {name}")).await
    }

    async fn account_exists(&self, resource_group: &str, name: &str) -> Result<bool, AzureError> {
        let url = self.account_url(resource_group, name)?;
        let response = self.request(Method::GET, &url).send().await?;
        probe(response, &format!("database account {name}")).await
    }

    async fn create_account(
        &self,
        resource_group: &str,
        spec: &AccountSpec,
    ) -> Result<(), AzureError> {
        let url = self.account_url(resource_group, &spec.name)?;
        let body = AccountCreateRequest::from(spec);
        let response = self.request(Method::PUT, &url).json(&body).send().await?;
        ensure_accepted(response, &format!("database account {}", spec.name)).await?;

        // Block until the account is usable; databases are created against
        // it immediately afterwards.
        loop {
            match self.account_state(resource_group, &spec.name).await? {
                Some(state) if state == "Succeeded" => return Ok(()),
                Some(state) if state == "Failed" || state == "Canceled" => {
                    return Err(AzureError::provisioning(
                        format!("database account {}", spec.name),
                        format!("provisioning ended in state {state}"),
                    ));
                }
                _ => sleep(ACCOUNT_POLL_INTERVAL).await,
            }
        }
    }

    async fn database_exists(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
    ) -> Result<bool, AzureError> {
        let url = self.database_url(resource_group, account, database)?;
        let response = self.request(Method::GET, &url).send().await?;
        probe(response, &format!("database {database}")).await
    }

    async fn create_database(
        &self,
        resource_group: &str,
        account: &str,
        database: &str,
        throughput: u32,
    ) -> Result<(), AzureError> {
        let url = self.database_url(resource_group, account, database)?;
        let body = MongoDatabaseCreateRequest::new(database, throughput);
        let response = self.request(Method::PUT, &url).json(&body).send().await?;
        ensure_accepted(response, &format!("database {database}")).await
    }
}
