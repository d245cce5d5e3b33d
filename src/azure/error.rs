use thiserror::Error;

/// Error taxonomy for the management plane
///
/// `Authentication` and `Context` abort the run before any resource
/// operation; `Provisioning` aborts resource-group and account creation.
/// Database creation maps `Provisioning` errors to a logged warning unless
/// strict mode is enabled (see `provision`).
#[derive(Debug, Error)]
pub enum AzureError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("subscription context: {0}")]
    Context(String),

    #[error("provisioning {resource}: {message}")]
    Provisioning { resource: String, message: String },

    #[error("management endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

impl AzureError {
    #[must_use]
    pub fn provisioning(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provisioning {
            resource: resource.into(),
            message: message.into(),
        }
    }
}
