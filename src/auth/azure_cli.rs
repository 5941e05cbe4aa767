//! Azure CLI credential provider for the directory APIs

use anyhow::{Context, Result};
use azure_core::credentials::TokenCredential;
use azure_identity::AzureCliCredential;
use std::sync::Arc;

/// Microsoft Graph, used for organization and user details
pub const GRAPH_RESOURCE: &str = "https://graph.microsoft.com";

/// Legacy AAD Graph, serves the registration report without extra report permissions
pub const AAD_GRAPH_RESOURCE: &str = "https://graph.windows.net";

/// Authenticator that reuses the signed-in Azure CLI session
pub struct AzureAuthenticator {
    credential: Arc<AzureCliCredential>,
}

impl AzureAuthenticator {
    pub fn new() -> Result<Self> {
        let credential = AzureCliCredential::new()
            .context("Failed to create Azure CLI credential")?;

        Ok(Self { credential })
    }

    /// Get an access token for a resource such as [`GRAPH_RESOURCE`]
    pub async fn get_token_for_resource(&self, resource: &str) -> Result<String> {
        let scope = default_scope(resource);

        let token = self
            .credential
            .get_token(&[&scope])
            .await
            .with_context(|| {
                format!(
                    "Failed to get token for {} from Azure CLI. Make sure you're logged in with 'az login'",
                    resource
                )
            })?;

        Ok(token.token.secret().to_string())
    }
}

fn default_scope(resource: &str) -> String {
    format!("{}/.default", resource.trim_end_matches('/'))
}
