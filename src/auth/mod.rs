//! Auth module for Azure CLI authentication
//!
//! Provides token acquisition using Azure CLI credentials for Microsoft Graph
//! and AAD Graph access.

mod azure_cli;

pub use azure_cli::{AAD_GRAPH_RESOURCE, AzureAuthenticator, GRAPH_RESOURCE};
