//! Tenant organization API

use super::GraphClient;
use crate::error::ApiError;
use crate::models::{ODataResponse, Organization};

impl GraphClient {
    /// Get the organization of the signed-in tenant
    pub async fn get_organization(&self) -> Result<Organization, ApiError> {
        let response: ODataResponse<Organization> = self
            .get_json("v1.0/organization?$select=id,displayName,verifiedDomains")
            .await?;

        response
            .value
            .into_iter()
            .next()
            .ok_or(ApiError::EmptyOrganization)
    }
}
