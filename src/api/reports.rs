//! Authentication method registration report API (AAD Graph)

use super::GraphClient;
use crate::error::ApiError;
use crate::models::AuthMethodRecord;

impl GraphClient {
    /// Get MFA registration details for every enabled account
    ///
    /// # Arguments
    ///
    /// * `api_version` - AAD Graph `api-version`, the report is only served by `beta`
    pub async fn get_auth_method_registrations(
        &self,
        api_version: &str,
    ) -> Result<Vec<AuthMethodRecord>, ApiError> {
        let endpoint = format!(
            "myorganization/activities/authenticationMethodUserDetails?api-version={}",
            urlencoding::encode(api_version)
        );
        self.get_paged(&endpoint).await
    }
}
