//! User account detail API endpoints

use super::GraphClient;
use crate::error::ApiError;
use crate::models::UserDetailRecord;
use futures::stream::{self, StreamExt};

/// Properties needed for the report, `signInActivity` is beta only
const USER_SELECT: &str = "id,displayName,userPrincipalName,signInActivity,onPremisesSyncEnabled,userType,externalUserState,externalUserStateChangeDateTime";

pub const DEFAULT_CONCURRENCY: usize = 10;

impl GraphClient {
    /// Get account details for a single user
    pub async fn get_user_detail(
        &self,
        user_id: &str,
        api_version: &str,
    ) -> Result<UserDetailRecord, ApiError> {
        let endpoint = format!(
            "{}/users/{}?$select={}",
            api_version,
            urlencoding::encode(user_id),
            USER_SELECT
        );
        let mut user: UserDetailRecord = self.get_json(&endpoint).await?;

        // Accounts synced from on-premises AD can come back without an id
        if user.id.is_none() {
            user.id = Some(user_id.to_string());
        }

        Ok(user)
    }

    /// Get account details for many users, at most `concurrency` requests in flight.
    ///
    /// Results keep the order of `user_ids`. A user that fails to load is logged
    /// and left out, so the report still gets a (defaulted) row for them.
    pub async fn get_user_details(
        &self,
        user_ids: &[String],
        api_version: &str,
        concurrency: usize,
    ) -> Vec<UserDetailRecord> {
        let results: Vec<_> = stream::iter(user_ids)
            .map(|id| async move { (id, self.get_user_detail(id, api_version).await) })
            .buffered(concurrency.max(1))
            .collect()
            .await;

        results
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Failed to retrieve details for user {}: {}", id, e);
                    None
                }
            })
            .collect()
    }
}
