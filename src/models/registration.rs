//! Authentication method registration report models

use serde::{Deserialize, Deserializer};

/// One enabled account from `activities/authenticationMethodUserDetails`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthMethodRecord {
    #[serde(rename = "id")]
    pub user_id: Option<String>,

    pub user_display_name: Option<String>,

    pub user_principal_name: Option<String>,

    pub is_mfa_registered: Option<bool>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub methods_registered: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
