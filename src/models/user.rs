//! Directory user account models

use serde::Deserialize;

/// Per-user account details from `beta/users/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailRecord {
    pub id: Option<String>,

    pub display_name: Option<String>,

    pub user_principal_name: Option<String>,

    /// "Member" or "Guest"
    pub user_type: Option<String>,

    pub external_user_state: Option<String>,

    pub external_user_state_change_date_time: Option<String>,

    pub on_premises_sync_enabled: Option<bool>,

    pub sign_in_activity: Option<SignInActivity>,
}

impl UserDetailRecord {
    /// Guest accounts are provisioned from outside the tenant
    pub fn is_guest(&self) -> bool {
        self.user_type.as_deref() == Some("Guest")
    }

    pub fn last_sign_in(&self) -> Option<&str> {
        self.sign_in_activity
            .as_ref()
            .and_then(|a| a.last_sign_in_date_time.as_deref())
    }

    pub fn last_non_interactive_sign_in(&self) -> Option<&str> {
        self.sign_in_activity
            .as_ref()
            .and_then(|a| a.last_non_interactive_sign_in_date_time.as_deref())
    }
}

/// Sign-in timestamps, only present for accounts that reported activity
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInActivity {
    pub last_sign_in_date_time: Option<String>,

    pub last_non_interactive_sign_in_date_time: Option<String>,
}
