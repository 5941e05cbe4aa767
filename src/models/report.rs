//! Flattened report row, one per registered user

use serde::Serialize;

/// Presentation row. Every cell is already rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub user_id: String,
    pub is_enabled: String,
    pub user_display_name: String,
    pub user_principal_name: String,
    pub is_external: String,
    pub external_domain: String,
    pub external_user_state: String,
    #[serde(rename = "externalUserStateLastChangeUTC")]
    pub external_user_state_last_change_utc: String,
    pub tenant_domain: String,
    pub methods_registered: String,
    pub on_premises_sync_enabled: String,
    #[serde(rename = "lastInteractiveSignInUTC")]
    pub last_interactive_sign_in_utc: String,
    #[serde(rename = "lastNonInteractiveSignInUTC")]
    pub last_non_interactive_sign_in_utc: String,
}

impl ReportRow {
    /// Header row, in output column order
    pub const COLUMNS: [&'static str; 13] = [
        "userId",
        "isEnabled",
        "userDisplayName",
        "userPrincipalName",
        "isExternal",
        "externalDomain",
        "externalUserState",
        "externalUserStateLastChangeUTC",
        "tenantDomain",
        "methodsRegistered",
        "onPremisesSyncEnabled",
        "lastInteractiveSignInUTC",
        "lastNonInteractiveSignInUTC",
    ];

    /// Cell values in the same order as [`ReportRow::COLUMNS`]
    pub fn cells(&self) -> [&str; 13] {
        [
            self.user_id.as_str(),
            self.is_enabled.as_str(),
            self.user_display_name.as_str(),
            self.user_principal_name.as_str(),
            self.is_external.as_str(),
            self.external_domain.as_str(),
            self.external_user_state.as_str(),
            self.external_user_state_last_change_utc.as_str(),
            self.tenant_domain.as_str(),
            self.methods_registered.as_str(),
            self.on_premises_sync_enabled.as_str(),
            self.last_interactive_sign_in_utc.as_str(),
            self.last_non_interactive_sign_in_utc.as_str(),
        ]
    }
}
