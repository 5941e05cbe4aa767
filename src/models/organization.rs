//! Tenant organization model

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,

    pub display_name: Option<String>,

    #[serde(default)]
    pub verified_domains: Vec<VerifiedDomain>,
}

impl Organization {
    pub fn get_display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    /// The default verified domain, falling back to the initial `onmicrosoft.com` domain
    pub fn default_domain(&self) -> Option<&str> {
        self.verified_domains
            .iter()
            .find(|d| d.is_default.unwrap_or(false))
            .or_else(|| {
                self.verified_domains
                    .iter()
                    .find(|d| d.is_initial.unwrap_or(false))
            })
            .map(|d| d.name.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedDomain {
    pub name: String,

    pub is_default: Option<bool>,

    pub is_initial: Option<bool>,
}
