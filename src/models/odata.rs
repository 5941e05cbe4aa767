//! OData response wrapper

use serde::Deserialize;

/// Generic OData collection response with value array
#[derive(Debug, Deserialize)]
pub struct ODataResponse<T> {
    #[serde(rename = "value", default = "Vec::new")]
    pub value: Vec<T>,

    /// Microsoft Graph uses `@odata.nextLink`, the legacy AAD Graph `odata.nextLink`
    #[serde(rename = "@odata.nextLink", alias = "odata.nextLink")]
    pub next_link: Option<String>,
}
