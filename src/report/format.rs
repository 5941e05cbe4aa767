//! Cell formatting helpers

use chrono::{DateTime, Datelike, Utc};

pub const NOT_AVAILABLE: &str = "N/A";
pub const NEVER: &str = "Never";
pub const NO_MFA_CONFIGURED: &str = "No AAD MFA configured";

pub fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Render a directory timestamp as `YYYY-MM-DDTHH:MM:SS` in UTC.
///
/// The directory reports accounts that never signed in as `0001-01-01T00:00:00Z`,
/// anything before 2000 is rendered as "Never".
pub fn format_timestamp(value: Option<&str>) -> Result<String, chrono::ParseError> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(NOT_AVAILABLE.to_string());
    };

    let parsed = DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc);
    if parsed.year() <= 1999 {
        return Ok(NEVER.to_string());
    }

    Ok(parsed.format("%Y-%m-%dT%H:%M:%S").to_string())
}

/// Comma-joined methods in source order, repeats dropped
pub fn join_methods(methods: &[String]) -> String {
    let mut seen: Vec<&str> = Vec::with_capacity(methods.len());
    for method in methods {
        let method = method.trim();
        if !method.is_empty() && !seen.contains(&method) {
            seen.push(method);
        }
    }

    if seen.is_empty() {
        NO_MFA_CONFIGURED.to_string()
    } else {
        seen.join(",")
    }
}

/// Domain part of a UPN, after the `@`
pub fn upn_domain(upn: &str) -> Option<&str> {
    upn.split_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
}
