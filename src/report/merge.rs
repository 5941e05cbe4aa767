//! Join registration records with user details into report rows

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::MergeWarning;
use crate::models::{AuthMethodRecord, ReportRow, UserDetailRecord};

use super::format::{self, NOT_AVAILABLE};

/// Output of [`merge`]: rows in registration order plus anything that was skipped or defaulted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedReport {
    pub rows: Vec<ReportRow>,
    pub warnings: Vec<MergeWarning>,
}

/// Build one row per registration record, looking up account details by user id.
///
/// Registrations without a matching detail record still produce a row with
/// defaulted cells. Only a registration without an id is dropped.
pub fn merge(
    registrations: &[AuthMethodRecord],
    details: &[UserDetailRecord],
    tenant_domain: &str,
) -> MergedReport {
    let mut warnings = Vec::new();
    let index = index_details(details, &mut warnings);

    let mut rows = Vec::with_capacity(registrations.len());
    for (position, registration) in registrations.iter().enumerate() {
        let Some(user_id) = non_blank(registration.user_id.as_deref()) else {
            warn(&mut warnings, MergeWarning::RegistrationWithoutId { index: position });
            continue;
        };

        let detail = index.get(user_id).copied();
        rows.push(build_row(user_id, registration, detail, tenant_domain, &mut warnings));
    }

    MergedReport { rows, warnings }
}

fn index_details<'a>(
    details: &'a [UserDetailRecord],
    warnings: &mut Vec<MergeWarning>,
) -> HashMap<&'a str, &'a UserDetailRecord> {
    let mut index = HashMap::with_capacity(details.len());

    for (position, detail) in details.iter().enumerate() {
        let Some(id) = non_blank(detail.id.as_deref()) else {
            warn(warnings, MergeWarning::DetailWithoutId { index: position });
            continue;
        };

        match index.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(detail);
            }
            Entry::Occupied(_) => warn(
                warnings,
                MergeWarning::DuplicateDetail {
                    user_id: id.to_string(),
                },
            ),
        }
    }

    index
}

fn build_row(
    user_id: &str,
    registration: &AuthMethodRecord,
    detail: Option<&UserDetailRecord>,
    tenant_domain: &str,
    warnings: &mut Vec<MergeWarning>,
) -> ReportRow {
    let upn = non_blank(registration.user_principal_name.as_deref())
        .or_else(|| detail.and_then(|d| d.user_principal_name.as_deref()));
    let external = detail.filter(|d| d.is_guest());

    let mut timestamp = |field: &'static str, value: Option<&str>| -> String {
        format::format_timestamp(value).unwrap_or_else(|_| {
            warn(
                warnings,
                MergeWarning::MalformedTimestamp {
                    user_id: user_id.to_string(),
                    field,
                    value: value.unwrap_or_default().to_string(),
                },
            );
            NOT_AVAILABLE.to_string()
        })
    };

    let external_user_state_last_change_utc = match external {
        Some(d) => timestamp(
            "externalUserStateChangeDateTime",
            d.external_user_state_change_date_time.as_deref(),
        ),
        None => NOT_AVAILABLE.to_string(),
    };
    let last_interactive_sign_in_utc =
        timestamp("lastSignInDateTime", detail.and_then(|d| d.last_sign_in()));
    let last_non_interactive_sign_in_utc = timestamp(
        "lastNonInteractiveSignInDateTime",
        detail.and_then(|d| d.last_non_interactive_sign_in()),
    );

    ReportRow {
        user_id: user_id.to_string(),
        // The registration report only lists enabled accounts
        is_enabled: format::yes_no(true).to_string(),
        user_display_name: or_not_available(
            non_blank(registration.user_display_name.as_deref())
                .or_else(|| detail.and_then(|d| d.display_name.as_deref())),
        ),
        user_principal_name: or_not_available(upn),
        is_external: match external {
            Some(_) => format::yes_no(true).to_string(),
            None => NOT_AVAILABLE.to_string(),
        },
        external_domain: or_not_available(
            external.and(upn).and_then(format::upn_domain),
        ),
        external_user_state: or_not_available(
            external.and_then(|d| d.external_user_state.as_deref()),
        ),
        external_user_state_last_change_utc,
        tenant_domain: tenant_domain.to_string(),
        methods_registered: format::join_methods(&registration.methods_registered),
        on_premises_sync_enabled: format::yes_no(
            detail
                .and_then(|d| d.on_premises_sync_enabled)
                .unwrap_or(false),
        )
        .to_string(),
        last_interactive_sign_in_utc,
        last_non_interactive_sign_in_utc,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn or_not_available(value: Option<&str>) -> String {
    non_blank(value).unwrap_or(NOT_AVAILABLE).to_string()
}

fn warn(warnings: &mut Vec<MergeWarning>, warning: MergeWarning) {
    tracing::warn!("{}", warning);
    warnings.push(warning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SignInActivity;
    use crate::report::format::{NEVER, NO_MFA_CONFIGURED};

    const TENANT: &str = "contoso.com";

    fn registration(id: &str, upn: &str, methods: &[&str]) -> AuthMethodRecord {
        AuthMethodRecord {
            user_id: Some(id.to_string()),
            user_display_name: Some(format!("User {}", id)),
            user_principal_name: Some(upn.to_string()),
            is_mfa_registered: Some(!methods.is_empty()),
            methods_registered: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn member(id: &str) -> UserDetailRecord {
        UserDetailRecord {
            id: Some(id.to_string()),
            user_type: Some("Member".to_string()),
            ..Default::default()
        }
    }

    fn guest(id: &str) -> UserDetailRecord {
        UserDetailRecord {
            id: Some(id.to_string()),
            user_type: Some("Guest".to_string()),
            external_user_state: Some("Accepted".to_string()),
            external_user_state_change_date_time: Some("2021-03-04T10:11:12Z".to_string()),
            sign_in_activity: Some(SignInActivity {
                last_sign_in_date_time: Some("2023-05-01T08:00:00Z".to_string()),
                last_non_interactive_sign_in_date_time: Some("0001-01-01T00:00:00Z".to_string()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_member_without_methods() {
        let registrations = vec![registration("u1", "adele@contoso.com", &[])];
        let details = vec![UserDetailRecord {
            on_premises_sync_enabled: Some(true),
            sign_in_activity: Some(SignInActivity::default()),
            ..member("u1")
        }];

        let report = merge(&registrations, &details, TENANT);
        let row = &report.rows[0];

        assert_eq!(row.user_id, "u1");
        assert_eq!(row.is_enabled, "Yes");
        assert_eq!(row.is_external, "N/A");
        assert_eq!(row.external_domain, "N/A");
        assert_eq!(row.external_user_state, "N/A");
        assert_eq!(row.methods_registered, NO_MFA_CONFIGURED);
        assert_eq!(row.on_premises_sync_enabled, "Yes");
        assert_eq!(row.last_interactive_sign_in_utc, "N/A");
        assert_eq!(row.last_non_interactive_sign_in_utc, "N/A");
        assert_eq!(row.tenant_domain, TENANT);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_guest_row() {
        let registrations = vec![registration(
            "g1",
            "bob@fabrikam.com",
            &["mobilePhone", "microsoftAuthenticatorPush"],
        )];
        let details = vec![guest("g1")];

        let report = merge(&registrations, &details, TENANT);
        let row = &report.rows[0];

        assert_eq!(row.is_external, "Yes");
        assert_eq!(row.external_domain, "fabrikam.com");
        assert_eq!(row.external_user_state, "Accepted");
        assert_eq!(row.external_user_state_last_change_utc, "2021-03-04T10:11:12");
        assert_eq!(row.methods_registered, "mobilePhone,microsoftAuthenticatorPush");
        assert_eq!(row.on_premises_sync_enabled, "No");
        assert_eq!(row.last_interactive_sign_in_utc, "2023-05-01T08:00:00");
        assert_eq!(row.last_non_interactive_sign_in_utc, NEVER);
    }

    #[test]
    fn test_missing_detail_defaults() {
        let registrations = vec![registration("u9", "ghost@contoso.com", &["email"])];

        let report = merge(&registrations, &[], TENANT);
        let row = &report.rows[0];

        assert_eq!(report.rows.len(), 1);
        assert_eq!(row.is_enabled, "Yes");
        assert_eq!(row.is_external, "N/A");
        assert_eq!(row.external_domain, "N/A");
        assert_eq!(row.external_user_state, "N/A");
        assert_eq!(row.external_user_state_last_change_utc, "N/A");
        assert_eq!(row.on_premises_sync_enabled, "No");
        assert_eq!(row.last_interactive_sign_in_utc, "N/A");
        assert_eq!(row.last_non_interactive_sign_in_utc, "N/A");
        assert_eq!(row.methods_registered, "email");
    }

    #[test]
    fn test_member_external_fields_are_not_available() {
        // A member with stale external state (e.g. converted guest) is not reported as external
        let registrations = vec![registration("u1", "carol@contoso.com", &["email"])];
        let details = vec![UserDetailRecord {
            external_user_state: Some("Accepted".to_string()),
            external_user_state_change_date_time: Some("2020-01-01T00:00:00Z".to_string()),
            ..member("u1")
        }];

        let row = &merge(&registrations, &details, TENANT).rows[0];

        assert_eq!(row.is_external, "N/A");
        assert_eq!(row.external_user_state, "N/A");
        assert_eq!(row.external_user_state_last_change_utc, "N/A");
    }

    #[test]
    fn test_preserves_registration_order_and_count() {
        let registrations = vec![
            registration("c", "c@contoso.com", &[]),
            registration("a", "a@contoso.com", &[]),
            registration("b", "b@contoso.com", &[]),
        ];
        let details = vec![member("a"), member("b"), member("c"), member("unrelated")];

        let report = merge(&registrations, &details, TENANT);
        let ids: Vec<&str> = report.rows.iter().map(|r| r.user_id.as_str()).collect();

        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_empty_registrations() {
        let report = merge(&[], &[member("a")], TENANT);
        assert!(report.rows.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let registrations = vec![
            registration("g1", "bob@fabrikam.com", &["mobilePhone"]),
            registration("u1", "adele@contoso.com", &[]),
        ];
        let details = vec![guest("g1"), member("u1")];

        let first = merge(&registrations, &details, TENANT);
        let second = merge(&registrations, &details, TENANT);

        assert_eq!(first, second);
    }

    #[test]
    fn test_registration_without_id_is_skipped() {
        let mut no_id = registration("x", "x@contoso.com", &[]);
        no_id.user_id = None;
        let mut blank_id = registration("y", "y@contoso.com", &[]);
        blank_id.user_id = Some("  ".to_string());
        let registrations = vec![no_id, registration("u1", "adele@contoso.com", &[]), blank_id];

        let report = merge(&registrations, &[member("u1")], TENANT);

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].user_id, "u1");
        assert_eq!(
            report.warnings,
            vec![
                MergeWarning::RegistrationWithoutId { index: 0 },
                MergeWarning::RegistrationWithoutId { index: 2 },
            ]
        );
    }

    #[test]
    fn test_detail_problems_are_warnings() {
        let registrations = vec![registration("u1", "adele@contoso.com", &[])];
        let details = vec![
            UserDetailRecord::default(),
            UserDetailRecord {
                on_premises_sync_enabled: Some(true),
                ..member("u1")
            },
            member("u1"),
        ];

        let report = merge(&registrations, &details, TENANT);

        assert_eq!(report.rows[0].on_premises_sync_enabled, "Yes");
        assert_eq!(
            report.warnings,
            vec![
                MergeWarning::DetailWithoutId { index: 0 },
                MergeWarning::DuplicateDetail {
                    user_id: "u1".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_malformed_timestamp_defaults_cell() {
        let registrations = vec![registration("u1", "adele@contoso.com", &[])];
        let details = vec![UserDetailRecord {
            sign_in_activity: Some(SignInActivity {
                last_sign_in_date_time: Some("not-a-date".to_string()),
                last_non_interactive_sign_in_date_time: Some("2024-02-29T23:59:59Z".to_string()),
            }),
            ..member("u1")
        }];

        let report = merge(&registrations, &details, TENANT);
        let row = &report.rows[0];

        assert_eq!(row.last_interactive_sign_in_utc, "N/A");
        assert_eq!(row.last_non_interactive_sign_in_utc, "2024-02-29T23:59:59");
        assert_eq!(
            report.warnings,
            vec![MergeWarning::MalformedTimestamp {
                user_id: "u1".to_string(),
                field: "lastSignInDateTime",
                value: "not-a-date".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_names_render_not_available() {
        let registrations = vec![AuthMethodRecord {
            user_id: Some("u1".to_string()),
            ..Default::default()
        }];

        let row = &merge(&registrations, &[guest("u1")], TENANT).rows[0];

        assert_eq!(row.user_display_name, "N/A");
        assert_eq!(row.user_principal_name, "N/A");
        assert_eq!(row.is_external, "Yes");
        assert_eq!(row.external_domain, "N/A");
    }

    #[test]
    fn test_names_fall_back_to_user_detail() {
        let registrations = vec![AuthMethodRecord {
            user_id: Some("g1".to_string()),
            methods_registered: vec!["email".to_string()],
            ..Default::default()
        }];
        let details = vec![UserDetailRecord {
            display_name: Some("Bob (Fabrikam)".to_string()),
            user_principal_name: Some("bob@fabrikam.com".to_string()),
            ..guest("g1")
        }];

        let row = &merge(&registrations, &details, TENANT).rows[0];

        assert_eq!(row.user_display_name, "Bob (Fabrikam)");
        assert_eq!(row.user_principal_name, "bob@fabrikam.com");
        assert_eq!(row.external_domain, "fabrikam.com");
    }
}
