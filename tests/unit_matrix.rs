use lonca::cli::default_matrix;
use lonca::modules::roles::model::{MatrixDraft, MatrixEntryDto, SaveMatrixDto};
use lonca::modules::roles::service::fallback_mapping;
use lonca_core::permissions::{CATALOG, FULL_ACCESS_ROLES};
use lonca_models::roles::RolePermissionMap;

#[test]
fn test_fallback_keeps_full_access_roles_privileged() {
    let mapping = fallback_mapping();
    for role in FULL_ACCESS_ROLES {
        for permission in CATALOG {
            assert!(
                mapping.contains(role, permission),
                "fallback must grant {} to {}",
                permission,
                role
            );
        }
    }
    // Nobody else gets anything for free during an outage.
    assert_eq!(mapping.len(), FULL_ACCESS_ROLES.len());
}

#[test]
fn test_saved_rows_are_exactly_the_draft() {
    let dto = SaveMatrixDto {
        entries: vec![
            MatrixEntryDto {
                role: "sosyal_medya".to_string(),
                permissions: vec!["news".to_string(), "slides".to_string()],
            },
            MatrixEntryDto {
                role: "dergi_ekibi".to_string(),
                permissions: vec!["magazines".to_string()],
            },
        ],
    };

    let rows = MatrixDraft::from_entries(dto).into_rows();
    let reloaded = RolePermissionMap::from_rows(rows);

    // Full replacement: exactly the draft, nothing residual.
    assert_eq!(reloaded.len(), 2);
    assert!(reloaded.contains("sosyal_medya", "news"));
    assert!(reloaded.contains("sosyal_medya", "slides"));
    assert!(reloaded.contains("dergi_ekibi", "magazines"));
    assert!(!reloaded.contains("dergi_ekibi", "documents"));
}

#[test]
fn test_replacement_drops_roles_absent_from_draft() {
    // Prior mapping had grants for a role the new draft omits.
    let dto = SaveMatrixDto {
        entries: vec![MatrixEntryDto {
            role: "sosyal_medya".to_string(),
            permissions: vec!["news".to_string()],
        }],
    };

    let reloaded = RolePermissionMap::from_rows(MatrixDraft::from_entries(dto).into_rows());
    assert!(reloaded.permissions_for("eski_ekip").is_none());
}

#[test]
fn test_toggle_then_save_roundtrip() {
    let mut draft = MatrixDraft::from_mapping(fallback_mapping());
    assert!(!draft.is_dirty());

    draft.toggle("uye", "events");
    draft.toggle("baskan", "news"); // revoke one full-access cell
    assert!(draft.is_dirty());

    let reloaded = RolePermissionMap::from_rows(draft.into_rows());
    assert!(reloaded.contains("uye", "events"));
    assert!(!reloaded.contains("baskan", "news"));
    assert!(reloaded.contains("baskan", "events"));
}

#[test]
fn test_default_matrix_is_superset_of_fallback() {
    let defaults = default_matrix();
    for role in FULL_ACCESS_ROLES {
        for permission in CATALOG {
            assert!(defaults.contains(role, permission));
        }
    }
    assert!(defaults.contains("sponsorluk_ekibi", "sponsors"));
    assert!(!defaults.contains("sponsorluk_ekibi", "users"));
}
