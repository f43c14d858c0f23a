//! Matrix editor DTOs and the in-memory draft.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use lonca_models::roles::{
    PermissionKey, RoleKey, RolePermissionMap, RolePermissionRow, display_name,
};

/// The matrix as presented to the editor: rows are roles, columns are the
/// permission catalog, a listed permission is a checked cell.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatrixResponse {
    /// Column order for the editor grid.
    pub catalog: Vec<String>,
    pub roles: Vec<MatrixRowDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MatrixRowDto {
    pub role: String,
    pub label: String,
    pub permissions: Vec<String>,
}

impl MatrixResponse {
    pub fn from_mapping(mapping: &RolePermissionMap) -> Self {
        let mut roles: Vec<MatrixRowDto> = mapping
            .iter()
            .map(|(role, permissions)| {
                let mut permissions: Vec<String> =
                    permissions.iter().map(|p| p.to_string()).collect();
                permissions.sort();
                MatrixRowDto {
                    role: role.to_string(),
                    label: display_name(role.as_str()).to_string(),
                    permissions,
                }
            })
            .collect();
        roles.sort_by(|a, b| a.role.cmp(&b.role));

        Self {
            catalog: lonca_core::permissions::CATALOG
                .iter()
                .map(|p| p.to_string())
                .collect(),
            roles,
        }
    }
}

/// One role key with its human-readable label.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleLabelDto {
    pub key: String,
    pub label: String,
}

/// Full-replacement save payload: the complete intended mapping, not a
/// diff. Roles absent from the payload end up with no permissions.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveMatrixDto {
    #[validate(nested)]
    pub entries: Vec<MatrixEntryDto>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MatrixEntryDto {
    #[validate(length(min = 1, max = 64, message = "Role key must be 1-64 characters"))]
    pub role: String,
    pub permissions: Vec<String>,
}

/// The editor's working copy of the mapping.
///
/// `toggle` is a pure local mutation; nothing touches the store until the
/// draft is saved wholesale. The dirty flag tells the editor UI whether
/// there is anything to save or discard.
#[derive(Debug, Clone, Default)]
pub struct MatrixDraft {
    mapping: RolePermissionMap,
    dirty: bool,
}

impl MatrixDraft {
    /// Starts a draft from the currently stored mapping.
    pub fn from_mapping(mapping: RolePermissionMap) -> Self {
        Self {
            mapping,
            dirty: false,
        }
    }

    /// Builds a draft straight from a save payload. Arrives already dirty:
    /// it only exists because the editor wants to replace the mapping.
    pub fn from_entries(dto: SaveMatrixDto) -> Self {
        let mut mapping = RolePermissionMap::new();
        for entry in dto.entries {
            let role = RoleKey::from(entry.role);
            for permission in entry.permissions {
                mapping.grant(role.clone(), PermissionKey::from(permission));
            }
        }
        Self {
            mapping,
            dirty: true,
        }
    }

    /// Flips one cell of the grid.
    pub fn toggle(&mut self, role: &str, permission: &str) {
        if !self.mapping.revoke(role, permission) {
            self.mapping
                .grant(RoleKey::from(role), PermissionKey::from(permission));
        }
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mapping(&self) -> &RolePermissionMap {
        &self.mapping
    }

    /// Flattens the draft into the rows the save path inserts.
    pub fn into_rows(self) -> Vec<RolePermissionRow> {
        self.mapping.into_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_membership_both_ways() {
        let mut draft = MatrixDraft::default();
        assert!(!draft.is_dirty());

        draft.toggle("dergi_ekibi", "magazines");
        assert!(draft.mapping().contains("dergi_ekibi", "magazines"));
        assert!(draft.is_dirty());

        draft.toggle("dergi_ekibi", "magazines");
        assert!(!draft.mapping().contains("dergi_ekibi", "magazines"));
    }

    #[test]
    fn test_from_entries_collapses_duplicates() {
        let draft = MatrixDraft::from_entries(SaveMatrixDto {
            entries: vec![MatrixEntryDto {
                role: "sosyal_medya".to_string(),
                permissions: vec![
                    "news".to_string(),
                    "news".to_string(),
                    "slides".to_string(),
                ],
            }],
        });
        assert!(draft.is_dirty());
        assert_eq!(
            draft.mapping().permissions_for("sosyal_medya").unwrap().len(),
            2
        );
    }

    #[test]
    fn test_into_rows_is_the_exact_draft() {
        let mut draft = MatrixDraft::default();
        draft.toggle("sosyal_medya", "news");
        draft.toggle("dergi_ekibi", "magazines");
        draft.toggle("sosyal_medya", "events");
        draft.toggle("sosyal_medya", "events"); // toggled back off

        let rows = draft.clone().into_rows();
        let rebuilt = RolePermissionMap::from_rows(rows);
        assert_eq!(&rebuilt, draft.mapping());
        assert!(!rebuilt.contains("sosyal_medya", "events"));
    }

    #[test]
    fn test_save_dto_validation() {
        let valid = SaveMatrixDto {
            entries: vec![MatrixEntryDto {
                role: "uye".to_string(),
                permissions: vec![],
            }],
        };
        assert!(valid.validate().is_ok());

        let empty_role = SaveMatrixDto {
            entries: vec![MatrixEntryDto {
                role: String::new(),
                permissions: vec![],
            }],
        };
        assert!(empty_role.validate().is_err());
    }

    #[test]
    fn test_matrix_response_sorted_rows() {
        let mut mapping = RolePermissionMap::new();
        mapping.grant(RoleKey::from("teknik_ekip"), PermissionKey::from("settings"));
        mapping.grant(RoleKey::from("baskan"), PermissionKey::from("users"));

        let response = MatrixResponse::from_mapping(&mapping);
        assert_eq!(response.roles[0].role, "baskan");
        assert_eq!(response.roles[0].label, "Başkan");
        assert_eq!(response.roles[1].role, "teknik_ekip");
        assert_eq!(response.catalog.len(), 12);
    }
}
