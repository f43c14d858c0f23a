//! Member (account) entities.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::MemberId;

/// A registered member of the association.
///
/// `email_confirmed` is flipped by the identity side of the system; the
/// authorization subsystem only ever reads it. The password hash is kept out
/// of this struct so it never leaks through a serialized response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub email_confirmed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
