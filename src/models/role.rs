use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Role as stored in the registry. `users_count` is not stored; the API
/// layer computes it from the user directory so it can never drift.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: Uuid,
    #[schema(example = "Editor")]
    pub name: String,
    #[schema(example = "Can view and edit user accounts")]
    pub description: String,
    /// Permission names granted by this role, all present in the catalog
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role plus the live number of users currently holding it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoleWithCount {
    #[serde(flatten)]
    pub role: Role,
    pub users_count: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RoleCreateRequest {
    #[schema(example = "Editor")]
    pub name: String,
    #[schema(example = "Can view and edit user accounts")]
    pub description: String,
    #[schema(example = json!(["users:read", "users:write"]))]
    pub permissions: Vec<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RoleUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct RoleListQuery {
    /// Case-insensitive substring match over name and description
    pub search: Option<String>,
}
