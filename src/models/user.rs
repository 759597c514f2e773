use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    #[schema(example = "Alice Brennan")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Display name of the role this user holds (case-insensitive link)
    #[schema(example = "Editor")]
    pub role: String,
    pub status: UserStatus,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserCreateRequest {
    #[schema(example = "Alice Brennan")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "Editor")]
    pub role: String,
    #[serde(default = "default_status")]
    pub status: UserStatus,
    pub avatar: Option<String>,
}

fn default_status() -> UserStatus {
    UserStatus::Active
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<UserStatus>,
    pub avatar: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct UserListQuery {
    /// Case-insensitive match against name, email or role
    pub search: Option<String>,
    /// `active`, `inactive` or `all` (default)
    pub status: Option<String>,
    /// Exact case-insensitive role name ("who holds this role")
    pub role: Option<String>,
}
