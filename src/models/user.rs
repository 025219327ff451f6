use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Requester,
    Provider,
    Both,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Requester => "requester",
            UserType::Provider => "provider",
            UserType::Both => "both",
        }
    }

    pub fn can_bid(&self) -> bool {
        matches!(self, UserType::Provider | UserType::Both)
    }
}

impl TryFrom<String> for UserType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "requester" => Ok(UserType::Requester),
            "provider" => Ok(UserType::Provider),
            "both" => Ok(UserType::Both),
            other => Err(format!("unknown user type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub location: String,
    pub is_verified: bool,
    pub rating: f32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What leaves the service: a user without the password hash.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub location: String,
    pub is_verified: bool,
    pub rating: f32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            email: user.email,
            user_type: user.user_type,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            location: user.location,
            is_verified: user.is_verified,
            rating: user.rating,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Profile fields a user may change. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}
