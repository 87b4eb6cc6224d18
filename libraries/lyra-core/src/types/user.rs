/// User domain type
use serde::{Deserialize, Serialize};

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: i64,

    /// Unique sign-in name
    pub username: String,

    /// Contact email
    pub email: String,

    /// Account creation timestamp (RFC 3339, UTC)
    pub created_at: String,
}

/// Mutable profile fields a user may overwrite on their own account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub email: String,
}
