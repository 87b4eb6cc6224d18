/// Caller identity for ownership scoping
use serde::{Deserialize, Serialize};

/// Opaque caller identity as produced by the transport layer.
///
/// Holds at most a username; services resolve it to a `User` row freshly on
/// every call. An identity with no username is an unauthenticated caller and
/// fails every ownership check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Username asserted by the transport (token subject), if any
    pub username: Option<String>,
}

impl Identity {
    /// Identity for an authenticated caller
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }

    /// Identity for an unauthenticated caller
    pub fn anonymous() -> Self {
        Self { username: None }
    }

    /// The asserted username, if any
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}
