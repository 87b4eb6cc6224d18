/// Result algebra for service operations
use thiserror::Error;

/// Outcome type alias: every service operation resolves to exactly one of
/// `Ok(value)` or `Err(OpReject)`.
pub type OpResult<T> = std::result::Result<T, OpReject>;

/// Rejected operation, carrying a single human-readable message.
///
/// There is deliberately no structured code: the executor maps every reject
/// to the same client-visible failure class, so absence and inaccessibility
/// stay indistinguishable to non-owners.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct OpReject {
    /// Human-readable, non-localized failure description
    pub message: String,
}

impl OpReject {
    /// Create a reject with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Standard reject for an unresolvable caller identity
    pub fn user_not_found() -> Self {
        Self::new("User not found")
    }
}

impl From<String> for OpReject {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for OpReject {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_displays_its_message() {
        let reject = OpReject::new("Chat not found or not accessible");
        assert_eq!(reject.to_string(), "Chat not found or not accessible");
    }

    #[test]
    fn op_result_is_exhaustive() {
        let ok: OpResult<i64> = Ok(7);
        let err: OpResult<i64> = Err(OpReject::user_not_found());

        match ok {
            Ok(v) => assert_eq!(v, 7),
            Err(_) => panic!("expected success"),
        }
        match err {
            Ok(_) => panic!("expected reject"),
            Err(reject) => assert_eq!(reject.message, "User not found"),
        }
    }
}
