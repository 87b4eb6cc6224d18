/// Generic CRUD service contract
use crate::{identity::Identity, outcome::OpResult};
use async_trait::async_trait;

/// The one service abstraction every entity type implements.
///
/// `Input` is the caller-supplied, partially populated shape; `Entity` is the
/// persisted shape handed back. Each operation resolves the acting user from
/// the identity and scopes every query to rows that user owns.
#[async_trait]
pub trait CrudService: Send + Sync {
    /// Caller-supplied input shape (partially populated)
    type Input: Send + 'static;
    /// Persisted entity shape returned to the caller
    type Entity: Send + 'static;

    /// Fetch exactly one owned row matching the filter.
    ///
    /// Id takes precedence over name/title; name/title match is
    /// case-insensitive. Zero matches is a reject, never an empty value.
    async fn get_one(&self, identity: &Identity, input: Self::Input) -> OpResult<Self::Entity>;

    /// Fetch all owned rows, optionally narrowed by the filter.
    ///
    /// Zero matches is `Ok(vec![])` — no results is not a failure.
    async fn get_many(
        &self,
        identity: &Identity,
        filter: Option<Self::Input>,
    ) -> OpResult<Vec<Self::Entity>>;

    /// Persist a new row owned by the acting user.
    ///
    /// Rejects when the entity's per-owner uniqueness constraint is already
    /// satisfied by an existing row.
    async fn create(&self, identity: &Identity, input: Self::Input) -> OpResult<Self::Entity>;

    /// Overwrite mutable fields of an owned row in place.
    async fn update(&self, identity: &Identity, input: Self::Input) -> OpResult<Self::Entity>;

    /// Hard-delete an owned row, returning its prior state.
    async fn delete(&self, identity: &Identity, input: Self::Input) -> OpResult<Self::Entity>;
}
