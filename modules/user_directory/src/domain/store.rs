use crate::contract::model::User;
use async_trait::async_trait;
use uuid::Uuid;

/// Port for the domain layer: the authoritative record store.
/// Object-safe and async-friendly via `async_trait`.
///
/// Every operation is atomic per id; operations on distinct ids must never
/// block one another. The in-memory implementation is infallible; the error
/// channel exists for the port contract.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Snapshot of every record, stably sorted by `(last_name, first_name)`
    /// ascending. Mutations made after the snapshot are never observed.
    async fn list_all(&self) -> anyhow::Result<Vec<User>>;
    /// Load a record by id. No side effects.
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Insert a fully-formed record by `u.id`.
    ///
    /// Service computes id/timestamps/validation; the store persists.
    async fn insert(&self, u: User) -> anyhow::Result<User>;
    /// Replace an existing record (by primary key in `u.id`).
    /// Returns false when the record vanished concurrently.
    async fn update(&self, u: User) -> anyhow::Result<bool>;
    /// Delete by id. Returns true if a record was removed.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
