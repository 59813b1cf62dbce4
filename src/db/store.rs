use crate::db::bookmark::{Bookmark, BookmarkChanges, NewBookmark};

/// Storage port for bookmark persistence.
///
/// Handlers only see this trait; the concrete engine is injected at startup
/// ([`PgStore`](crate::db::postgres::PgStore) in production,
/// [`MemoryStore`](crate::db::memory::MemoryStore) in tests). Errors from the
/// underlying store propagate unmodified; absence of a row is signalled by
/// `None` or an affected-row count of zero, never by an error.
#[rocket::async_trait]
pub trait BookmarkStore: Send + Sync {
    /// All rows, in storage order.
    async fn list(&self) -> anyhow::Result<Vec<Bookmark>>;

    async fn get(&self, id: i32) -> anyhow::Result<Option<Bookmark>>;

    /// Persists a new row, returning it with the store-assigned id.
    async fn insert(&self, new: NewBookmark) -> anyhow::Result<Bookmark>;

    /// Applies only the supplied fields. Returns the affected-row count;
    /// zero means the id does not exist.
    async fn update(&self, id: i32, changes: BookmarkChanges) -> anyhow::Result<usize>;

    /// Returns the affected-row count; zero means the id does not exist.
    async fn delete(&self, id: i32) -> anyhow::Result<usize>;
}
