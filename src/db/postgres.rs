use diesel::connection::InstrumentationEvent;
use diesel_async::{
    pooled_connection::{
        deadpool::{BuildError, Object, Pool, PoolError},
        AsyncDieselConnectionManager,
    },
    AsyncConnection, AsyncPgConnection,
};

use super::bookmark::{self, Bookmark, BookmarkChanges, NewBookmark};
use super::store::BookmarkStore;

/// Relational-engine backend of the storage port, one pooled connection per
/// operation. One statement per logical operation, no transactions.
pub struct PgStore {
    pool: Pool<AsyncPgConnection>,
}

impl PgStore {
    pub fn connect(url: &str) -> Result<Self, BuildError> {
        let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(url);
        Ok(Self {
            pool: Pool::builder(config).build()?,
        })
    }

    async fn conn(&self) -> Result<Object<AsyncPgConnection>, PoolError> {
        let mut conn = self.pool.get().await?;

        conn.set_instrumentation(|event: InstrumentationEvent<'_>| match event {
            InstrumentationEvent::StartQuery { query, .. } => {
                tracing::debug!("Executing query: {}", query);
            }
            InstrumentationEvent::FinishQuery { query, error, .. } => match error {
                Some(e) => tracing::error!("Query failed: {}\nError: {:?}", query, e),
                None => tracing::debug!("Executing query succeeded: {}", query),
            },
            _ => {}
        });

        Ok(conn)
    }
}

#[rocket::async_trait]
impl BookmarkStore for PgStore {
    async fn list(&self) -> anyhow::Result<Vec<Bookmark>> {
        let mut conn = self.conn().await?;
        Ok(bookmark::all_bookmarks(&mut conn).await?)
    }

    async fn get(&self, id: i32) -> anyhow::Result<Option<Bookmark>> {
        let mut conn = self.conn().await?;
        Ok(bookmark::get_bookmark(&mut conn, id).await?)
    }

    async fn insert(&self, new: NewBookmark) -> anyhow::Result<Bookmark> {
        let mut conn = self.conn().await?;
        Ok(bookmark::create_bookmark(&mut conn, &new).await?)
    }

    async fn update(&self, id: i32, changes: BookmarkChanges) -> anyhow::Result<usize> {
        let mut conn = self.conn().await?;
        Ok(bookmark::update_bookmark(&mut conn, id, &changes).await?)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<usize> {
        let mut conn = self.conn().await?;
        Ok(bookmark::delete_bookmark(&mut conn, id).await?)
    }
}
