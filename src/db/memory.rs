use tokio::sync::Mutex;

use super::bookmark::{Bookmark, BookmarkChanges, NewBookmark};
use super::store::BookmarkStore;

/// In-memory backend of the storage port, used by route tests. Assigns ids
/// the way a serial column would: monotonically, starting at 1.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: Vec<Bookmark>,
    last_id: i32,
}

#[rocket::async_trait]
impl BookmarkStore for MemoryStore {
    async fn list(&self) -> anyhow::Result<Vec<Bookmark>> {
        Ok(self.inner.lock().await.rows.clone())
    }

    async fn get(&self, id: i32) -> anyhow::Result<Option<Bookmark>> {
        let inner = self.inner.lock().await;
        Ok(inner.rows.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, new: NewBookmark) -> anyhow::Result<Bookmark> {
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let row = Bookmark {
            id: inner.last_id,
            title: new.title,
            url: new.url,
            rating: new.rating,
            description: new.description,
        };
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, changes: BookmarkChanges) -> anyhow::Result<usize> {
        let mut inner = self.inner.lock().await;
        let Some(row) = inner.rows.iter_mut().find(|b| b.id == id) else {
            return Ok(0);
        };
        if let Some(title) = changes.title {
            row.title = title;
        }
        if let Some(url) = changes.url {
            row.url = url;
        }
        if let Some(rating) = changes.rating {
            row.rating = rating;
        }
        if let Some(description) = changes.description {
            row.description = description;
        }
        Ok(1)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<usize> {
        let mut inner = self.inner.lock().await;
        let before = inner.rows.len();
        inner.rows.retain(|b| b.id != id);
        Ok(before - inner.rows.len())
    }
}
