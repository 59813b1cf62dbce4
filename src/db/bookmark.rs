use diesel::prelude::*;
use diesel_async::{AsyncPgConnection as Connection, RunQueryDsl};
use rocket::serde::{Deserialize, Serialize};

use super::schema::bookmarks;

#[derive(Queryable, Selectable, Identifiable, Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
#[serde(crate = "rocket::serde")]
#[diesel(table_name = bookmarks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Bookmark {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub rating: i32,
    pub description: String,
}

#[derive(Insertable, Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
#[serde(crate = "rocket::serde")]
#[diesel(table_name = bookmarks)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub rating: i32,
    pub description: String,
}

/// A validated partial update. `None` fields keep their persisted value.
#[derive(AsChangeset, Deserialize, Serialize, PartialEq, Eq, Debug, Default, Clone)]
#[serde(crate = "rocket::serde")]
#[diesel(table_name = bookmarks)]
pub struct BookmarkChanges {
    pub title: Option<String>,
    pub url: Option<String>,
    pub rating: Option<i32>,
    pub description: Option<String>,
}

pub async fn all_bookmarks(conn: &mut Connection) -> QueryResult<Vec<Bookmark>> {
    bookmarks::table
        .select(Bookmark::as_select())
        .load(conn)
        .await
}

pub async fn get_bookmark(conn: &mut Connection, id: i32) -> QueryResult<Option<Bookmark>> {
    bookmarks::table.find(id).first(conn).await.optional()
}

pub async fn create_bookmark(conn: &mut Connection, new: &NewBookmark) -> QueryResult<Bookmark> {
    diesel::insert_into(bookmarks::table)
        .values(new)
        .returning(Bookmark::as_returning())
        .get_result(conn)
        .await
}

pub async fn update_bookmark(
    conn: &mut Connection,
    id: i32,
    changes: &BookmarkChanges,
) -> QueryResult<usize> {
    diesel::update(bookmarks::table.find(id))
        .set(changes)
        .execute(conn)
        .await
}

pub async fn delete_bookmark(conn: &mut Connection, id: i32) -> QueryResult<usize> {
    diesel::delete(bookmarks::table.find(id)).execute(conn).await
}
