use rocket::response::status::{Created, NoContent};
use rocket::serde::json::Json;
use rocket::State;

use super::errors::Error;
use super::guards::Auth;
use super::sanitize::sanitize;
use super::validation::{self, CreateBookmark, UpdateBookmark};
use crate::db::bookmark::Bookmark;
use crate::db::store::BookmarkStore;

#[get("/")]
pub async fn list_bookmarks(
    _auth: Auth,
    store: &State<Box<dyn BookmarkStore>>,
) -> Result<Json<Vec<Bookmark>>, Error> {
    let rows = store.list().await?;
    Ok(Json(rows.into_iter().map(sanitize).collect()))
}

#[get("/<id>")]
pub async fn get_bookmark(
    _auth: Auth,
    store: &State<Box<dyn BookmarkStore>>,
    id: i32,
) -> Result<Json<Bookmark>, Error> {
    store
        .get(id)
        .await?
        .map(|m| Json(sanitize(m)))
        .ok_or_else(Error::not_found)
}

#[post("/", format = "application/json", data = "<payload>")]
pub async fn create_bookmark(
    _auth: Auth,
    store: &State<Box<dyn BookmarkStore>>,
    payload: Json<CreateBookmark>,
) -> Result<Created<Json<Bookmark>>, Error> {
    let new = validation::validate_create(&payload)?;
    let created = store.insert(new).await?;
    let location = uri!("/bookmarks", get_bookmark(created.id)).to_string();
    Ok(Created::new(location).body(Json(sanitize(created))))
}

#[patch("/<id>", format = "application/json", data = "<payload>")]
pub async fn update_bookmark(
    _auth: Auth,
    store: &State<Box<dyn BookmarkStore>>,
    id: i32,
    payload: Json<UpdateBookmark>,
) -> Result<NoContent, Error> {
    let changes = validation::validate_update(&payload)?;
    if store.update(id, changes).await? == 0 {
        return Err(Error::not_found());
    }
    Ok(NoContent)
}

#[delete("/<id>")]
pub async fn delete_bookmark(
    _auth: Auth,
    store: &State<Box<dyn BookmarkStore>>,
    id: i32,
) -> Result<NoContent, Error> {
    if store.delete(id).await? == 0 {
        return Err(Error::not_found());
    }
    Ok(NoContent)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        list_bookmarks,
        get_bookmark,
        create_bookmark,
        update_bookmark,
        delete_bookmark
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::api::configs::Config;
    use crate::db::memory::MemoryStore;

    use rocket::fairing::AdHoc;
    use rocket::http::{ContentType, Header, Status};
    use rocket::local::blocking::Client;
    use rocket::serde::json::{json, Value};

    const TEST_TOKEN: &str = "test-api-token";

    fn test_client() -> Client {
        use rocket::figment::{providers::Serialized, Figment};
        let figment = Figment::from(rocket::Config::default()).merge(Serialized::defaults(
            Config {
                api_token: Some(TEST_TOKEN.to_string()),
            },
        ));
        let app = rocket::custom(figment)
            .manage(Box::new(MemoryStore::default()) as Box<dyn BookmarkStore>)
            .mount("/", routes![crate::api::index])
            .mount("/bookmarks", routes())
            .register("/", crate::api::errors::catchers())
            .attach(AdHoc::config::<Config>());
        Client::tracked(app).expect("valid rocket instance")
    }

    fn auth() -> Header<'static> {
        Header::new("Authorization", format!("Bearer {}", TEST_TOKEN))
    }

    fn create(client: &Client, payload: &Value) -> Bookmark {
        let response = client
            .post("/bookmarks")
            .header(auth())
            .json(payload)
            .dispatch();
        assert_eq!(response.status(), Status::Created);
        response.into_json().unwrap()
    }

    fn sample_payload() -> Value {
        json!({
            "title": "Rust",
            "url": "https://www.rust-lang.org",
            "rating": 4,
            "description": "the language"
        })
    }

    #[test]
    fn every_route_requires_a_token() {
        let client = test_client();
        let unauthorized = r#"{"error":"Unauthorized request"}"#;

        let response = client.get("/bookmarks").dispatch();
        assert_eq!(response.status(), Status::Unauthorized);
        assert_eq!(response.into_string().unwrap(), unauthorized);

        assert_eq!(
            client.get("/bookmarks/1").dispatch().status(),
            Status::Unauthorized
        );
        assert_eq!(
            client.delete("/bookmarks/1").dispatch().status(),
            Status::Unauthorized
        );

        // auth is checked before the body is touched, even for garbage
        let response = client
            .post("/bookmarks")
            .header(ContentType::JSON)
            .body("{not json")
            .dispatch();
        assert_eq!(response.status(), Status::Unauthorized);

        let response = client
            .patch("/bookmarks/1")
            .header(Header::new("Authorization", "Bearer wrong-token"))
            .json(&json!({"rating": 1}))
            .dispatch();
        assert_eq!(response.status(), Status::Unauthorized);

        // the root route stays open
        assert_eq!(client.get("/").dispatch().status(), Status::Ok);
    }

    #[test]
    fn list_starts_empty() {
        let client = test_client();
        let response = client.get("/bookmarks").header(auth()).dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_json::<Vec<Bookmark>>().unwrap(), vec![]);
    }

    #[test]
    fn create_then_fetch_roundtrip() {
        let client = test_client();
        let response = client
            .post("/bookmarks")
            .header(auth())
            .json(&sample_payload())
            .dispatch();
        assert_eq!(response.status(), Status::Created);
        let location = response
            .headers()
            .get_one("Location")
            .expect("Location header")
            .to_string();
        let added: Bookmark = response.into_json().unwrap();

        assert!(added.id > 0);
        assert_eq!(location, format!("/bookmarks/{}", added.id));
        assert_eq!(added.title, "Rust");
        assert_eq!(added.url, "https://www.rust-lang.org");
        assert_eq!(added.rating, 4);
        assert_eq!(added.description, "the language");

        let response = client.get(location.as_str()).header(auth()).dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_json::<Bookmark>().unwrap(), added);

        let response = client.get("/bookmarks").header(auth()).dispatch();
        assert_eq!(response.into_json::<Vec<Bookmark>>().unwrap(), vec![added]);
    }

    #[test]
    fn create_accepts_a_numeric_string_rating() {
        let client = test_client();
        let added = create(
            &client,
            &json!({"title": "t", "url": "https://x.com", "rating": "3"}),
        );
        assert_eq!(added.rating, 3);
        assert_eq!(added.description, "");
    }

    #[test]
    fn create_reports_the_first_missing_field() {
        let client = test_client();
        let cases = [
            (json!({}), "Missing 'title' in request body"),
            (json!({"title": "t"}), "Missing 'url' in request body"),
            (
                json!({"title": "t", "url": "https://x.com"}),
                "Missing 'rating' in request body",
            ),
        ];
        for (payload, message) in cases {
            let response = client
                .post("/bookmarks")
                .header(auth())
                .json(&payload)
                .dispatch();
            assert_eq!(response.status(), Status::BadRequest);
            let body: Value = response.into_json().unwrap();
            assert_eq!(body["error"]["message"], message);
        }
    }

    #[test]
    fn create_rejects_bad_rating_and_url() {
        let client = test_client();

        for rating in [json!(10), json!(-1), json!("ten"), json!(2.5)] {
            let response = client
                .post("/bookmarks")
                .header(auth())
                .json(&json!({"title": "t", "url": "https://x.com", "rating": rating}))
                .dispatch();
            assert_eq!(response.status(), Status::BadRequest);
            let body: Value = response.into_json().unwrap();
            assert_eq!(body["error"]["message"], "'Rating' must be between 0 and 5");
        }

        let response = client
            .post("/bookmarks")
            .header(auth())
            .json(&json!({"title": "t", "url": "htp://invalid url", "rating": 1}))
            .dispatch();
        assert_eq!(response.status(), Status::BadRequest);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body["error"]["message"], "'url' must be a valid URL");
    }

    #[test]
    fn responses_are_sanitized_but_storage_is_not_double_escaped() {
        let client = test_client();
        let added = create(
            &client,
            &json!({
                "title": "Malicious <script>alert(\"xss\")</script>",
                "url": "https://evil.example.com/?a=1&b=2",
                "rating": 1,
                "description": "<img src=x onerror='steal()'> & more"
            }),
        );

        assert_eq!(
            added.title,
            "Malicious &lt;script&gt;alert(&quot;xss&quot;)&lt;/script&gt;"
        );
        assert_eq!(
            added.description,
            "&lt;img src=x onerror=&#39;steal()&#39;&gt; &amp; more"
        );
        // url passes through untouched
        assert_eq!(added.url, "https://evil.example.com/?a=1&b=2");

        // sanitization happens at the boundary on every read, idempotently
        for _ in 0..2 {
            let response = client
                .get(format!("/bookmarks/{}", added.id))
                .header(auth())
                .dispatch();
            assert_eq!(response.status(), Status::Ok);
            assert_eq!(response.into_json::<Bookmark>().unwrap(), added);
        }

        let listed = client
            .get("/bookmarks")
            .header(auth())
            .dispatch()
            .into_json::<Vec<Bookmark>>()
            .unwrap();
        assert_eq!(listed, vec![added]);
    }

    #[test]
    fn get_missing_bookmark_is_404() {
        let client = test_client();
        let response = client.get("/bookmarks/123456").header(auth()).dispatch();
        assert_eq!(response.status(), Status::NotFound);
        assert_eq!(
            response.into_string().unwrap(),
            r#"{"error":{"message":"Bookmark Not Found"}}"#
        );
    }

    #[test]
    fn patch_updates_only_supplied_fields() {
        let client = test_client();
        let added = create(&client, &sample_payload());

        let response = client
            .patch(format!("/bookmarks/{}", added.id))
            .header(auth())
            .json(&json!({"rating": 1}))
            .dispatch();
        assert_eq!(response.status(), Status::NoContent);

        let updated = client
            .get(format!("/bookmarks/{}", added.id))
            .header(auth())
            .dispatch()
            .into_json::<Bookmark>()
            .unwrap();
        assert_eq!(updated.rating, 1);
        assert_eq!(updated.title, added.title);
        assert_eq!(updated.url, added.url);
        assert_eq!(updated.description, added.description);
    }

    #[test]
    fn patch_requires_a_recognized_field() {
        let client = test_client();
        let added = create(&client, &sample_payload());

        for payload in [json!({}), json!({"description": "only"})] {
            let response = client
                .patch(format!("/bookmarks/{}", added.id))
                .header(auth())
                .json(&payload)
                .dispatch();
            assert_eq!(response.status(), Status::BadRequest);
            let body: Value = response.into_json().unwrap();
            assert_eq!(
                body["error"]["message"],
                "Request body must contain either 'title', 'url', or 'rating'"
            );
        }
    }

    #[test]
    fn patch_missing_bookmark_is_404() {
        let client = test_client();
        let response = client
            .patch("/bookmarks/99999999")
            .header(auth())
            .json(&json!({"title": "new"}))
            .dispatch();
        assert_eq!(response.status(), Status::NotFound);
    }

    #[test]
    fn delete_then_get_is_404() {
        let client = test_client();
        let added = create(&client, &sample_payload());

        let response = client
            .delete(format!("/bookmarks/{}", added.id))
            .header(auth())
            .dispatch();
        assert_eq!(response.status(), Status::NoContent);

        let response = client
            .get(format!("/bookmarks/{}", added.id))
            .header(auth())
            .dispatch();
        assert_eq!(response.status(), Status::NotFound);

        let response = client
            .delete(format!("/bookmarks/{}", added.id))
            .header(auth())
            .dispatch();
        assert_eq!(response.status(), Status::NotFound);
    }
}
