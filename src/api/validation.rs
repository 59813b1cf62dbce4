//! Payload validation. Every wire field is an `Option` so presence is our
//! check, not serde's, and the client sees the field-specific message
//! instead of a deserialization error.
//!
//! Checks run in a fixed order and short-circuit on the first failure:
//! presence of `title`, `url`, `rating` (create only), then `rating`
//! well-formedness and range, then `url` well-formedness.

use rocket::serde::json::Value;
use rocket::serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::db::bookmark::{BookmarkChanges, NewBookmark};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing '{0}' in request body")]
    MissingField(&'static str),
    #[error("'Rating' must be between 0 and 5")]
    RatingOutOfRange,
    #[error("'url' must be a valid URL")]
    InvalidUrl,
    #[error("Request body must contain either 'title', 'url', or 'rating'")]
    NoKnownFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateBookmark {
    pub title: Option<String>,
    pub url: Option<String>,
    // Kept loose on purpose: ratings arrive as numbers or numeric strings.
    pub rating: Option<Value>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct UpdateBookmark {
    pub title: Option<String>,
    pub url: Option<String>,
    pub rating: Option<Value>,
    pub description: Option<String>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

fn supplied(field: &Option<Value>) -> Option<&Value> {
    field.as_ref().filter(|v| !v.is_null())
}

/// Strict coercion first, range check second: a JSON integer or a string
/// holding one is accepted, everything else fails with the range message.
fn coerce_rating(value: &Value) -> Result<i32, ValidationError> {
    let rating = match value {
        Value::Number(n) => n.as_i64().ok_or(ValidationError::RatingOutOfRange)?,
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::RatingOutOfRange)?,
        _ => return Err(ValidationError::RatingOutOfRange),
    };
    if (0..=5).contains(&rating) {
        Ok(rating as i32)
    } else {
        Err(ValidationError::RatingOutOfRange)
    }
}

fn check_url(raw: &str) -> Result<(), ValidationError> {
    let parsed = Url::parse(raw).map_err(|_| ValidationError::InvalidUrl)?;
    if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
        return Err(ValidationError::InvalidUrl);
    }
    Ok(())
}

pub fn validate_create(payload: &CreateBookmark) -> Result<NewBookmark, ValidationError> {
    let title = present(&payload.title).ok_or(ValidationError::MissingField("title"))?;
    let url = present(&payload.url).ok_or(ValidationError::MissingField("url"))?;
    let rating = supplied(&payload.rating).ok_or(ValidationError::MissingField("rating"))?;

    let rating = coerce_rating(rating)?;
    check_url(url)?;

    Ok(NewBookmark {
        title: title.to_string(),
        url: url.to_string(),
        rating,
        description: payload.description.clone().unwrap_or_default(),
    })
}

pub fn validate_update(payload: &UpdateBookmark) -> Result<BookmarkChanges, ValidationError> {
    let title = present(&payload.title);
    let url = present(&payload.url);
    let rating = supplied(&payload.rating);

    // `description` rides along but does not count as a recognized field.
    if title.is_none() && url.is_none() && rating.is_none() {
        return Err(ValidationError::NoKnownFields);
    }

    let rating = match rating {
        Some(value) => Some(coerce_rating(value)?),
        None => None,
    };
    if let Some(url) = url {
        check_url(url)?;
    }

    Ok(BookmarkChanges {
        title: title.map(str::to_string),
        url: url.map(str::to_string),
        rating,
        description: payload.description.clone(),
    })
}
