use rocket::serde::json::Json;
use rocket::serde::Serialize;

use super::validation::ValidationError;

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorBody {
    pub error: ErrorMessage,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorBody {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            error: ErrorMessage {
                message: message.into(),
            },
        })
    }
}

#[derive(Responder)]
pub enum Error {
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<ErrorBody>),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<ErrorBody>),
    #[response(status = 500, content_type = "json")]
    Internal(Json<ErrorBody>),
}

impl Error {
    pub fn not_found() -> Self {
        Error::NotFound(ErrorBody::new("Bookmark Not Found"))
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        tracing::warn!("Rejected bookmark payload: {}", e);
        Error::BadRequest(ErrorBody::new(e.to_string()))
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        tracing::error!("Storage failure: {:?}", e);
        let message = if cfg!(debug_assertions) {
            e.to_string()
        } else {
            "server error".to_string()
        };
        Error::Internal(ErrorBody::new(message))
    }
}

// 401 responses come out of the `Auth` guard, which cannot attach a body.
// The original wire format is flat here, not nested under `message`.
#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct AuthErrorBody {
    pub error: String,
}

#[catch(401)]
fn unauthorized() -> Json<AuthErrorBody> {
    Json(AuthErrorBody {
        error: "Unauthorized request".to_string(),
    })
}

#[catch(400)]
fn bad_request() -> Json<ErrorBody> {
    ErrorBody::new("Bad Request")
}

#[catch(404)]
fn not_found() -> Json<ErrorBody> {
    ErrorBody::new("Not Found")
}

// Bodies rejected by serde before validation runs.
#[catch(422)]
fn unprocessable() -> Json<ErrorBody> {
    ErrorBody::new("Malformed request body")
}

#[catch(500)]
fn internal_server_error() -> Json<ErrorBody> {
    ErrorBody::new("server error")
}

pub fn catchers() -> Vec<rocket::Catcher> {
    catchers![
        unauthorized,
        bad_request,
        not_found,
        unprocessable,
        internal_server_error
    ]
}
