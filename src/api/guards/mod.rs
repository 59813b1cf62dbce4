use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};

use crate::api::configs::Config;

pub struct Auth;

#[derive(Debug)]
pub enum AuthError {
    MissingConfig,
    MissingToken,
    InvalidToken,
}

/// Bearer-token gate. Guard failures carry no body in Rocket; the 401
/// catcher in `api::errors` renders the `Unauthorized request` response.
#[rocket::async_trait]
impl<'r> FromRequest<'r> for Auth {
    type Error = AuthError;

    async fn from_request(request: &'r rocket::Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(config) = request.rocket().state::<Config>() else {
            return Outcome::Error((Status::InternalServerError, AuthError::MissingConfig));
        };
        let Some(expected) = config.api_token.as_ref() else {
            // No token configured, the gate is disabled.
            return Outcome::Success(Auth);
        };

        let supplied = request
            .headers()
            .get_one("Authorization")
            .and_then(|header| header.strip_prefix("Bearer "));
        match supplied {
            Some(token) if token == expected => Outcome::Success(Auth),
            Some(_) => {
                tracing::error!("Unauthorized request to path: {}", request.uri().path());
                Outcome::Error((Status::Unauthorized, AuthError::InvalidToken))
            }
            None => {
                tracing::error!("Unauthorized request to path: {}", request.uri().path());
                Outcome::Error((Status::Unauthorized, AuthError::MissingToken))
            }
        }
    }
}
