use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::AuthContext;

/// Extracts the caller's identity, if any, from request extensions.
///
/// `AuthMiddleware` inserts the `AuthContext` after verifying the bearer token.
/// Anonymous requests yield `MaybeAuthenticated(None)`; this extractor never fails.
#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<AuthContext>);

impl FromRequest for MaybeAuthenticated {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeAuthenticated(
            req.extensions().get::<AuthContext>().cloned(),
        )))
    }
}
