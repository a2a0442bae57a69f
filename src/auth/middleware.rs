use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::{AuthContext, TokenIssuer};

/// Resolves the caller's identity from the `Authorization` header.
///
/// Requests without the header, or with a token that fails verification,
/// continue anonymously; operations that need an identity reject them later.
/// A stale token therefore never blocks registration or login.
#[derive(Clone)]
pub struct AuthMiddleware {
    tokens: Rc<TokenIssuer>,
}

impl AuthMiddleware {
    pub fn new(tokens: TokenIssuer) -> Self {
        Self {
            tokens: Rc::new(tokens),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            tokens: Rc::clone(&self.tokens),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    tokens: Rc<TokenIssuer>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Accepts both "Bearer <token>" and a bare token.
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim().to_string())
            .filter(|value| !value.is_empty());

        let Some(token) = token else {
            return Box::pin(self.service.call(req));
        };

        match self.tokens.verify(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(AuthContext::from(claims));
            }
            Err(err) => {
                log::warn!("ignoring bearer token on {}: {}", req.path(), err);
            }
        }
        Box::pin(self.service.call(req))
    }
}
