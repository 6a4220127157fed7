//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the bearer token from the Authorization header,
//! verifies it as an access token, and injects the caller's identity into
//! the request. Refresh, verification and reset tokens are signed with
//! different secrets and never pass this check.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use hc_core::{
    domain::entities::token::{Claims, TokenPurpose},
    errors::{DomainError, TokenError},
    services::token::TokenService,
    Actor, Role,
};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use crate::handlers::error::ApiError;

/// Authenticated caller injected into requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Account ID from the `sub` claim
    pub account_id: Uuid,
    pub role: Role,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: &Claims) -> Result<Self, DomainError> {
        let account_id = Uuid::parse_str(&claims.sub).map_err(|_| DomainError::Token(TokenError::Invalid))?;
        Ok(Self {
            account_id,
            role: claims.role,
        })
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.account_id, self.role)
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    tokens: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let context = match authenticate(&self.tokens, &req) {
            Ok(context) => context,
            Err(reason) => {
                log::debug!("rejected {} {}: {}", req.method(), req.path(), reason);
                let res = req.error_response(ApiError::Unauthorized(reason));
                return Box::pin(ready(Ok(res.map_into_right_body())));
            }
        };

        // Inject auth context into request extensions
        req.extensions_mut().insert(context);
        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

fn authenticate(tokens: &TokenService, req: &ServiceRequest) -> Result<AuthContext, String> {
    let token = extract_bearer_token(req).ok_or_else(|| "Missing or invalid Authorization header".to_string())?;
    let claims = tokens
        .verify(TokenPurpose::Access, &token)
        .map_err(|e| format!("Token verification failed: {}", e))?;
    AuthContext::from_claims(&claims).map_err(|e| format!("Invalid token: {}", e))
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()).into());

        ready(result)
    }
}
