//! Role gate
//!
//! One generic gate parameterised by the single role a route accepts. It
//! must run after [`JwtAuth`](super::auth::JwtAuth); a request without an
//! authentication context is rejected rather than let through.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use hc_core::Role;

use super::auth::AuthContext;
use crate::handlers::error::ApiError;

/// Middleware factory admitting only callers with exactly `role`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequireRole {
    role: Role,
}

impl RequireRole {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn user() -> Self {
        Self::new(Role::User)
    }

    pub fn doctor() -> Self {
        Self::new(Role::Doctor)
    }

    pub fn pharmacy_manager() -> Self {
        Self::new(Role::PharmacyManager)
    }

    pub fn admin() -> Self {
        Self::new(Role::Admin)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Decide on an optional context. Absent context fails closed.
    pub fn check(&self, context: Option<&AuthContext>) -> Result<(), ApiError> {
        match context {
            None => Err(ApiError::Forbidden("Authentication context missing".to_string())),
            Some(ctx) if ctx.role != self.role => Err(ApiError::Forbidden(format!(
                "This route requires the {} role",
                self.role
            ))),
            Some(_) => Ok(()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            gate: *self,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    gate: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let verdict = self.gate.check(req.extensions().get::<AuthContext>());
        if let Err(err) = verdict {
            log::debug!("forbidden {} {}: {}", req.method(), req.path(), err);
            return Box::pin(ready(Ok(req.error_response(err).map_into_right_body())));
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
