//! Declarative route table
//!
//! Every endpoint is declared once with its method, a `:name` style path and
//! the access policy it needs. [`register`] turns the table into actix
//! resources and wraps each route with its gates, authentication first.

mod table;

use std::fmt;
use std::sync::Arc;

use actix_web::http::Method;
use actix_web::{web, FromRequest, Handler, Responder, Route};
use hc_core::services::TokenService;
use hc_core::Role;

use crate::middleware::{JwtAuth, RequireRole};

pub use table::route_table;

/// Who may call an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any valid access token, whatever the role
    Authenticated,
    /// A valid access token carrying exactly this role
    Role(Role),
}

/// One middleware layer guarding a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Authenticate,
    RequireRole(Role),
}

impl Access {
    /// Gates in execution order
    pub fn gates(&self) -> Vec<Gate> {
        match self {
            Access::Public => Vec::new(),
            Access::Authenticated => vec![Gate::Authenticate],
            Access::Role(role) => vec![Gate::Authenticate, Gate::RequireRole(*role)],
        }
    }
}

impl Gate {
    fn apply(self, route: Route, tokens: &Arc<TokenService>) -> Route {
        match self {
            Gate::Authenticate => route.wrap(JwtAuth::new(Arc::clone(tokens))),
            Gate::RequireRole(role) => route.wrap(RequireRole::new(role)),
        }
    }
}

pub struct Endpoint {
    pub method: Method,
    /// Relative to the group prefix, `:name` placeholders
    pub path: &'static str,
    pub access: Access,
    route: Route,
}

impl Endpoint {
    pub fn new<F, Args>(method: Method, path: &'static str, access: Access, handler: F) -> Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        Self {
            route: web::method(method.clone()).to(handler),
            method,
            path,
            access,
        }
    }

    pub fn get<F, Args>(path: &'static str, access: Access, handler: F) -> Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        Self::new(Method::GET, path, access, handler)
    }

    pub fn post<F, Args>(path: &'static str, access: Access, handler: F) -> Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        Self::new(Method::POST, path, access, handler)
    }

    pub fn put<F, Args>(path: &'static str, access: Access, handler: F) -> Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        Self::new(Method::PUT, path, access, handler)
    }

    pub fn patch<F, Args>(path: &'static str, access: Access, handler: F) -> Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        Self::new(Method::PATCH, path, access, handler)
    }

    pub fn delete<F, Args>(path: &'static str, access: Access, handler: F) -> Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        Self::new(Method::DELETE, path, access, handler)
    }

    fn into_route(self, tokens: &Arc<TokenService>) -> Route {
        // The last wrap runs first, so apply the gates back to front
        self.access
            .gates()
            .into_iter()
            .rev()
            .fold(self.route, |route, gate| gate.apply(route, tokens))
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("access", &self.access)
            .finish()
    }
}

/// Endpoints sharing a path prefix. An empty prefix registers at the root.
#[derive(Debug)]
pub struct RouteGroup {
    pub prefix: &'static str,
    pub endpoints: Vec<Endpoint>,
}

impl RouteGroup {
    pub fn new(prefix: &'static str, endpoints: Vec<Endpoint>) -> Self {
        Self { prefix, endpoints }
    }

    /// `(method, full path, access)` of every endpoint, in registration order
    pub fn describe(&self) -> Vec<(Method, String, Access)> {
        self.endpoints
            .iter()
            .map(|e| (e.method.clone(), format!("{}{}", self.prefix, e.path), e.access))
            .collect()
    }
}

/// Convert `:name` placeholders to actix's `{name}`
pub fn to_actix_path(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("{{{name}}}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Register the groups. Routes sharing a path fall through on method
/// mismatch, so an unknown method reaches the default service.
pub fn register(cfg: &mut web::ServiceConfig, groups: Vec<RouteGroup>, tokens: &Arc<TokenService>) {
    for group in groups {
        if group.prefix.is_empty() {
            for endpoint in group.endpoints {
                let path = to_actix_path(endpoint.path);
                cfg.route(&path, endpoint.into_route(tokens));
            }
            continue;
        }

        let scope = group
            .endpoints
            .into_iter()
            .fold(web::scope(group.prefix), |scope, endpoint| {
                let path = to_actix_path(endpoint.path);
                scope.route(&path, endpoint.into_route(tokens))
            });
        cfg.service(scope);
    }
}

/// The application's full route table
pub fn configure(cfg: &mut web::ServiceConfig, tokens: &Arc<TokenService>) {
    register(cfg, route_table(), tokens);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_to_actix_path() {
        assert_eq!(to_actix_path("/ping"), "/ping");
        assert_eq!(to_actix_path("/:drug_id/pharmacies"), "/{drug_id}/pharmacies");
        assert_eq!(
            to_actix_path("/pharmacies/:pharmacy_id/drugs/:pharmacy_drug_id"),
            "/pharmacies/{pharmacy_id}/drugs/{pharmacy_drug_id}"
        );
        assert_eq!(to_actix_path("/"), "/");
        assert_eq!(to_actix_path(""), "");
    }

    #[test]
    fn test_gates_authenticate_first() {
        assert!(Access::Public.gates().is_empty());
        assert_eq!(Access::Authenticated.gates(), vec![Gate::Authenticate]);
        assert_eq!(
            Access::Role(Role::Admin).gates(),
            vec![Gate::Authenticate, Gate::RequireRole(Role::Admin)]
        );
    }

    #[test]
    fn test_route_table_has_no_duplicates() {
        let mut seen = HashSet::new();
        for group in route_table() {
            for (method, path, _) in group.describe() {
                assert!(seen.insert((method.clone(), path.clone())), "duplicate route {method} {path}");
            }
        }
    }

    #[test]
    fn test_guarded_routes_authenticate_first() {
        for group in route_table() {
            for (method, path, access) in group.describe() {
                let gates = access.gates();
                if access != Access::Public {
                    assert_eq!(gates.first(), Some(&Gate::Authenticate), "{method} {path}");
                }
            }
        }
    }

    #[test]
    fn test_group_prefixes_are_unique() {
        let groups = route_table();
        let prefixes: HashSet<_> = groups.iter().map(|g| g.prefix).collect();
        assert_eq!(prefixes.len(), groups.len());
    }

    #[test]
    fn test_sample_access_policies() {
        let table: Vec<_> = route_table().iter().flat_map(RouteGroup::describe).collect();
        let access_of = |method: Method, path: &str| {
            table
                .iter()
                .find(|(m, p, _)| *m == method && p == path)
                .map(|(_, _, access)| *access)
        };

        assert_eq!(access_of(Method::GET, "/ping"), Some(Access::Public));
        assert_eq!(access_of(Method::GET, "/users/profile"), Some(Access::Role(Role::User)));
        assert_eq!(access_of(Method::GET, "/chat-rooms"), Some(Access::Authenticated));
        assert_eq!(
            access_of(Method::POST, "/managers/stock-mutations"),
            Some(Access::Role(Role::PharmacyManager))
        );
        assert_eq!(
            access_of(Method::PATCH, "/orders/:order_id/confirm-payment"),
            Some(Access::Role(Role::Admin))
        );
        assert_eq!(access_of(Method::GET, "/debug/pprof/heap"), Some(Access::Public));
    }
}
