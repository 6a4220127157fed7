//! Middleware for standardizing error responses
//!
//! Inner services report failures in two ways: by returning a response that
//! carries an error (gate rejections, handler `Err`, extractor failures, the
//! route fallback) or by returning `Err` (recovered panics). Both are
//! rendered here into exactly one JSON body tagged with the request id.
//!
//! No `HttpRequest` clone may be held across the inner call: routing needs
//! unique ownership of the request to record path parameters.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;

use super::request_id::{RequestId, REQUEST_ID_HEADER};
use crate::handlers::error::ApiError;

pub struct ErrorHandlerMiddleware;

impl<S, B> Transform<S, ServiceRequest> for ErrorHandlerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorHandlerMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorHandlerMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct ErrorHandlerMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorHandlerMiddlewareService<S>
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
        let request_id = RequestId::of(req.request());
        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(res) => {
                    let Some(err) = res.response().error() else {
                        return Ok(res.map_into_left_body());
                    };

                    let api_error = ApiError::from_actix(err, res.status());
                    let mut rendered = render(&api_error, RequestId::of(res.request()));
                    copy_headers(res.headers(), rendered.headers_mut());
                    Ok(res.into_response(rendered).map_into_right_body())
                }
                Err(err) => {
                    // The request is gone, so the rendered body travels inside the error
                    let status = err.as_response_error().status_code();
                    let api_error = ApiError::from_actix(&err, status);
                    let mut rendered = render(&api_error, request_id.clone());
                    if let Some(value) = request_id.and_then(|id| HeaderValue::from_str(&id).ok()) {
                        rendered
                            .headers_mut()
                            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                    }
                    Err(InternalError::from_response(api_error, rendered).into())
                }
            }
        })
    }
}

fn render(error: &ApiError, request_id: Option<String>) -> HttpResponse {
    let status = error.status_code();
    if status.is_server_error() {
        log::error!("request {} failed: {}", request_id.as_deref().unwrap_or("-"), error);
    } else if status != StatusCode::NOT_FOUND {
        log::debug!("request {} rejected: {}", request_id.as_deref().unwrap_or("-"), error);
    }
    error.render(request_id)
}

/// Carry over headers set by inner layers, except those describing the old body
fn copy_headers(from: &HeaderMap, to: &mut HeaderMap) {
    for (name, value) in from.iter() {
        if name == CONTENT_TYPE || name == CONTENT_LENGTH || to.contains_key(name) {
            continue;
        }
        to.append(name.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{call_service, init_service, read_body_json, TestRequest};
    use actix_web::{web, App};

    async fn failing() -> Result<HttpResponse, ApiError> {
        Err(ApiError::Forbidden("nope".to_string()))
    }

    #[actix_web::test]
    async fn test_handler_error_is_rendered_once() {
        let app = init_service(
            App::new()
                .wrap(ErrorHandlerMiddleware)
                .route("/", web::get().to(failing)),
        )
        .await;

        let res = call_service(&app, TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = read_body_json(res).await;
        assert_eq!(body["error"], "FORBIDDEN");
        assert_eq!(body["message"], "nope");
    }

    #[test]
    fn test_copy_headers_skips_body_headers() {
        let mut from = HeaderMap::new();
        from.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        from.insert(
            HeaderName::from_static("access-control-allow-origin"),
            HeaderValue::from_static("*"),
        );
        let mut to = HeaderMap::new();
        to.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        copy_headers(&from, &mut to);
        assert_eq!(to.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(to.get("access-control-allow-origin").unwrap(), "*");
    }
}
