//! In-flight request accounting for the diagnostics endpoints

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;

/// Counters shared by every worker
#[derive(Debug, Default)]
pub struct InFlightTracker {
    in_flight: AtomicUsize,
    served: AtomicU64,
}

impl InFlightTracker {
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Requests finished since startup, including failed and cancelled ones
    pub fn served(&self) -> u64 {
        self.served.load(Ordering::Relaxed)
    }

    fn enter(self: &Arc<Self>) -> InFlightGuard {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        InFlightGuard {
            tracker: Arc::clone(self),
        }
    }
}

/// Decrements on drop, so panics and dropped connections are counted too
struct InFlightGuard {
    tracker: Arc<InFlightTracker>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.tracker.in_flight.fetch_sub(1, Ordering::Relaxed);
        self.tracker.served.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Clone)]
pub struct InFlight {
    tracker: Arc<InFlightTracker>,
}

impl InFlight {
    pub fn new(tracker: Arc<InFlightTracker>) -> Self {
        Self { tracker }
    }
}

impl<S, B> Transform<S, ServiceRequest> for InFlight
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = InFlightMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(InFlightMiddleware {
            service: Rc::new(service),
            tracker: Arc::clone(&self.tracker),
        }))
    }
}

pub struct InFlightMiddleware<S> {
    service: Rc<S>,
    tracker: Arc<InFlightTracker>,
}

impl<S, B> Service<ServiceRequest> for InFlightMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let guard = self.tracker.enter();
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await;
            drop(guard);
            res
        })
    }
}
