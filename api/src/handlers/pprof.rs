//! Runtime diagnostics under `/debug/pprof`
//!
//! These endpoints are unauthenticated. They expose process figures only,
//! never request or account data.

use actix_web::web;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::response::{ok, ApiResult};
use crate::middleware::RequestId;
use crate::state::AppState;

const ENDPOINTS: [&str; 4] = ["profile", "heap", "block", "goroutine"];

#[derive(Debug, Serialize)]
struct Index {
    endpoints: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ProcessProfile {
    pid: u32,
    started_at: DateTime<Utc>,
    uptime_secs: u64,
}

#[derive(Debug, Serialize)]
struct HeapProfile {
    /// `None` where the platform does not report memory figures
    physical_bytes: Option<usize>,
    virtual_bytes: Option<usize>,
}

#[derive(Debug, Serialize)]
struct BlockProfile {
    in_flight: usize,
    served: u64,
}

#[derive(Debug, Serialize)]
struct TaskProfile {
    workers: usize,
    alive_tasks: usize,
}

pub async fn index(request_id: RequestId) -> ApiResult {
    let endpoints = ENDPOINTS
        .iter()
        .map(|name| format!("/debug/pprof/{name}"))
        .collect();
    ok(&request_id, Index { endpoints })
}

pub async fn profile(state: web::Data<AppState>, request_id: RequestId) -> ApiResult {
    ok(
        &request_id,
        ProcessProfile {
            pid: std::process::id(),
            started_at: state.diagnostics.started_at,
            uptime_secs: state.diagnostics.uptime().as_secs(),
        },
    )
}

pub async fn heap(request_id: RequestId) -> ApiResult {
    let usage = memory_stats::memory_stats();
    ok(
        &request_id,
        HeapProfile {
            physical_bytes: usage.map(|u| u.physical_mem),
            virtual_bytes: usage.map(|u| u.virtual_mem),
        },
    )
}

pub async fn block(state: web::Data<AppState>, request_id: RequestId) -> ApiResult {
    let tracker = &state.diagnostics.requests;
    ok(
        &request_id,
        BlockProfile {
            in_flight: tracker.in_flight(),
            served: tracker.served(),
        },
    )
}

/// Figures of the worker runtime serving this request
pub async fn goroutine(request_id: RequestId) -> ApiResult {
    let metrics = tokio::runtime::Handle::current().metrics();
    ok(
        &request_id,
        TaskProfile {
            workers: metrics.num_workers(),
            alive_tasks: metrics.num_alive_tasks(),
        },
    )
}
