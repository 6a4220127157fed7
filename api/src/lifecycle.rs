//! Process lifecycle: serve until a shutdown signal, then drain within a
//! bounded grace period.

use std::fmt;
use std::future::Future;
use std::io;
use std::net::TcpListener;
use std::time::Duration;

use actix_web::dev::Server;
use actix_web::{web, HttpServer};
use thiserror::Error;
use tokio::signal;

use crate::app::create_app;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Starting,
    Serving,
    ShuttingDown,
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Starting => "starting",
            LifecycleState::Serving => "serving",
            LifecycleState::ShuttingDown => "shutting down",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// How the graceful stop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every in-flight request finished inside the grace period
    Drained,
    /// The grace period elapsed and remaining connections were force-closed
    TimedOut,
}

pub fn transition(state: LifecycleState) {
    log::info!("lifecycle: {}", state);
}

/// Build the HTTP server on an already bound listener
///
/// Signal handling is left to [`run_until_shutdown`].
pub fn serve(state: web::Data<AppState>, listener: TcpListener, grace: Duration) -> io::Result<Server> {
    let server = HttpServer::new(move || create_app(state.clone()))
        .disable_signals()
        .shutdown_timeout(grace.as_secs())
        .listen(listener)?
        .run();
    Ok(server)
}

/// Run `server` until `shutdown` resolves, then stop it gracefully
///
/// The stop is given `grace` to complete. A server that exits on its own
/// before `shutdown` resolves is reported as drained.
pub async fn run_until_shutdown<F>(server: Server, grace: Duration, shutdown: F) -> io::Result<ShutdownOutcome>
where
    F: Future<Output = ()>,
{
    let handle = server.handle();
    let mut running = actix_web::rt::spawn(server);
    transition(LifecycleState::Serving);

    tokio::select! {
        _ = shutdown => {}
        result = &mut running => {
            transition(LifecycleState::Stopped);
            result.map_err(io::Error::other)??;
            return Ok(ShutdownOutcome::Drained);
        }
    }

    transition(LifecycleState::ShuttingDown);
    let deadline = tokio::time::sleep(grace);
    tokio::pin!(deadline);
    let stop = handle.stop(true);
    tokio::pin!(stop);

    let outcome = tokio::select! {
        biased;
        _ = &mut deadline => ShutdownOutcome::TimedOut,
        _ = &mut stop => ShutdownOutcome::Drained,
    };
    if outcome == ShutdownOutcome::TimedOut {
        log::error!(
            "grace period of {}s elapsed with requests in flight, closing remaining connections",
            grace.as_secs()
        );
        stop.await;
    }

    running.await.map_err(io::Error::other)??;
    transition(LifecycleState::Stopped);
    Ok(outcome)
}

#[derive(Debug, Error)]
pub enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),
    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// Resolves on SIGINT or SIGTERM
pub async fn shutdown_signal() -> Result<(), ShutdownSignalError> {
    let ctrl_c = async { signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC) };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;
        Ok::<(), ShutdownSignalError>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<(), ShutdownSignalError>>();

    tokio::select! {
        result = ctrl_c => {
            result?;
            log::info!("SIGINT received");
        }
        result = terminate => {
            result?;
            log::info!("SIGTERM received");
        }
    }
    Ok(())
}
