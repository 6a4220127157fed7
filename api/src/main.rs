use std::net::TcpListener;

use actix_web::web;
use anyhow::Context;
use log::{error, info, warn};

use hc_api::lifecycle::{self, LifecycleState, ShutdownOutcome};
use hc_api::AppState;
use hc_infra::AdminCredentials;
use hc_shared::Settings;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    lifecycle::transition(LifecycleState::Starting);

    let settings = Settings::from_env().map_err(|err| {
        error!("invalid configuration: {}", err);
        err
    })?;

    if settings.secrets.has_empty() {
        warn!("one or more token signing secrets are empty; tokens are trivially forgeable");
    }

    let grace = settings.server.grace_period();
    let bind_address = settings.server.bind_address();

    let state = AppState::build(settings);
    state
        .seed(AdminCredentials::from_env())
        .await
        .context("seeding reference data")?;

    warn!("/debug/pprof endpoints are served without authentication");

    let listener = TcpListener::bind(&bind_address)
        .with_context(|| format!("binding {}", bind_address))
        .map_err(|err| {
            error!("{:#}", err);
            err
        })?;
    info!("listening on {}", bind_address);

    let server = lifecycle::serve(web::Data::new(state), listener, grace)?;
    let shutdown = async {
        if let Err(err) = lifecycle::shutdown_signal().await {
            error!("{}", err);
        }
    };

    match lifecycle::run_until_shutdown(server, grace, shutdown).await? {
        ShutdownOutcome::Drained => info!("all requests drained"),
        ShutdownOutcome::TimedOut => warn!("shutdown forced after {}s", grace.as_secs()),
    }
    Ok(())
}
