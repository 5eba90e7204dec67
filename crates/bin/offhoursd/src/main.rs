//! # offhoursd: offhours daemon
//!
//! Composition root that wires all adapters together, runs the scheduler on
//! a fixed interval and serves the HTTP API.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file) and the schedule document
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the holiday client and the provider adapters
//! - Construct the scheduler and the report service, injecting adapters via
//!   port traits
//! - Trigger an invocation every `scheduler.tick_seconds`
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use offhours_adapter_holidays_http::HttpHolidaySource;
use offhours_adapter_http_axum::router;
use offhours_adapter_http_axum::state::AppState;
use offhours_adapter_storage_sqlite_sqlx::SqliteDecisionLog;
use offhours_adapter_virtual::VirtualFleet;
use offhours_app::scheduler::Scheduler;
use offhours_app::services::report_service::ReportService;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

type AppScheduler = Scheduler<
    HttpHolidaySource,
    Arc<VirtualFleet>,
    Arc<VirtualFleet>,
    Arc<SqliteDecisionLog>,
    chrono_tz::Tz,
>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let timezone = config.timezone()?;
    let rules = config.load_rules()?;

    // Database
    let db = offhours_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let log = Arc::new(SqliteDecisionLog::new(db.pool().clone()));

    // Upstreams
    let holidays = config.holiday_client().build()?;
    let fleet = VirtualFleet::from_seed(std::mem::take(&mut config.fleet));
    let fleet = Arc::new(if fleet.is_empty() {
        tracing::info!("no fleet configured, using the demo fleet");
        VirtualFleet::demo()
    } else {
        fleet
    });

    // Services
    let scheduler: Arc<AppScheduler> = Arc::new(
        Scheduler::new(
            holidays,
            Arc::clone(&fleet),
            Arc::clone(&fleet),
            Arc::clone(&log),
            timezone,
        )
        .with_rules(rules)?
        .with_settings(config.scheduler_settings()),
    );
    let reports = Arc::new(ReportService::new(log));

    tracing::info!(
        rules = scheduler.rules().len(),
        timezone = %timezone,
        tick_seconds = config.scheduler.tick_seconds,
        dry_run = config.scheduler.dry_run,
        "scheduler ready"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let trigger = tokio::spawn(run_periodically(
        Arc::clone(&scheduler),
        config.tick_interval(),
        shutdown_rx,
    ));

    // HTTP
    let app = router::build(AppState::new(scheduler, reports));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(address = %bind_addr, "offhoursd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("shutdown requested");
            // The trigger may already be gone if it panicked.
            let _ = shutdown_tx.send(true);
        })
        .await?;

    trigger.await?;
    tracing::info!("offhoursd exited cleanly");
    Ok(())
}

/// Run an invocation on every tick until shutdown is signalled.
///
/// An in-flight invocation is allowed to finish before the loop exits.
async fn run_periodically(
    scheduler: Arc<AppScheduler>,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                // Failures are already logged by the scheduler.
                if scheduler.run_now().await.is_err() {
                    tracing::debug!("periodic invocation aborted");
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    tracing::debug!("periodic trigger stopped");
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl_c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
