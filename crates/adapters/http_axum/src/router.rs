//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use chrono::TimeZone;
use tower_http::trace::TraceLayer;

use offhours_app::ports::{DecisionLog, Ec2Provider, HolidaySource, LightsailProvider};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and exposes `/health`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<H, E, L, D, Tz>(state: AppState<H, E, L, D, Tz>) -> Router
where
    H: HolidaySource + Send + Sync + 'static,
    E: Ec2Provider + Send + Sync + 'static,
    L: LightsailProvider + Send + Sync + 'static,
    D: DecisionLog + Send + Sync + 'static,
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Send + Sync,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
