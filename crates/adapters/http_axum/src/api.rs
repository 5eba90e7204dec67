//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod invocations;
#[allow(clippy::missing_errors_doc)]
pub mod rules;

use axum::Router;
use axum::routing::get;
use chrono::TimeZone;

use offhours_app::ports::{DecisionLog, Ec2Provider, HolidaySource, LightsailProvider};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<H, E, L, D, Tz>() -> Router<AppState<H, E, L, D, Tz>>
where
    H: HolidaySource + Send + Sync + 'static,
    E: Ec2Provider + Send + Sync + 'static,
    L: LightsailProvider + Send + Sync + 'static,
    D: DecisionLog + Send + Sync + 'static,
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Send + Sync,
{
    Router::new()
        .route("/rules", get(rules::list::<H, E, L, D, Tz>))
        .route(
            "/invocations",
            get(invocations::list::<H, E, L, D, Tz>).post(invocations::invoke::<H, E, L, D, Tz>),
        )
        .route("/invocations/{id}", get(invocations::get::<H, E, L, D, Tz>))
}
