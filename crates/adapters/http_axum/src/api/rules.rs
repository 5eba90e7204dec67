//! JSON handler for the loaded rule set.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use chrono::TimeZone;

use offhours_app::ports::{DecisionLog, Ec2Provider, HolidaySource, LightsailProvider};
use offhours_domain::rule::Rule;

use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Rule>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/rules`: the rules the scheduler evaluates, in evaluation order.
pub async fn list<H, E, L, D, Tz>(State(state): State<AppState<H, E, L, D, Tz>>) -> ListResponse
where
    H: HolidaySource + Send + Sync + 'static,
    E: Ec2Provider + Send + Sync + 'static,
    L: LightsailProvider + Send + Sync + 'static,
    D: DecisionLog + Send + Sync + 'static,
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Send + Sync,
{
    ListResponse::Ok(Json(state.scheduler.rules().to_vec()))
}
