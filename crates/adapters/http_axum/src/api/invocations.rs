//! JSON handlers for scheduler invocations and their recorded reports.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use offhours_app::ports::{DecisionLog, Ec2Provider, HolidaySource, LightsailProvider};
use offhours_domain::error::{OffhoursError, ValidationError};
use offhours_domain::id::InvocationId;
use offhours_domain::report::InvocationReport;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for an on-demand invocation. Every field is optional and the
/// body itself may be omitted.
#[derive(Debug, Default, Deserialize)]
pub struct InvokeRequest {
    /// Evaluate as if it were this instant (RFC 3339, any offset).
    pub at: Option<DateTime<Utc>>,
    /// Overrides the configured dry-run mode.
    pub dry_run: Option<bool>,
}

/// Query string of the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// Possible responses from the invoke endpoint.
pub enum InvokeResponse {
    Ok(Json<InvocationReport>),
}

impl IntoResponse for InvokeResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<InvocationReport>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<InvocationReport>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/invocations`: run the scheduler and return its report.
pub async fn invoke<H, E, L, D, Tz>(
    State(state): State<AppState<H, E, L, D, Tz>>,
    body: Option<Json<InvokeRequest>>,
) -> Result<InvokeResponse, ApiError>
where
    H: HolidaySource + Send + Sync + 'static,
    E: Ec2Provider + Send + Sync + 'static,
    L: LightsailProvider + Send + Sync + 'static,
    D: DecisionLog + Send + Sync + 'static,
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Send + Sync,
{
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let at = request.at.unwrap_or_else(offhours_domain::time::now);
    let dry_run = request
        .dry_run
        .unwrap_or(state.scheduler.settings().dry_run);

    let report = state.scheduler.run_at(at, dry_run).await?;
    Ok(InvokeResponse::Ok(Json(report)))
}

/// `GET /api/invocations`: recent reports, newest first.
pub async fn list<H, E, L, D, Tz>(
    State(state): State<AppState<H, E, L, D, Tz>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    H: HolidaySource + Send + Sync + 'static,
    E: Ec2Provider + Send + Sync + 'static,
    L: LightsailProvider + Send + Sync + 'static,
    D: DecisionLog + Send + Sync + 'static,
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Send + Sync,
{
    let reports = state.reports.recent(query.limit).await?;
    Ok(ListResponse::Ok(Json(reports)))
}

/// `GET /api/invocations/{id}`: one report.
pub async fn get<H, E, L, D, Tz>(
    State(state): State<AppState<H, E, L, D, Tz>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    H: HolidaySource + Send + Sync + 'static,
    E: Ec2Provider + Send + Sync + 'static,
    L: LightsailProvider + Send + Sync + 'static,
    D: DecisionLog + Send + Sync + 'static,
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Send + Sync,
{
    let invocation_id = InvocationId::from_str(&id)
        .map_err(|_| OffhoursError::from(ValidationError::InvalidId(id)))?;
    let report = state.reports.get_report(invocation_id).await?;
    Ok(GetResponse::Ok(Json(report)))
}
