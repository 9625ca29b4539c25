use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use tower_sessions::Session;

use crate::{
    controller::util::current_user::{maybe_user, require_staff, require_user},
    error::Error,
    model::{
        analytics::{RecordEventDto, SalesDailyDto, SalesRangeQuery, TopProductDto},
        api::ErrorDto,
        app::AppState,
    },
    service::analytics::AnalyticsService,
};

pub static ANALYTICS_TAG: &str = "analytics";

/// Record a storefront event; works for anonymous visitors too
#[utoipa::path(
    post,
    path = "/api/analytics/events",
    tag = ANALYTICS_TAG,
    request_body = RecordEventDto,
    responses(
        (status = 202, description = "Event recorded"),
        (status = 400, description = "Unknown event kind", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn record_event(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<RecordEventDto>,
) -> Result<impl IntoResponse, Error> {
    let user = maybe_user(&session, &state.db).await?;

    let analytics_service = AnalyticsService::new(&state.db);
    analytics_service
        .record_event(user.map(|user| user.id), dto)
        .await?;

    Ok(StatusCode::ACCEPTED)
}

/// Get the daily sales rollup over a date range (staff)
#[utoipa::path(
    get,
    path = "/api/analytics/sales",
    tag = ANALYTICS_TAG,
    params(SalesRangeQuery),
    responses(
        (status = 200, description = "Daily sales rows", body = Vec<SalesDailyDto>),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_sales(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SalesRangeQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let analytics_service = AnalyticsService::new(&state.db);
    let rows = analytics_service.sales_summary(query.from, query.to).await?;

    Ok((StatusCode::OK, Json(rows)))
}

/// Get the best-selling products by units (staff)
#[utoipa::path(
    get,
    path = "/api/analytics/top-products",
    tag = ANALYTICS_TAG,
    responses(
        (status = 200, description = "Top products", body = Vec<TopProductDto>),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_top_products(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let analytics_service = AnalyticsService::new(&state.db);
    let top = analytics_service.top_products(10).await?;

    Ok((StatusCode::OK, Json(top)))
}

/// Rebuild the sales rollup for a day (staff)
#[utoipa::path(
    post,
    path = "/api/analytics/rollup/{day}",
    tag = ANALYTICS_TAG,
    params(("day" = NaiveDate, Path, description = "Day to roll up, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Rollup row", body = SalesDailyDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn run_rollup(
    State(state): State<AppState>,
    session: Session,
    Path(day): Path<NaiveDate>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let analytics_service = AnalyticsService::new(&state.db);
    let row = analytics_service.rollup_day(day).await?;

    Ok((StatusCode::OK, Json(row)))
}
