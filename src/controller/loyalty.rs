use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    controller::util::current_user::{require_staff, require_user},
    error::Error,
    model::{
        api::ErrorDto,
        app::AppState,
        loyalty::{
            CreatePromoDto, LoyaltyAccountDto, LoyaltyTransactionDto, PromoCodeDto,
            RedeemPointsDto,
        },
    },
    service::{loyalty::LoyaltyService, promo::PromoService},
};

pub static LOYALTY_TAG: &str = "loyalty";

/// Get the current user's loyalty account
#[utoipa::path(
    get,
    path = "/api/loyalty/account",
    tag = LOYALTY_TAG,
    responses(
        (status = 200, description = "Loyalty account", body = LoyaltyAccountDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_account(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let loyalty_service = LoyaltyService::new(&state.db);
    let account = loyalty_service.get_account(user.id).await?;

    Ok((StatusCode::OK, Json(account)))
}

/// Get the current user's loyalty ledger
#[utoipa::path(
    get,
    path = "/api/loyalty/history",
    tag = LOYALTY_TAG,
    responses(
        (status = 200, description = "Ledger entries, newest first", body = Vec<LoyaltyTransactionDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_history(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let loyalty_service = LoyaltyService::new(&state.db);
    let history = loyalty_service.history(user.id).await?;

    Ok((StatusCode::OK, Json(history)))
}

/// Redeem loyalty points against a pending order
#[utoipa::path(
    post,
    path = "/api/loyalty/redeem",
    tag = LOYALTY_TAG,
    request_body = RedeemPointsDto,
    responses(
        (status = 200, description = "Points redeemed", body = LoyaltyAccountDto),
        (status = 400, description = "Balance too low or invalid amount", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 409, description = "Order not payable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn redeem_points(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<RedeemPointsDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let loyalty_service = LoyaltyService::new(&state.db);
    let account = loyalty_service
        .redeem_points(user.id, dto.order_id, dto.points)
        .await?;

    Ok((StatusCode::OK, Json(account)))
}

/// Create a promo code (staff)
#[utoipa::path(
    post,
    path = "/api/promos",
    tag = LOYALTY_TAG,
    request_body = CreatePromoDto,
    responses(
        (status = 201, description = "Promo code created", body = PromoCodeDto),
        (status = 400, description = "Invalid percent-off", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 409, description = "Code already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_promo(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreatePromoDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let promo_service = PromoService::new(&state.db);
    let promo = promo_service.create_code(dto).await?;

    Ok((StatusCode::CREATED, Json(promo)))
}

/// List promo codes (staff)
#[utoipa::path(
    get,
    path = "/api/promos",
    tag = LOYALTY_TAG,
    responses(
        (status = 200, description = "Promo codes, newest first", body = Vec<PromoCodeDto>),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_promos(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let promo_service = PromoService::new(&state.db);
    let promos = promo_service.list_codes().await?;

    Ok((StatusCode::OK, Json(promos)))
}
