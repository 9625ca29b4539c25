use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    controller::util::current_user::{is_staff, require_staff, require_user},
    error::Error,
    model::{
        api::ErrorDto,
        app::AppState,
        payment::{CreatePlanDto, PaymentDto, PlanDto},
    },
    service::payment::PaymentService,
};

pub static PAYMENT_TAG: &str = "payment";

/// Capture the payment for a pending order
#[utoipa::path(
    post,
    path = "/api/orders/{order_id}/payment",
    tag = PAYMENT_TAG,
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Payment captured (idempotent)", body = PaymentDto),
        (status = 402, description = "Payment declined", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 409, description = "Order not payable", body = ErrorDto),
        (status = 502, description = "Payment gateway unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn capture_payment(
    State(state): State<AppState>,
    session: Session,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    let staff = is_staff(&user)?;

    let payment_service = PaymentService::new(&state.db, &state.gateway);
    let payment = payment_service
        .capture_order_payment(order_id, user.id, staff)
        .await?;

    Ok((StatusCode::OK, Json(payment)))
}

/// Refund an order's captured payment in full (staff)
#[utoipa::path(
    post,
    path = "/api/orders/{order_id}/payment/refund",
    tag = PAYMENT_TAG,
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Payment refunded", body = PaymentDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "No captured payment for order", body = ErrorDto),
        (status = 502, description = "Payment gateway unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refund_payment(
    State(state): State<AppState>,
    session: Session,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let payment_service = PaymentService::new(&state.db, &state.gateway);
    let payment = payment_service.refund_order_payment(order_id).await?;

    Ok((StatusCode::OK, Json(payment)))
}

/// Create a buy-now-pay-later plan for a pending order
#[utoipa::path(
    post,
    path = "/api/orders/{order_id}/plan",
    tag = PAYMENT_TAG,
    params(("order_id" = Uuid, Path, description = "Order ID")),
    request_body = CreatePlanDto,
    responses(
        (status = 201, description = "Plan created", body = PlanDto),
        (status = 400, description = "Invalid installment count", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 409, description = "Plan already exists or order not payable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_plan(
    State(state): State<AppState>,
    session: Session,
    Path(order_id): Path<Uuid>,
    Json(dto): Json<CreatePlanDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let payment_service = PaymentService::new(&state.db, &state.gateway);
    let plan = payment_service.create_plan(order_id, user.id, dto).await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// Get an order's payment plan with its installments
#[utoipa::path(
    get,
    path = "/api/orders/{order_id}/plan",
    tag = PAYMENT_TAG,
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Plan found", body = PlanDto),
        (status = 404, description = "Order or plan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_plan(
    State(state): State<AppState>,
    session: Session,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let payment_service = PaymentService::new(&state.db, &state.gateway);
    let plan = payment_service.get_plan(order_id, user.id).await?;

    Ok((StatusCode::OK, Json(plan)))
}

/// Pay a single installment of a payment plan
#[utoipa::path(
    post,
    path = "/api/installments/{installment_id}/pay",
    tag = PAYMENT_TAG,
    params(("installment_id" = Uuid, Path, description = "Installment ID")),
    responses(
        (status = 200, description = "Installment paid", body = PlanDto),
        (status = 402, description = "Payment declined", body = ErrorDto),
        (status = 404, description = "Installment not found", body = ErrorDto),
        (status = 409, description = "Installment already paid", body = ErrorDto),
        (status = 502, description = "Payment gateway unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn pay_installment(
    State(state): State<AppState>,
    session: Session,
    Path(installment_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let payment_service = PaymentService::new(&state.db, &state.gateway);
    let plan = payment_service
        .pay_installment(installment_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(plan)))
}
