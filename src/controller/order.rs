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
        order::{OrderDto, PlaceOrderDto, UpdateOrderStatusDto},
    },
    service::order::OrderService,
};

pub static ORDER_TAG: &str = "order";

/// Place an order from the current cart
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = ORDER_TAG,
    request_body = PlaceOrderDto,
    responses(
        (status = 201, description = "Order placed", body = OrderDto),
        (status = 400, description = "Empty cart or invalid promo", body = ErrorDto),
        (status = 409, description = "Not enough stock or promo already redeemed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<PlaceOrderDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let order_service = OrderService::new(&state.db, &state.gateway);
    let order = order_service.place_order(user.id, dto).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// List the current user's orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = ORDER_TAG,
    responses(
        (status = 200, description = "Orders, newest first", body = Vec<OrderDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_orders(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let order_service = OrderService::new(&state.db, &state.gateway);
    let orders = order_service.list_orders_for_user(user.id).await?;

    Ok((StatusCode::OK, Json(orders)))
}

/// List all orders in a status (staff)
#[utoipa::path(
    get,
    path = "/api/orders/status/{status}",
    tag = ORDER_TAG,
    params(("status" = String, Path, description = "Order status")),
    responses(
        (status = 200, description = "Orders in the status", body = Vec<OrderDto>),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_orders_by_status(
    State(state): State<AppState>,
    session: Session,
    Path(status): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let order_service = OrderService::new(&state.db, &state.gateway);
    let orders = order_service.list_orders_by_status(&status).await?;

    Ok((StatusCode::OK, Json(orders)))
}

/// Get an order with its lines
#[utoipa::path(
    get,
    path = "/api/orders/{order_id}",
    tag = ORDER_TAG,
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found", body = OrderDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_order(
    State(state): State<AppState>,
    session: Session,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    let staff = is_staff(&user)?;

    let order_service = OrderService::new(&state.db, &state.gateway);
    let order = order_service.get_order(order_id, user.id, staff).await?;

    Ok((StatusCode::OK, Json(order)))
}

/// Move an order to a new status (staff)
#[utoipa::path(
    put,
    path = "/api/orders/{order_id}/status",
    tag = ORDER_TAG,
    params(("order_id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatusDto,
    responses(
        (status = 200, description = "Order updated", body = OrderDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 409, description = "Illegal status transition", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    session: Session,
    Path(order_id): Path<Uuid>,
    Json(dto): Json<UpdateOrderStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let order_service = OrderService::new(&state.db, &state.gateway);
    let order = order_service.update_status(order_id, &dto.status).await?;

    Ok((StatusCode::OK, Json(order)))
}

/// Cancel an order, restocking it and refunding any captured payment
#[utoipa::path(
    post,
    path = "/api/orders/{order_id}/cancel",
    tag = ORDER_TAG,
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = OrderDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 409, description = "Order can no longer be cancelled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    session: Session,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    let staff = is_staff(&user)?;

    let order_service = OrderService::new(&state.db, &state.gateway);
    let order = order_service.cancel_order(order_id, user.id, staff).await?;

    Ok((StatusCode::OK, Json(order)))
}
