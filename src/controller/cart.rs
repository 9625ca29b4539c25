use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    controller::util::current_user::require_user,
    error::Error,
    model::{
        api::ErrorDto,
        app::AppState,
        cart::{AddCartItemDto, CartDto, UpdateCartItemDto},
    },
    service::cart::CartService,
};

pub static CART_TAG: &str = "cart";

/// Get the current user's open cart
#[utoipa::path(
    get,
    path = "/api/cart",
    tag = CART_TAG,
    responses(
        (status = 200, description = "Current cart", body = CartDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_cart(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let cart_service = CartService::new(&state.db);
    let cart = cart_service.get_cart(user.id).await?;

    Ok((StatusCode::OK, Json(cart)))
}

/// Add a variant to the cart
#[utoipa::path(
    post,
    path = "/api/cart/items",
    tag = CART_TAG,
    request_body = AddCartItemDto,
    responses(
        (status = 200, description = "Updated cart", body = CartDto),
        (status = 404, description = "Variant not found", body = ErrorDto),
        (status = 409, description = "Not enough stock", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_item(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<AddCartItemDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let cart_service = CartService::new(&state.db);
    let cart = cart_service.add_item(user.id, dto).await?;

    Ok((StatusCode::OK, Json(cart)))
}

/// Change a cart line's quantity; zero removes the line
#[utoipa::path(
    put,
    path = "/api/cart/items/{item_id}",
    tag = CART_TAG,
    params(("item_id" = Uuid, Path, description = "Cart item ID")),
    request_body = UpdateCartItemDto,
    responses(
        (status = 200, description = "Updated cart", body = CartDto),
        (status = 404, description = "Cart item not found", body = ErrorDto),
        (status = 409, description = "Not enough stock", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<Uuid>,
    Json(dto): Json<UpdateCartItemDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let cart_service = CartService::new(&state.db);
    let cart = cart_service.update_item(user.id, item_id, dto).await?;

    Ok((StatusCode::OK, Json(cart)))
}

/// Remove a line from the cart
#[utoipa::path(
    delete,
    path = "/api/cart/items/{item_id}",
    tag = CART_TAG,
    params(("item_id" = Uuid, Path, description = "Cart item ID")),
    responses(
        (status = 200, description = "Updated cart", body = CartDto),
        (status = 404, description = "Cart item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let cart_service = CartService::new(&state.db);
    let cart = cart_service.remove_item(user.id, item_id).await?;

    Ok((StatusCode::OK, Json(cart)))
}

/// Remove every line from the cart
#[utoipa::path(
    delete,
    path = "/api/cart",
    tag = CART_TAG,
    responses(
        (status = 200, description = "Emptied cart", body = CartDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let cart_service = CartService::new(&state.db);
    let cart = cart_service.clear(user.id).await?;

    Ok((StatusCode::OK, Json(cart)))
}
