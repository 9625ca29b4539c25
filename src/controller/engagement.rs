use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    controller::util::current_user::{require_staff, require_user},
    error::Error,
    model::{
        api::ErrorDto,
        app::AppState,
        engagement::{CreateReviewDto, ReviewDto, WishlistItemDto},
    },
    service::engagement::EngagementService,
};

pub static ENGAGEMENT_TAG: &str = "engagement";

/// Review a product, one review per user
#[utoipa::path(
    post,
    path = "/api/catalog/products/{product_id}/reviews",
    tag = ENGAGEMENT_TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = ReviewDto),
        (status = 400, description = "Rating outside 1..=5", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 409, description = "Review already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_review(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<Uuid>,
    Json(dto): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let engagement_service = EngagementService::new(&state.db);
    let review = engagement_service
        .create_review(user.id, product_id, dto)
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// List a product's published reviews
#[utoipa::path(
    get,
    path = "/api/catalog/products/{product_id}/reviews",
    tag = ENGAGEMENT_TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Published reviews, newest first", body = Vec<ReviewDto>),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let engagement_service = EngagementService::new(&state.db);
    let reviews = engagement_service.list_reviews(product_id).await?;

    Ok((StatusCode::OK, Json(reviews)))
}

/// Hide a review from the public listing (staff)
#[utoipa::path(
    put,
    path = "/api/reviews/{review_id}/unpublish",
    tag = ENGAGEMENT_TAG,
    params(("review_id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review unpublished", body = ReviewDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unpublish_review(
    State(state): State<AppState>,
    session: Session,
    Path(review_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let engagement_service = EngagementService::new(&state.db);
    let review = engagement_service.unpublish_review(review_id).await?;

    Ok((StatusCode::OK, Json(review)))
}

/// Add a product to the current user's wishlist
#[utoipa::path(
    post,
    path = "/api/wishlist/{product_id}",
    tag = ENGAGEMENT_TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product on wishlist", body = WishlistItemDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let engagement_service = EngagementService::new(&state.db);
    let item = engagement_service
        .add_to_wishlist(user.id, product_id)
        .await?;

    Ok((StatusCode::OK, Json(item)))
}

/// Remove a product from the current user's wishlist
#[utoipa::path(
    delete,
    path = "/api/wishlist/{product_id}",
    tag = ENGAGEMENT_TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product removed from wishlist"),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let engagement_service = EngagementService::new(&state.db);
    engagement_service
        .remove_from_wishlist(user.id, product_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the current user's wishlist
#[utoipa::path(
    get,
    path = "/api/wishlist",
    tag = ENGAGEMENT_TAG,
    responses(
        (status = 200, description = "Wishlist, newest first", body = Vec<WishlistItemDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_wishlist(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let engagement_service = EngagementService::new(&state.db);
    let items = engagement_service.list_wishlist(user.id).await?;

    Ok((StatusCode::OK, Json(items)))
}
