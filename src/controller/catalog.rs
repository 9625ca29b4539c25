use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    controller::util::current_user::{maybe_user, require_staff, require_user},
    error::Error,
    model::{
        api::ErrorDto,
        app::AppState,
        catalog::{
            AdjustStockDto, CreateProductDto, ProductDto, ProductListQuery, UpdateProductDto,
            VariantDto,
        },
    },
    service::catalog::CatalogService,
};

pub static CATALOG_TAG: &str = "catalog";

/// Create a product with its variants (staff)
#[utoipa::path(
    post,
    path = "/api/catalog/products",
    tag = CATALOG_TAG,
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ProductDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 409, description = "SKU already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_product(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateProductDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let catalog_service = CatalogService::new(&state.db);
    let product = catalog_service.create_product(dto).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// List products, filtered by category or name
#[utoipa::path(
    get,
    path = "/api/catalog/products",
    tag = CATALOG_TAG,
    params(ProductListQuery),
    responses(
        (status = 200, description = "Matching products", body = Vec<ProductDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_products(
    State(state): State<AppState>,
    session: Session,
    Query(mut query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, Error> {
    // Inactive products are staff-only
    if query.include_inactive.unwrap_or(false) {
        let staff = match maybe_user(&session, &state.db).await? {
            Some(user) => crate::controller::util::current_user::is_staff(&user)?,
            None => false,
        };

        if !staff {
            query.include_inactive = Some(false);
        }
    }

    let catalog_service = CatalogService::new(&state.db);
    let products = catalog_service.list_products(query).await?;

    Ok((StatusCode::OK, Json(products)))
}

/// Get a product with its variants
#[utoipa::path(
    get,
    path = "/api/catalog/products/{product_id}",
    tag = CATALOG_TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let catalog_service = CatalogService::new(&state.db);
    let product = catalog_service.get_product(product_id).await?;

    Ok((StatusCode::OK, Json(product)))
}

/// Update a product's name, description, price, or active flag (staff)
#[utoipa::path(
    put,
    path = "/api/catalog/products/{product_id}",
    tag = CATALOG_TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_product(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<Uuid>,
    Json(dto): Json<UpdateProductDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let catalog_service = CatalogService::new(&state.db);
    let product = catalog_service.update_product(product_id, dto).await?;

    Ok((StatusCode::OK, Json(product)))
}

/// Apply a signed stock adjustment to a variant (staff)
#[utoipa::path(
    put,
    path = "/api/catalog/variants/{variant_id}/stock",
    tag = CATALOG_TAG,
    params(("variant_id" = Uuid, Path, description = "Variant ID")),
    request_body = AdjustStockDto,
    responses(
        (status = 200, description = "Stock adjusted", body = VariantDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Variant not found", body = ErrorDto),
        (status = 409, description = "Adjustment would underflow", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn adjust_stock(
    State(state): State<AppState>,
    session: Session,
    Path(variant_id): Path<Uuid>,
    Json(dto): Json<AdjustStockDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let catalog_service = CatalogService::new(&state.db);
    let variant = catalog_service.adjust_stock(variant_id, dto).await?;

    Ok((StatusCode::OK, Json(variant)))
}
