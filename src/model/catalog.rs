use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProductDto {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Decimal,
    pub currency: String,
    pub active: bool,
    pub variants: Vec<VariantDto>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VariantDto {
    pub id: Uuid,
    pub size: String,
    pub color: String,
    pub stock_quantity: i32,
}

impl From<entity::product_variant::Model> for VariantDto {
    fn from(variant: entity::product_variant::Model) -> Self {
        Self {
            id: variant.id,
            size: variant.size,
            color: variant.color,
            stock_quantity: variant.stock_quantity,
        }
    }
}

impl ProductDto {
    /// Assembles the DTO from a product row and its variant rows.
    pub fn from_models(
        product: entity::product::Model,
        variants: Vec<entity::product_variant::Model>,
    ) -> Self {
        Self {
            id: product.id,
            sku: product.sku,
            name: product.name,
            description: product.description,
            category: product.category,
            price: product.price,
            currency: product.currency,
            active: product.active,
            variants: variants.into_iter().map(VariantDto::from).collect(),
            created_at: product.created_at,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateProductDto {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Decimal,
    pub currency: String,
    pub variants: Vec<CreateVariantDto>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateVariantDto {
    pub size: String,
    pub color: String,
    pub stock_quantity: i32,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateProductDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub active: Option<bool>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdjustStockDto {
    /// Signed adjustment applied to the variant's stock quantity.
    pub delta: i32,
}

#[derive(Clone, Deserialize, utoipa::IntoParams)]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    /// Include inactive products; staff listings only.
    pub include_inactive: Option<bool>,
}
