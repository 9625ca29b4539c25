use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CartDto {
    pub id: Uuid,
    pub items: Vec<CartItemDto>,
    /// Sum of line totals, two decimal places.
    pub subtotal: Decimal,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CartItemDto {
    pub id: Uuid,
    pub variant_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AddCartItemDto {
    pub variant_id: Uuid,
    pub quantity: i32,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateCartItemDto {
    /// New quantity for the line; zero removes it.
    pub quantity: i32,
}
