use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrderDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub currency: String,
    pub ship_to_name: String,
    pub ship_to_address: String,
    pub items: Vec<OrderItemDto>,
    pub placed_at: NaiveDateTime,
    pub shipped_at: Option<NaiveDateTime>,
    pub delivered_at: Option<NaiveDateTime>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrderItemDto {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub size: String,
    pub color: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

impl From<entity::order_item::Model> for OrderItemDto {
    fn from(item: entity::order_item::Model) -> Self {
        Self {
            id: item.id,
            sku: item.sku,
            name: item.name,
            size: item.size,
            color: item.color,
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

impl OrderDto {
    /// Assembles the DTO from an order row and its item rows.
    pub fn from_models(
        order: entity::customer_order::Model,
        items: Vec<entity::order_item::Model>,
    ) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            status: order.status,
            subtotal: order.subtotal,
            discount: order.discount,
            total: order.total,
            currency: order.currency,
            ship_to_name: order.ship_to_name,
            ship_to_address: order.ship_to_address,
            items: items.into_iter().map(OrderItemDto::from).collect(),
            placed_at: order.placed_at,
            shipped_at: order.shipped_at,
            delivered_at: order.delivered_at,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PlaceOrderDto {
    pub ship_to_name: String,
    pub ship_to_address: String,
    /// Optional promo code applied at checkout.
    pub promo_code: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateOrderStatusDto {
    pub status: String,
}
