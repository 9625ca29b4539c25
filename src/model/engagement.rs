use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ReviewDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub rating: i32,
    pub body: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<entity::product_review::Model> for ReviewDto {
    fn from(review: entity::product_review::Model) -> Self {
        Self {
            id: review.id,
            product_id: review.product_id,
            rating: review.rating,
            body: review.body,
            created_at: review.created_at,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateReviewDto {
    /// Star rating, 1 through 5.
    pub rating: i32,
    pub body: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WishlistItemDto {
    pub product_id: Uuid,
    pub added_at: NaiveDateTime,
}

impl From<entity::wishlist_item::Model> for WishlistItemDto {
    fn from(item: entity::wishlist_item::Model) -> Self {
        Self {
            product_id: item.product_id,
            added_at: item.created_at,
        }
    }
}
