use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Kind of a recorded analytics event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A storefront page was viewed.
    PageView,
    /// A product detail page was viewed.
    ProductView,
    /// An item was added to a cart.
    AddToCart,
    /// An order was placed.
    Purchase,
}

impl EventKind {
    /// String form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PageView => "page_view",
            Self::ProductView => "product_view",
            Self::AddToCart => "add_to_cart",
            Self::Purchase => "purchase",
        }
    }
}

impl FromStr for EventKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page_view" => Ok(Self::PageView),
            "product_view" => Ok(Self::ProductView),
            "add_to_cart" => Ok(Self::AddToCart),
            "purchase" => Ok(Self::Purchase),
            _ => Err(Error::ParseError(format!("Unknown event kind: {:?}", s))),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecordEventDto {
    pub kind: String,
    pub product_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SalesDailyDto {
    pub day: NaiveDate,
    pub order_count: i64,
    pub units_sold: i64,
    pub revenue: Decimal,
}

impl From<entity::sales_daily::Model> for SalesDailyDto {
    fn from(row: entity::sales_daily::Model) -> Self {
        Self {
            day: row.day,
            order_count: row.order_count,
            units_sold: row.units_sold,
            revenue: row.revenue,
        }
    }
}

#[derive(Clone, Deserialize, utoipa::IntoParams)]
pub struct SalesRangeQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TopProductDto {
    pub sku: String,
    pub name: String,
    pub units_sold: i64,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::EventKind;

    /// Expect every event kind to round-trip through its string form
    #[test]
    fn event_kind_round_trips() {
        for kind in [
            EventKind::PageView,
            EventKind::ProductView,
            EventKind::AddToCart,
            EventKind::Purchase,
        ] {
            assert_eq!(EventKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    /// Expect Err when parsing an unknown event kind
    #[test]
    fn rejects_unknown_kind() {
        assert!(EventKind::from_str("bogus").is_err());
    }
}
