pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_shop_user_table;
mod m20260801_000002_create_product_table;
mod m20260801_000003_create_product_variant_table;
mod m20260801_000004_create_cart_table;
mod m20260801_000005_create_cart_item_table;
mod m20260801_000006_create_promo_code_table;
mod m20260801_000007_create_customer_order_table;
mod m20260801_000008_create_order_item_table;
mod m20260801_000009_create_payment_plan_table;
mod m20260801_000010_create_payment_installment_table;
mod m20260801_000011_create_payment_table;
mod m20260801_000012_create_promo_redemption_table;
mod m20260801_000013_create_loyalty_account_table;
mod m20260801_000014_create_loyalty_transaction_table;
mod m20260801_000015_create_support_ticket_table;
mod m20260801_000016_create_ticket_message_table;
mod m20260801_000017_create_rma_request_table;
mod m20260801_000018_create_product_review_table;
mod m20260801_000019_create_wishlist_item_table;
mod m20260801_000020_create_analytics_event_table;
mod m20260801_000021_create_sales_daily_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_shop_user_table::Migration),
            Box::new(m20260801_000002_create_product_table::Migration),
            Box::new(m20260801_000003_create_product_variant_table::Migration),
            Box::new(m20260801_000004_create_cart_table::Migration),
            Box::new(m20260801_000005_create_cart_item_table::Migration),
            Box::new(m20260801_000006_create_promo_code_table::Migration),
            Box::new(m20260801_000007_create_customer_order_table::Migration),
            Box::new(m20260801_000008_create_order_item_table::Migration),
            Box::new(m20260801_000009_create_payment_plan_table::Migration),
            Box::new(m20260801_000010_create_payment_installment_table::Migration),
            Box::new(m20260801_000011_create_payment_table::Migration),
            Box::new(m20260801_000012_create_promo_redemption_table::Migration),
            Box::new(m20260801_000013_create_loyalty_account_table::Migration),
            Box::new(m20260801_000014_create_loyalty_transaction_table::Migration),
            Box::new(m20260801_000015_create_support_ticket_table::Migration),
            Box::new(m20260801_000016_create_ticket_message_table::Migration),
            Box::new(m20260801_000017_create_rma_request_table::Migration),
            Box::new(m20260801_000018_create_product_review_table::Migration),
            Box::new(m20260801_000019_create_wishlist_item_table::Migration),
            Box::new(m20260801_000020_create_analytics_event_table::Migration),
            Box::new(m20260801_000021_create_sales_daily_table::Migration),
        ]
    }
}
