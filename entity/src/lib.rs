pub mod prelude;

pub mod analytics_event;
pub mod cart;
pub mod cart_item;
pub mod customer_order;
pub mod loyalty_account;
pub mod loyalty_transaction;
pub mod order_item;
pub mod payment;
pub mod payment_installment;
pub mod payment_plan;
pub mod product;
pub mod product_review;
pub mod product_variant;
pub mod promo_code;
pub mod promo_redemption;
pub mod rma_request;
pub mod sales_daily;
pub mod shop_user;
pub mod support_ticket;
pub mod ticket_message;
pub mod wishlist_item;
