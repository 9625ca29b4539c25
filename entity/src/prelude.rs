pub use super::analytics_event::Entity as AnalyticsEvent;
pub use super::cart::Entity as Cart;
pub use super::cart_item::Entity as CartItem;
pub use super::customer_order::Entity as CustomerOrder;
pub use super::loyalty_account::Entity as LoyaltyAccount;
pub use super::loyalty_transaction::Entity as LoyaltyTransaction;
pub use super::order_item::Entity as OrderItem;
pub use super::payment::Entity as Payment;
pub use super::payment_installment::Entity as PaymentInstallment;
pub use super::payment_plan::Entity as PaymentPlan;
pub use super::product::Entity as Product;
pub use super::product_review::Entity as ProductReview;
pub use super::product_variant::Entity as ProductVariant;
pub use super::promo_code::Entity as PromoCode;
pub use super::promo_redemption::Entity as PromoRedemption;
pub use super::rma_request::Entity as RmaRequest;
pub use super::sales_daily::Entity as SalesDaily;
pub use super::shop_user::Entity as ShopUser;
pub use super::support_ticket::Entity as SupportTicket;
pub use super::ticket_message::Entity as TicketMessage;
pub use super::wishlist_item::Entity as WishlistItem;
