//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI
//! documentation using utoipa. All API endpoints are registered here with
//! their OpenAPI specifications, and Swagger UI is configured to provide
//! interactive API documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI
/// documentation.
///
/// Constructs an Axum router with the auth, catalog, cart, order, payment,
/// loyalty, customer care, engagement, and analytics endpoints registered.
/// Each endpoint is annotated with OpenAPI specifications via utoipa, which
/// are collected into a unified OpenAPI document. The router includes Swagger
/// UI at `/api/docs` for interactive API exploration and testing.
///
/// # Returns
/// An Axum `Router<AppState>` configured with all routes, ready to be merged
/// into the main application router.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Atelier", description = "Atelier storefront API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::catalog::CATALOG_TAG, description = "Product catalog API routes"),
        (name = controller::cart::CART_TAG, description = "Cart API routes"),
        (name = controller::order::ORDER_TAG, description = "Order management API routes"),
        (name = controller::payment::PAYMENT_TAG, description = "Payment and BNPL API routes"),
        (name = controller::loyalty::LOYALTY_TAG, description = "Loyalty and promo API routes"),
        (name = controller::care::CARE_TAG, description = "Customer care API routes"),
        (name = controller::engagement::ENGAGEMENT_TAG, description = "Reviews and wishlist API routes"),
        (name = controller::analytics::ANALYTICS_TAG, description = "Analytics API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(
            controller::catalog::create_product,
            controller::catalog::list_products
        ))
        .routes(routes!(
            controller::catalog::get_product,
            controller::catalog::update_product
        ))
        .routes(routes!(controller::catalog::adjust_stock))
        .routes(routes!(
            controller::cart::get_cart,
            controller::cart::clear_cart
        ))
        .routes(routes!(controller::cart::add_item))
        .routes(routes!(
            controller::cart::update_item,
            controller::cart::remove_item
        ))
        .routes(routes!(
            controller::order::place_order,
            controller::order::list_orders
        ))
        .routes(routes!(controller::order::list_orders_by_status))
        .routes(routes!(controller::order::get_order))
        .routes(routes!(controller::order::update_order_status))
        .routes(routes!(controller::order::cancel_order))
        .routes(routes!(controller::payment::capture_payment))
        .routes(routes!(controller::payment::refund_payment))
        .routes(routes!(
            controller::payment::create_plan,
            controller::payment::get_plan
        ))
        .routes(routes!(controller::payment::pay_installment))
        .routes(routes!(controller::loyalty::get_account))
        .routes(routes!(controller::loyalty::get_history))
        .routes(routes!(controller::loyalty::redeem_points))
        .routes(routes!(
            controller::loyalty::create_promo,
            controller::loyalty::list_promos
        ))
        .routes(routes!(
            controller::care::open_ticket,
            controller::care::list_tickets
        ))
        .routes(routes!(controller::care::list_tickets_by_status))
        .routes(routes!(controller::care::get_ticket))
        .routes(routes!(controller::care::post_message))
        .routes(routes!(controller::care::update_ticket_status))
        .routes(routes!(
            controller::care::request_rma,
            controller::care::list_rmas
        ))
        .routes(routes!(controller::care::get_rma))
        .routes(routes!(controller::care::update_rma_status))
        .routes(routes!(
            controller::engagement::create_review,
            controller::engagement::list_reviews
        ))
        .routes(routes!(controller::engagement::unpublish_review))
        .routes(routes!(
            controller::engagement::add_to_wishlist,
            controller::engagement::remove_from_wishlist
        ))
        .routes(routes!(controller::engagement::list_wishlist))
        .routes(routes!(controller::analytics::record_event))
        .routes(routes!(controller::analytics::get_sales))
        .routes(routes!(controller::analytics::get_top_products))
        .routes(routes!(controller::analytics::run_rollup))
        .split_for_parts();

    let routes = routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    routes
}
