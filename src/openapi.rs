use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers::{address, catalog, checkout, health, orders, shipping};

#[derive(OpenApi)]
#[openapi(
    info(title = "Lock Pharma store API", description = "Storefront and back-office endpoints"),
    paths(
        orders::submit_order,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order,
        orders::update_order_status,
        orders::delete_order,
        catalog::list_categories,
        catalog::create_category,
        catalog::update_category,
        catalog::delete_category,
        catalog::list_brands,
        catalog::create_brand,
        catalog::update_brand,
        catalog::delete_brand,
        catalog::reorder_brands,
        catalog::list_products,
        catalog::products_by_category,
        catalog::products_by_brand,
        catalog::create_product,
        catalog::update_product,
        catalog::delete_product,
        shipping::list_options,
        shipping::create_option,
        shipping::update_option,
        shipping::delete_option,
        checkout::quote,
        address::lookup,
        health::health,
    ),
    components(schemas(
        orders::OrderRequest,
        orders::StatusRequest,
        orders::OrderResponse,
        catalog::CategoryRequest,
        catalog::CategoryResponse,
        catalog::BrandRequest,
        catalog::BrandResponse,
        catalog::ReorderRequest,
        catalog::ProductRequest,
        catalog::ProductResponse,
        shipping::ShippingOptionRequest,
        shipping::ShippingOptionResponse,
        checkout::QuoteItem,
        checkout::QuoteBody,
        checkout::QuoteResponse,
        address::AddressResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "orders", description = "Order submission and back-office order management"),
        (name = "catalog", description = "Categories, brands and products"),
        (name = "shipping", description = "Shipping options and per-state prices"),
        (name = "checkout", description = "Cart quotes and address lookup"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Registers the bearer scheme referenced by admin routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "admin_token",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
