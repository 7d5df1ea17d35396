use std::sync::Arc;

use crate::application::catalog_service::CatalogService;
use crate::application::checkout::CheckoutService;
use crate::application::order_service::OrderService;
use crate::application::pricing::PricingEngine;
use crate::application::shipping_service::ShippingService;
use crate::config::Config;
use crate::db::DbPool;
use crate::domain::ports::{AddressResolver, CatalogRepository, OrderRepository, ShippingRepository};
use crate::infrastructure::catalog_repo::DieselCatalogRepository;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::shipping_repo::DieselShippingRepository;
use crate::infrastructure::viacep::ViaCepResolver;

/// Everything a handler needs, shared read-only across workers.
pub struct AppState {
    pub orders: OrderService<Arc<dyn OrderRepository>>,
    pub catalog: CatalogService<Arc<dyn CatalogRepository>>,
    pub shipping: ShippingService<Arc<dyn ShippingRepository>>,
    pub checkout: CheckoutService<Arc<dyn CatalogRepository>, Arc<dyn ShippingRepository>>,
    pub addresses: Arc<dyn AddressResolver>,
    pub admin_token: String,
}

impl AppState {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        catalog: Arc<dyn CatalogRepository>,
        shipping: Arc<dyn ShippingRepository>,
        addresses: Arc<dyn AddressResolver>,
        engine: PricingEngine,
        admin_token: String,
    ) -> Self {
        AppState {
            orders: OrderService::new(orders),
            catalog: CatalogService::new(catalog.clone()),
            shipping: ShippingService::new(shipping.clone()),
            checkout: CheckoutService::new(catalog, shipping, engine),
            addresses,
            admin_token,
        }
    }

    /// Production wiring: Diesel repositories over `pool` and a ViaCEP client.
    pub fn from_pool(pool: DbPool, config: &Config) -> Self {
        AppState::new(
            Arc::new(DieselOrderRepository::new(pool.clone())),
            Arc::new(DieselCatalogRepository::new(pool.clone())),
            Arc::new(DieselShippingRepository::new(pool)),
            Arc::new(ViaCepResolver::new(
                reqwest::Client::new(),
                &config.address_lookup_url,
            )),
            PricingEngine::new(config.shipping_fallback_state),
            config.admin_token.clone(),
        )
    }
}
