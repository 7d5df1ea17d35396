use std::collections::HashMap;

use crate::application::pricing::{PricingEngine, Quote};
use crate::domain::cart::Cart;
use crate::domain::catalog::ProductId;
use crate::domain::errors::DomainError;
use crate::domain::ports::{CatalogRepository, ShippingRepository};
use crate::domain::shipping::ShippingOptionId;

#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub items: Vec<(ProductId, i64)>,
    pub state: String,
    pub shipping_option_id: ShippingOptionId,
    pub insured: bool,
}

/// Prices a cart against current catalog prices. Client-sent prices are never
/// trusted.
pub struct CheckoutService<C, S> {
    catalog: C,
    shipping: S,
    engine: PricingEngine,
}

impl<C: CatalogRepository, S: ShippingRepository> CheckoutService<C, S> {
    pub fn new(catalog: C, shipping: S, engine: PricingEngine) -> Self {
        Self {
            catalog,
            shipping,
            engine,
        }
    }

    pub fn quote(&self, request: &QuoteRequest) -> Result<Quote, DomainError> {
        if request.items.is_empty() {
            return Err(DomainError::InvalidInput("cart is empty".into()));
        }

        let option = self
            .shipping
            .find_by_id(request.shipping_option_id)?
            .ok_or(DomainError::NotFound)?;

        let ids: Vec<ProductId> = request.items.iter().map(|(id, _)| *id).collect();
        let products: HashMap<_, _> = self
            .catalog
            .find_products(&ids)?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut cart = Cart::new();
        for (id, quantity) in &request.items {
            let product = products.get(id).ok_or(DomainError::NotFound)?;
            cart.add(product.id, &product.name, product.price.clone(), *quantity)?;
        }

        self.engine
            .quote_cart(cart.lines(), &request.state, &option, request.insured)
    }
}
