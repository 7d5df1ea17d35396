//! In-memory port implementations for unit and handler tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::pricing::PricingEngine;
use crate::domain::address::Address;
use crate::domain::catalog::{
    Brand, BrandDraft, BrandId, Category, CategoryDraft, CategoryId, Product, ProductDraft,
    ProductId,
};
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderDraft, OrderId, OrderStatus};
use crate::domain::ports::{AddressResolver, CatalogRepository, OrderRepository, ShippingRepository};
use crate::domain::shipping::{ShippingOption, ShippingOptionDraft, ShippingOptionId};
use crate::domain::state::StateCode;
use crate::state::AppState;

pub const ADMIN_TOKEN: &str = "test-admin-token";

#[derive(Default)]
pub struct InMemoryOrders {
    rows: Mutex<Vec<Order>>,
    writes: AtomicUsize,
}

impl InMemoryOrders {
    /// Successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn wrote(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

fn order_from(
    id: OrderId,
    draft: &OrderDraft,
    status: OrderStatus,
    created_at: DateTime<Utc>,
) -> Order {
    Order {
        id,
        name: draft.name.clone(),
        tax_id: draft.tax_id.clone(),
        email: draft.email.clone(),
        phone: draft.phone.clone(),
        postal_code: draft.postal_code.clone(),
        street: draft.street.clone(),
        number: draft.number.clone(),
        complement: draft.complement.clone(),
        neighborhood: draft.neighborhood.clone(),
        city: draft.city.clone(),
        state: draft.state,
        payment_method: draft.payment_method,
        shipping_cost: draft.shipping_cost.clone(),
        total: draft.total.clone(),
        insured: draft.insured,
        status,
        created_at,
        updated_at: Utc::now(),
    }
}

impl OrderRepository for InMemoryOrders {
    fn create(&self, draft: &OrderDraft) -> Result<Order, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        let order = order_from(id, draft, draft.status.unwrap_or_default(), Utc::now());
        rows.push(order.clone());
        self.wrote();
        Ok(order)
    }

    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|o| o.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Order>, DomainError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    fn update(&self, id: OrderId, draft: &OrderDraft) -> Result<Option<Order>, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(slot) = rows.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        let status = draft.status.unwrap_or(slot.status);
        *slot = order_from(id, draft, status, slot.created_at);
        self.wrote();
        Ok(Some(slot.clone()))
    }

    fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(slot) = rows.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        slot.status = status;
        slot.updated_at = Utc::now();
        self.wrote();
        Ok(Some(slot.clone()))
    }

    fn delete(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(index) = rows.iter().position(|o| o.id == id) else {
            return Ok(None);
        };
        self.wrote();
        Ok(Some(rows.remove(index)))
    }
}

/// Order store that is always down. Counts every call made to it.
#[derive(Default)]
pub struct FailingOrders {
    attempts: AtomicUsize,
}

impl FailingOrders {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn fail(&self) -> DomainError {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        DomainError::Persistence("connection reset by peer".into())
    }
}

impl OrderRepository for FailingOrders {
    fn create(&self, _: &OrderDraft) -> Result<Order, DomainError> {
        Err(self.fail())
    }

    fn find_by_id(&self, _: OrderId) -> Result<Option<Order>, DomainError> {
        Err(self.fail())
    }

    fn list(&self) -> Result<Vec<Order>, DomainError> {
        Err(self.fail())
    }

    fn update(&self, _: OrderId, _: &OrderDraft) -> Result<Option<Order>, DomainError> {
        Err(self.fail())
    }

    fn update_status(&self, _: OrderId, _: OrderStatus) -> Result<Option<Order>, DomainError> {
        Err(self.fail())
    }

    fn delete(&self, _: OrderId) -> Result<Option<Order>, DomainError> {
        Err(self.fail())
    }
}

#[derive(Default)]
pub struct InMemoryShipping {
    rows: Mutex<Vec<ShippingOption>>,
}

impl ShippingRepository for InMemoryShipping {
    fn list(&self) -> Result<Vec<ShippingOption>, DomainError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    fn find_by_id(&self, id: ShippingOptionId) -> Result<Option<ShippingOption>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|o| o.id == id).cloned())
    }

    fn create(&self, draft: &ShippingOptionDraft) -> Result<ShippingOption, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let option = ShippingOption {
            id: rows.iter().map(|o| o.id).max().unwrap_or(0) + 1,
            name: draft.name.clone(),
            prices: draft.prices.clone(),
            insurance_percentage: draft.insurance_percentage.clone(),
            created_at: now,
            updated_at: now,
        };
        rows.push(option.clone());
        Ok(option)
    }

    fn update(
        &self,
        id: ShippingOptionId,
        draft: &ShippingOptionDraft,
    ) -> Result<Option<ShippingOption>, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(slot) = rows.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        slot.name = draft.name.clone();
        slot.prices = draft.prices.clone();
        slot.insurance_percentage = draft.insurance_percentage.clone();
        slot.updated_at = Utc::now();
        Ok(Some(slot.clone()))
    }

    fn delete(&self, id: ShippingOptionId) -> Result<bool, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|o| o.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
struct CatalogTables {
    categories: Vec<Category>,
    brands: Vec<Brand>,
    products: Vec<Product>,
}

impl CatalogTables {
    fn attach(&self, mut product: Product) -> Product {
        product.category = self
            .categories
            .iter()
            .find(|c| c.id == product.category_id)
            .cloned();
        product.brand = product
            .brand_id
            .and_then(|id| self.brands.iter().find(|b| b.id == id).cloned());
        product
    }

    fn product_from(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, DomainError> {
        if !self.categories.iter().any(|c| c.id == draft.category_id) {
            return Err(DomainError::InvalidInput("unknown category".into()));
        }
        if let Some(brand) = draft.brand_id {
            if !self.brands.iter().any(|b| b.id == brand) {
                return Err(DomainError::InvalidInput("unknown brand".into()));
            }
        }
        let now = Utc::now();
        Ok(self.attach(Product {
            id,
            name: draft.name.clone(),
            price: draft.price.clone(),
            description: draft.description.clone(),
            image_url: draft.image_url.clone(),
            stock: draft.stock,
            category_id: draft.category_id,
            brand_id: draft.brand_id,
            category: None,
            brand: None,
            created_at: now,
            updated_at: now,
        }))
    }
}

#[derive(Default)]
pub struct InMemoryCatalog {
    tables: Mutex<CatalogTables>,
}

impl CatalogRepository for InMemoryCatalog {
    fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.tables.lock().unwrap().categories.clone())
    }

    fn create_category(&self, draft: &CategoryDraft) -> Result<Category, DomainError> {
        let mut t = self.tables.lock().unwrap();
        let now = Utc::now();
        let category = Category {
            id: t.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            name: draft.name.clone(),
            image_url: draft.image_url.clone(),
            created_at: now,
            updated_at: now,
        };
        t.categories.push(category.clone());
        Ok(category)
    }

    fn update_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Option<Category>, DomainError> {
        let mut t = self.tables.lock().unwrap();
        let Some(slot) = t.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        slot.name = draft.name.clone();
        slot.image_url = draft.image_url.clone();
        slot.updated_at = Utc::now();
        Ok(Some(slot.clone()))
    }

    fn delete_category(&self, id: CategoryId) -> Result<bool, DomainError> {
        let mut t = self.tables.lock().unwrap();
        if t.products.iter().any(|p| p.category_id == id) {
            return Err(DomainError::InvalidInput("category still has products".into()));
        }
        let before = t.categories.len();
        t.categories.retain(|c| c.id != id);
        Ok(t.categories.len() < before)
    }

    fn list_brands(&self) -> Result<Vec<Brand>, DomainError> {
        Ok(self.tables.lock().unwrap().brands.clone())
    }

    fn create_brand(&self, draft: &BrandDraft) -> Result<Brand, DomainError> {
        let mut t = self.tables.lock().unwrap();
        if t.brands.iter().any(|b| b.name == draft.name) {
            return Err(DomainError::InvalidInput("brand name already exists".into()));
        }
        let now = Utc::now();
        let brand = Brand {
            id: t.brands.iter().map(|b| b.id).max().unwrap_or(0) + 1,
            name: draft.name.clone(),
            logo_url: draft.logo_url.clone(),
            position: None,
            created_at: now,
            updated_at: now,
        };
        t.brands.push(brand.clone());
        Ok(brand)
    }

    fn update_brand(&self, id: BrandId, draft: &BrandDraft) -> Result<Option<Brand>, DomainError> {
        let mut t = self.tables.lock().unwrap();
        let Some(slot) = t.brands.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        slot.name = draft.name.clone();
        slot.logo_url = draft.logo_url.clone();
        slot.updated_at = Utc::now();
        Ok(Some(slot.clone()))
    }

    fn delete_brand(&self, id: BrandId) -> Result<bool, DomainError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.brands.len();
        t.brands.retain(|b| b.id != id);
        for product in t.products.iter_mut().filter(|p| p.brand_id == Some(id)) {
            product.brand_id = None;
        }
        Ok(t.brands.len() < before)
    }

    fn reorder_brands(&self, ids: &[BrandId]) -> Result<(), DomainError> {
        let mut t = self.tables.lock().unwrap();
        if !ids.iter().all(|id| t.brands.iter().any(|b| b.id == *id)) {
            return Err(DomainError::NotFound);
        }
        for (position, id) in ids.iter().enumerate() {
            if let Some(brand) = t.brands.iter_mut().find(|b| b.id == *id) {
                brand.position = Some(position as i32);
            }
        }
        Ok(())
    }

    fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        let t = self.tables.lock().unwrap();
        Ok(t.products.iter().cloned().map(|p| t.attach(p)).collect())
    }

    fn find_products(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        let t = self.tables.lock().unwrap();
        Ok(t.products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .map(|p| t.attach(p))
            .collect())
    }

    fn create_product(&self, draft: &ProductDraft) -> Result<Product, DomainError> {
        let mut t = self.tables.lock().unwrap();
        let id = t.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let product = t.product_from(id, draft)?;
        t.products.push(product.clone());
        Ok(product)
    }

    fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, DomainError> {
        let mut t = self.tables.lock().unwrap();
        let Some(index) = t.products.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        let mut product = t.product_from(id, draft)?;
        product.created_at = t.products[index].created_at;
        t.products[index] = product.clone();
        Ok(Some(product))
    }

    fn delete_product(&self, id: ProductId) -> Result<bool, DomainError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.products.len();
        t.products.retain(|p| p.id != id);
        Ok(t.products.len() < before)
    }
}

/// Resolves only the postal codes it was seeded with.
#[derive(Default)]
pub struct StubResolver {
    pub known: Vec<Address>,
    pub unavailable: bool,
}

#[async_trait]
impl AddressResolver for StubResolver {
    async fn resolve(&self, postal_code: &str) -> Result<Address, DomainError> {
        if self.unavailable {
            return Err(DomainError::Upstream("connection refused".into()));
        }
        self.known
            .iter()
            .find(|a| a.postal_code == postal_code)
            .cloned()
            .ok_or(DomainError::NotFound)
    }
}

pub fn paulista() -> Address {
    Address {
        postal_code: "01310100".into(),
        street: "Avenida Paulista".into(),
        neighborhood: "Bela Vista".into(),
        city: "São Paulo".into(),
        state: StateCode::Sp,
    }
}

/// Handles kept by a test after the fakes move into [`AppState`].
pub struct Fakes {
    pub orders: Arc<InMemoryOrders>,
    pub catalog: Arc<InMemoryCatalog>,
    pub shipping: Arc<InMemoryShipping>,
}

pub fn test_state(resolver: StubResolver) -> (AppState, Fakes) {
    let fakes = Fakes {
        orders: Arc::new(InMemoryOrders::default()),
        catalog: Arc::new(InMemoryCatalog::default()),
        shipping: Arc::new(InMemoryShipping::default()),
    };
    let state = AppState::new(
        fakes.orders.clone(),
        fakes.catalog.clone(),
        fakes.shipping.clone(),
        Arc::new(resolver),
        PricingEngine::new(StateCode::Sp),
        ADMIN_TOKEN.to_string(),
    );
    (state, fakes)
}

/// State over the given order store; the other ports start empty.
pub fn state_with_orders(orders: Arc<dyn OrderRepository>) -> AppState {
    AppState::new(
        orders,
        Arc::new(InMemoryCatalog::default()),
        Arc::new(InMemoryShipping::default()),
        Arc::new(StubResolver::default()),
        PricingEngine::new(StateCode::Sp),
        ADMIN_TOKEN.to_string(),
    )
}
