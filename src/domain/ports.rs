use std::sync::Arc;

use async_trait::async_trait;

use super::address::Address;
use super::catalog::{
    Brand, BrandDraft, BrandId, Category, CategoryDraft, CategoryId, Product, ProductDraft,
    ProductId,
};
use super::errors::DomainError;
use super::order::{Order, OrderDraft, OrderId, OrderStatus};
use super::shipping::{ShippingOption, ShippingOptionDraft, ShippingOptionId};

/// Persistence for orders. The store assigns ids and timestamps; `Ok(None)`
/// means no order with that id exists.
pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, draft: &OrderDraft) -> Result<Order, DomainError>;
    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError>;
    /// Newest first.
    fn list(&self) -> Result<Vec<Order>, DomainError>;
    fn update(&self, id: OrderId, draft: &OrderDraft) -> Result<Option<Order>, DomainError>;
    fn update_status(&self, id: OrderId, status: OrderStatus)
        -> Result<Option<Order>, DomainError>;
    fn delete(&self, id: OrderId) -> Result<Option<Order>, DomainError>;
}

pub trait ShippingRepository: Send + Sync + 'static {
    /// Ordered by name.
    fn list(&self) -> Result<Vec<ShippingOption>, DomainError>;
    fn find_by_id(&self, id: ShippingOptionId) -> Result<Option<ShippingOption>, DomainError>;
    fn create(&self, draft: &ShippingOptionDraft) -> Result<ShippingOption, DomainError>;
    fn update(
        &self,
        id: ShippingOptionId,
        draft: &ShippingOptionDraft,
    ) -> Result<Option<ShippingOption>, DomainError>;
    fn delete(&self, id: ShippingOptionId) -> Result<bool, DomainError>;
}

pub trait CatalogRepository: Send + Sync + 'static {
    fn list_categories(&self) -> Result<Vec<Category>, DomainError>;
    fn create_category(&self, draft: &CategoryDraft) -> Result<Category, DomainError>;
    fn update_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Option<Category>, DomainError>;
    fn delete_category(&self, id: CategoryId) -> Result<bool, DomainError>;

    fn list_brands(&self) -> Result<Vec<Brand>, DomainError>;
    fn create_brand(&self, draft: &BrandDraft) -> Result<Brand, DomainError>;
    fn update_brand(&self, id: BrandId, draft: &BrandDraft) -> Result<Option<Brand>, DomainError>;
    fn delete_brand(&self, id: BrandId) -> Result<bool, DomainError>;
    /// Writes positions 0..n in one transaction. Fails with `NotFound` if any
    /// id is unknown, leaving every position untouched.
    fn reorder_brands(&self, ids: &[BrandId]) -> Result<(), DomainError>;

    /// Every product with its category and brand attached, in no particular
    /// order.
    fn list_products(&self) -> Result<Vec<Product>, DomainError>;
    fn find_products(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError>;
    fn create_product(&self, draft: &ProductDraft) -> Result<Product, DomainError>;
    fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, DomainError>;
    fn delete_product(&self, id: ProductId) -> Result<bool, DomainError>;
}

/// Postal code lookup against an external service.
#[async_trait]
pub trait AddressResolver: Send + Sync + 'static {
    /// `postal_code` is already normalized to eight digits.
    async fn resolve(&self, postal_code: &str) -> Result<Address, DomainError>;
}

// Lets services be built over shared trait objects as well as concrete repos.

impl<T: OrderRepository + ?Sized> OrderRepository for Arc<T> {
    fn create(&self, draft: &OrderDraft) -> Result<Order, DomainError> {
        (**self).create(draft)
    }
    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        (**self).find_by_id(id)
    }
    fn list(&self) -> Result<Vec<Order>, DomainError> {
        (**self).list()
    }
    fn update(&self, id: OrderId, draft: &OrderDraft) -> Result<Option<Order>, DomainError> {
        (**self).update(id, draft)
    }
    fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, DomainError> {
        (**self).update_status(id, status)
    }
    fn delete(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        (**self).delete(id)
    }
}

impl<T: ShippingRepository + ?Sized> ShippingRepository for Arc<T> {
    fn list(&self) -> Result<Vec<ShippingOption>, DomainError> {
        (**self).list()
    }
    fn find_by_id(&self, id: ShippingOptionId) -> Result<Option<ShippingOption>, DomainError> {
        (**self).find_by_id(id)
    }
    fn create(&self, draft: &ShippingOptionDraft) -> Result<ShippingOption, DomainError> {
        (**self).create(draft)
    }
    fn update(
        &self,
        id: ShippingOptionId,
        draft: &ShippingOptionDraft,
    ) -> Result<Option<ShippingOption>, DomainError> {
        (**self).update(id, draft)
    }
    fn delete(&self, id: ShippingOptionId) -> Result<bool, DomainError> {
        (**self).delete(id)
    }
}

impl<T: CatalogRepository + ?Sized> CatalogRepository for Arc<T> {
    fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        (**self).list_categories()
    }
    fn create_category(&self, draft: &CategoryDraft) -> Result<Category, DomainError> {
        (**self).create_category(draft)
    }
    fn update_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Option<Category>, DomainError> {
        (**self).update_category(id, draft)
    }
    fn delete_category(&self, id: CategoryId) -> Result<bool, DomainError> {
        (**self).delete_category(id)
    }
    fn list_brands(&self) -> Result<Vec<Brand>, DomainError> {
        (**self).list_brands()
    }
    fn create_brand(&self, draft: &BrandDraft) -> Result<Brand, DomainError> {
        (**self).create_brand(draft)
    }
    fn update_brand(&self, id: BrandId, draft: &BrandDraft) -> Result<Option<Brand>, DomainError> {
        (**self).update_brand(id, draft)
    }
    fn delete_brand(&self, id: BrandId) -> Result<bool, DomainError> {
        (**self).delete_brand(id)
    }
    fn reorder_brands(&self, ids: &[BrandId]) -> Result<(), DomainError> {
        (**self).reorder_brands(ids)
    }
    fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        (**self).list_products()
    }
    fn find_products(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        (**self).find_products(ids)
    }
    fn create_product(&self, draft: &ProductDraft) -> Result<Product, DomainError> {
        (**self).create_product(draft)
    }
    fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, DomainError> {
        (**self).update_product(id, draft)
    }
    fn delete_product(&self, id: ProductId) -> Result<bool, DomainError> {
        (**self).delete_product(id)
    }
}
