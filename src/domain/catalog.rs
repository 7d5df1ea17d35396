use std::collections::HashSet;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};

use super::errors::DomainError;
use super::money::{fits_numeric, AMOUNT_INTEGER_DIGITS};

pub type CategoryId = i32;
pub type BrandId = i32;
pub type ProductId = i32;

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub logo_url: Option<String>,
    /// Display position set by the admin reorder; `None` sorts last.
    pub position: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrandDraft {
    pub name: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: BigDecimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub stock: i32,
    pub category_id: CategoryId,
    pub brand_id: Option<BrandId>,
    pub category: Option<Category>,
    pub brand: Option<Brand>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: BigDecimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub stock: i32,
    pub category_id: CategoryId,
    pub brand_id: Option<BrandId>,
}

/// Non-blank and at most `max` characters, the width of its `nome` column.
fn required_name(name: Option<&str>, max: usize) -> Result<String, DomainError> {
    name.map(str::trim)
        .filter(|n| !n.is_empty() && n.chars().count() <= max)
        .map(str::to_string)
        .ok_or_else(|| DomainError::validation("nome"))
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl CategoryDraft {
    pub fn parse(name: Option<&str>, image_url: Option<&str>) -> Result<Self, DomainError> {
        Ok(CategoryDraft {
            name: required_name(name, 100)?,
            image_url: optional_text(image_url),
        })
    }
}

impl BrandDraft {
    pub fn parse(name: Option<&str>, logo_url: Option<&str>) -> Result<Self, DomainError> {
        Ok(BrandDraft {
            name: required_name(name, 100)?,
            logo_url: optional_text(logo_url),
        })
    }
}

/// Untyped product form.
#[derive(Debug, Clone, Default)]
pub struct ProductSubmission {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub stock: Option<i32>,
    pub category_id: Option<CategoryId>,
    pub brand_id: Option<BrandId>,
}

impl ProductSubmission {
    pub fn validate(self) -> Result<ProductDraft, DomainError> {
        let name = required_name(self.name.as_deref(), 200)?;
        let price = self
            .price
            .as_deref()
            .map(str::trim)
            .and_then(|p| BigDecimal::from_str(p).ok())
            .filter(|p| fits_numeric(p, AMOUNT_INTEGER_DIGITS) && *p > BigDecimal::zero())
            .ok_or_else(|| DomainError::validation("preco"))?;
        let category_id = self
            .category_id
            .ok_or_else(|| DomainError::validation("categoria_id"))?;
        let stock = self.stock.unwrap_or(0);
        if stock < 0 {
            return Err(DomainError::validation("estoque"));
        }

        Ok(ProductDraft {
            name,
            price,
            description: optional_text(self.description.as_deref()),
            image_url: optional_text(self.image_url.as_deref()),
            stock,
            category_id,
            brand_id: self.brand_id,
        })
    }
}

/// The full brand list in its new display order. Must be non-empty and free
/// of duplicates.
pub fn validate_brand_order(ids: &[BrandId]) -> Result<(), DomainError> {
    if ids.is_empty() {
        return Err(DomainError::validation("order"));
    }
    let mut seen = HashSet::with_capacity(ids.len());
    if !ids.iter().all(|id| seen.insert(*id)) {
        return Err(DomainError::validation("order"));
    }
    Ok(())
}

/// Brands by position (unpositioned last), then name.
pub fn sort_brands(brands: &mut [Brand]) {
    brands.sort_by(|a, b| {
        let pa = a.position.unwrap_or(i32::MAX);
        let pb = b.position.unwrap_or(i32::MAX);
        pa.cmp(&pb).then_with(|| a.name.cmp(&b.name))
    });
}

/// Storefront order: products grouped by their brand's position (brandless
/// last), cheapest first inside a brand.
pub fn sort_for_storefront(products: &mut [Product]) {
    fn brand_key(p: &Product) -> (i32, i32) {
        match &p.brand {
            Some(b) => (b.position.unwrap_or(i32::MAX - 1), b.id),
            None => (i32::MAX, i32::MAX),
        }
    }
    products.sort_by(|a, b| {
        brand_key(a)
            .cmp(&brand_key(b))
            .then_with(|| a.price.cmp(&b.price))
            .then_with(|| a.id.cmp(&b.id))
    });
}
