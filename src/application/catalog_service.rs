use log::info;

use crate::domain::catalog::{
    sort_brands, sort_for_storefront, validate_brand_order, Brand, BrandDraft, BrandId, Category,
    CategoryDraft, CategoryId, Product, ProductId, ProductSubmission,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;

pub struct CatalogService<R> {
    repo: R,
}

fn found(deleted: bool) -> Result<(), DomainError> {
    if deleted {
        Ok(())
    } else {
        Err(DomainError::NotFound)
    }
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let mut categories = self.repo.list_categories()?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    pub fn create_category(&self, draft: CategoryDraft) -> Result<Category, DomainError> {
        let category = self.repo.create_category(&draft)?;
        info!("category {} created", category.id);
        Ok(category)
    }

    pub fn update_category(
        &self,
        id: CategoryId,
        draft: CategoryDraft,
    ) -> Result<Category, DomainError> {
        self.repo
            .update_category(id, &draft)?
            .ok_or(DomainError::NotFound)
    }

    pub fn delete_category(&self, id: CategoryId) -> Result<(), DomainError> {
        found(self.repo.delete_category(id)?)?;
        info!("category {} deleted", id);
        Ok(())
    }

    pub fn list_brands(&self) -> Result<Vec<Brand>, DomainError> {
        let mut brands = self.repo.list_brands()?;
        sort_brands(&mut brands);
        Ok(brands)
    }

    pub fn create_brand(&self, draft: BrandDraft) -> Result<Brand, DomainError> {
        let brand = self.repo.create_brand(&draft)?;
        info!("brand {} created", brand.id);
        Ok(brand)
    }

    pub fn update_brand(&self, id: BrandId, draft: BrandDraft) -> Result<Brand, DomainError> {
        self.repo.update_brand(id, &draft)?.ok_or(DomainError::NotFound)
    }

    pub fn delete_brand(&self, id: BrandId) -> Result<(), DomainError> {
        found(self.repo.delete_brand(id)?)?;
        info!("brand {} deleted", id);
        Ok(())
    }

    pub fn reorder_brands(&self, ids: &[BrandId]) -> Result<(), DomainError> {
        validate_brand_order(ids)?;
        self.repo.reorder_brands(ids)?;
        info!("reordered {} brands", ids.len());
        Ok(())
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        let mut products = self.repo.list_products()?;
        sort_for_storefront(&mut products);
        Ok(products)
    }

    pub fn products_by_category(&self, id: CategoryId) -> Result<Vec<Product>, DomainError> {
        self.filtered_by_name(|p| p.category_id == id)
    }

    pub fn products_by_brand(&self, id: BrandId) -> Result<Vec<Product>, DomainError> {
        self.filtered_by_name(|p| p.brand_id == Some(id))
    }

    fn filtered_by_name(&self, keep: impl Fn(&Product) -> bool) -> Result<Vec<Product>, DomainError> {
        let mut products: Vec<Product> = self
            .repo
            .list_products()?
            .into_iter()
            .filter(|p| keep(p))
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(products)
    }

    pub fn create_product(&self, submission: ProductSubmission) -> Result<Product, DomainError> {
        let draft = submission.validate()?;
        let product = self.repo.create_product(&draft)?;
        info!("product {} created", product.id);
        Ok(product)
    }

    pub fn update_product(
        &self,
        id: ProductId,
        submission: ProductSubmission,
    ) -> Result<Product, DomainError> {
        let draft = submission.validate()?;
        self.repo
            .update_product(id, &draft)?
            .ok_or(DomainError::NotFound)
    }

    pub fn delete_product(&self, id: ProductId) -> Result<(), DomainError> {
        found(self.repo.delete_product(id)?)?;
        info!("product {} deleted", id);
        Ok(())
    }
}
