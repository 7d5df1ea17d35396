use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::catalog::{
    Brand, BrandDraft, BrandId, Category, CategoryDraft, CategoryId, Product, ProductDraft,
    ProductId,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;
use crate::schema::{categorias, marcas, produtos};

use super::models::{
    CategoriaChangeset, CategoriaRow, MarcaChangeset, MarcaRow, NewCategoriaRow, NewMarcaRow,
    NewProdutoRow, ProdutoChangeset, ProdutoRow,
};

pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Attaches category and brand summaries to product rows.
fn with_relations(
    conn: &mut PgConnection,
    rows: Vec<ProdutoRow>,
) -> Result<Vec<Product>, DomainError> {
    let category_ids: Vec<i32> = rows.iter().map(|r| r.id_categoria).collect();
    let brand_ids: Vec<i32> = rows.iter().filter_map(|r| r.marca_id).collect();

    let categories: HashMap<i32, Category> = categorias::table
        .filter(categorias::id.eq_any(&category_ids))
        .select(CategoriaRow::as_select())
        .load::<CategoriaRow>(conn)?
        .into_iter()
        .map(|c| (c.id, Category::from(c)))
        .collect();
    let brands: HashMap<i32, Brand> = marcas::table
        .filter(marcas::id.eq_any(&brand_ids))
        .select(MarcaRow::as_select())
        .load::<MarcaRow>(conn)?
        .into_iter()
        .map(|b| (b.id, Brand::from(b)))
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| Product {
            category: categories.get(&row.id_categoria).cloned(),
            brand: row.marca_id.and_then(|id| brands.get(&id).cloned()),
            id: row.id,
            name: row.nome,
            price: row.preco,
            description: row.descricao,
            image_url: row.imagem_url,
            stock: row.estoque,
            category_id: row.id_categoria,
            brand_id: row.marca_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
        .collect())
}

fn single(conn: &mut PgConnection, row: ProdutoRow) -> Result<Product, DomainError> {
    with_relations(conn, vec![row])?
        .pop()
        .ok_or_else(|| DomainError::Persistence("product vanished while loading".into()))
}

impl CatalogRepository for DieselCatalogRepository {
    fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = categorias::table
            .select(CategoriaRow::as_select())
            .order(categorias::nome.asc())
            .load::<CategoriaRow>(&mut conn)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn create_category(&self, draft: &CategoryDraft) -> Result<Category, DomainError> {
        let mut conn = self.pool.get()?;

        let row: CategoriaRow = diesel::insert_into(categorias::table)
            .values(&NewCategoriaRow::from(draft))
            .returning(CategoriaRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn update_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Option<Category>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(categorias::table.find(id))
            .set(&CategoriaChangeset::from(draft))
            .returning(CategoriaRow::as_returning())
            .get_result::<CategoriaRow>(&mut conn)
            .optional()?;
        Ok(row.map(Category::from))
    }

    fn delete_category(&self, id: CategoryId) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(categorias::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }

    fn list_brands(&self) -> Result<Vec<Brand>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = marcas::table
            .select(MarcaRow::as_select())
            .order((marcas::ordem.asc().nulls_last(), marcas::nome.asc()))
            .load::<MarcaRow>(&mut conn)?;
        Ok(rows.into_iter().map(Brand::from).collect())
    }

    fn create_brand(&self, draft: &BrandDraft) -> Result<Brand, DomainError> {
        let mut conn = self.pool.get()?;

        let row: MarcaRow = diesel::insert_into(marcas::table)
            .values(&NewMarcaRow::from(draft))
            .returning(MarcaRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn update_brand(&self, id: BrandId, draft: &BrandDraft) -> Result<Option<Brand>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(marcas::table.find(id))
            .set(&MarcaChangeset::from(draft))
            .returning(MarcaRow::as_returning())
            .get_result::<MarcaRow>(&mut conn)
            .optional()?;
        Ok(row.map(Brand::from))
    }

    fn delete_brand(&self, id: BrandId) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(marcas::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }

    fn reorder_brands(&self, ids: &[BrandId]) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let now = Utc::now();
            for (position, id) in ids.iter().enumerate() {
                let position = i32::try_from(position)
                    .map_err(|_| DomainError::InvalidInput("too many brands".into()))?;
                let updated = diesel::update(marcas::table.find(*id))
                    .set((marcas::ordem.eq(position), marcas::updated_at.eq(now)))
                    .execute(conn)?;
                // Rolls back every position written so far.
                if updated == 0 {
                    return Err(DomainError::NotFound);
                }
            }
            Ok(())
        })
    }

    fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = produtos::table
            .select(ProdutoRow::as_select())
            .load::<ProdutoRow>(&mut conn)?;
        with_relations(&mut conn, rows)
    }

    fn find_products(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = produtos::table
            .filter(produtos::id.eq_any(ids))
            .select(ProdutoRow::as_select())
            .load::<ProdutoRow>(&mut conn)?;
        with_relations(&mut conn, rows)
    }

    fn create_product(&self, draft: &ProductDraft) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row: ProdutoRow = diesel::insert_into(produtos::table)
            .values(&NewProdutoRow::from(draft))
            .returning(ProdutoRow::as_returning())
            .get_result(&mut conn)?;
        single(&mut conn, row)
    }

    fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(produtos::table.find(id))
            .set(&ProdutoChangeset::from(draft))
            .returning(ProdutoRow::as_returning())
            .get_result::<ProdutoRow>(&mut conn)
            .optional()?;
        match row {
            Some(row) => single(&mut conn, row).map(Some),
            None => Ok(None),
        }
    }

    fn delete_product(&self, id: ProductId) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(produtos::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::DieselCatalogRepository;
    use crate::domain::catalog::{BrandDraft, CategoryDraft, ProductSubmission};
    use crate::domain::errors::DomainError;
    use crate::domain::ports::CatalogRepository;
    use crate::infrastructure::test_db::setup_db;

    fn product(name: &str, price: &str, category: i32, brand: Option<i32>) -> ProductSubmission {
        ProductSubmission {
            name: Some(name.into()),
            price: Some(price.into()),
            category_id: Some(category),
            brand_id: brand,
            stock: Some(5),
            ..Default::default()
        }
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn products_embed_category_and_brand() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);
        let category = repo
            .create_category(&CategoryDraft::parse(Some("Injetáveis"), None).unwrap())
            .unwrap();
        let brand = repo
            .create_brand(&BrandDraft::parse(Some("Balkan"), None).unwrap())
            .unwrap();

        let created = repo
            .create_product(
                &product("Testosterona", "120.00", category.id, Some(brand.id))
                    .validate()
                    .unwrap(),
            )
            .expect("create failed");
        assert_eq!(created.category.as_ref().map(|c| c.name.as_str()), Some("Injetáveis"));
        assert_eq!(created.brand.as_ref().map(|b| b.id), Some(brand.id));

        let found = repo.find_products(&[created.id, 999]).unwrap();
        assert_eq!(found, vec![created]);
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn product_with_unknown_category_is_invalid_input() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);
        let err = repo
            .create_product(&product("X", "1", 42, None).validate().unwrap())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn reorder_is_all_or_nothing() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);
        let mut ids = Vec::new();
        for name in ["Alpha", "Balkan", "Cooper"] {
            ids.push(
                repo.create_brand(&BrandDraft::parse(Some(name), None).unwrap())
                    .unwrap()
                    .id,
            );
        }

        let err = repo.reorder_brands(&[ids[2], 999]).unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
        assert!(repo.list_brands().unwrap().iter().all(|b| b.position.is_none()));

        repo.reorder_brands(&[ids[2], ids[0], ids[1]]).unwrap();
        let listed: Vec<_> = repo.list_brands().unwrap().iter().map(|b| b.id).collect();
        assert_eq!(listed, vec![ids[2], ids[0], ids[1]]);
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn deleting_a_brand_detaches_its_products() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);
        let category = repo
            .create_category(&CategoryDraft::parse(Some("Orais"), None).unwrap())
            .unwrap();
        let brand = repo
            .create_brand(&BrandDraft::parse(Some("King"), None).unwrap())
            .unwrap();
        let created = repo
            .create_product(
                &product("Oxandrolona", "60", category.id, Some(brand.id))
                    .validate()
                    .unwrap(),
            )
            .unwrap();

        assert!(repo.delete_brand(brand.id).unwrap());
        let reloaded = repo.find_products(&[created.id]).unwrap();
        assert_eq!(reloaded[0].brand_id, None);
        assert!(!repo.delete_product(999).unwrap());
    }
}
