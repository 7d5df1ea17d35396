use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::auth::AdminAuth;
use crate::domain::catalog::{
    Brand, BrandDraft, BrandId, Category, CategoryDraft, CategoryId, Product, ProductId,
    ProductSubmission,
};
use crate::domain::errors::DomainError;
use crate::errors::AppError;
use crate::state::AppState;

use super::{amount_text, money, timestamp};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub nome: Option<String>,
    pub imagem_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub nome: String,
    pub imagem_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Category> for CategoryResponse {
    fn from(c: &Category) -> Self {
        CategoryResponse {
            id: c.id,
            nome: c.name.clone(),
            imagem_url: c.image_url.clone(),
            created_at: timestamp(&c.created_at),
            updated_at: timestamp(&c.updated_at),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BrandRequest {
    pub nome: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BrandResponse {
    pub id: BrandId,
    pub nome: String,
    pub logo_url: Option<String>,
    pub ordem: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Brand> for BrandResponse {
    fn from(b: &Brand) -> Self {
        BrandResponse {
            id: b.id,
            nome: b.name.clone(),
            logo_url: b.logo_url.clone(),
            ordem: b.position,
            created_at: timestamp(&b.created_at),
            updated_at: timestamp(&b.updated_at),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderRequest {
    /// Every brand id, in display order
    pub order: Vec<BrandId>,
}

/// Product form. The category is sent as `categoria_id` and validation errors
/// use that name, while [`ProductResponse`] returns it as `id_categoria`, the
/// `produtos` column name.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductRequest {
    pub nome: Option<String>,
    /// Positive price, number or decimal string
    #[schema(value_type = Option<f64>)]
    pub preco: Option<Value>,
    pub descricao: Option<String>,
    pub imagem_url: Option<String>,
    pub estoque: Option<i32>,
    /// Returned as `id_categoria` in responses
    pub categoria_id: Option<CategoryId>,
    pub marca_id: Option<BrandId>,
}

impl From<ProductRequest> for ProductSubmission {
    fn from(r: ProductRequest) -> Self {
        ProductSubmission {
            name: r.nome,
            price: amount_text(r.preco),
            description: r.descricao,
            image_url: r.imagem_url,
            stock: r.estoque,
            category_id: r.categoria_id,
            brand_id: r.marca_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: ProductId,
    pub nome: String,
    pub preco: String,
    pub descricao: Option<String>,
    pub imagem_url: Option<String>,
    pub estoque: i32,
    pub id_categoria: CategoryId,
    pub marca_id: Option<BrandId>,
    pub categoria_nome: Option<String>,
    pub marca_nome: Option<String>,
    pub marca_logo: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Product> for ProductResponse {
    fn from(p: &Product) -> Self {
        ProductResponse {
            id: p.id,
            nome: p.name.clone(),
            preco: money(&p.price),
            descricao: p.description.clone(),
            imagem_url: p.image_url.clone(),
            estoque: p.stock,
            id_categoria: p.category_id,
            marca_id: p.brand_id,
            categoria_nome: p.category.as_ref().map(|c| c.name.clone()),
            marca_nome: p.brand.as_ref().map(|b| b.name.clone()),
            marca_logo: p.brand.as_ref().and_then(|b| b.logo_url.clone()),
            created_at: timestamp(&p.created_at),
            updated_at: timestamp(&p.updated_at),
        }
    }
}

fn products_json(products: &[Product]) -> HttpResponse {
    let body: Vec<ProductResponse> = products.iter().map(ProductResponse::from).collect();
    HttpResponse::Ok().json(body)
}

// ── Categories ───────────────────────────────────────────────────────────────

/// GET /categories
#[utoipa::path(
    get,
    path = "/categories",
    responses((status = 200, description = "Categories by name", body = [CategoryResponse])),
    tag = "catalog"
)]
pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = web::block(move || state.catalog.list_categories()).await??;
    let body: Vec<CategoryResponse> = categories.iter().map(CategoryResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /categories
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Missing name"),
        (status = 401, description = "Missing or wrong admin token"),
    ),
    security(("admin_token" = [])),
    tag = "catalog"
)]
pub async fn create_category(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    body: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let draft = CategoryDraft::parse(body.nome.as_deref(), body.imagem_url.as_deref())?;
    let category = web::block(move || state.catalog.create_category(draft)).await??;
    Ok(HttpResponse::Created().json(CategoryResponse::from(&category)))
}

/// PUT /categories/{id}
#[utoipa::path(
    put,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Missing name"),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "Category not found"),
    ),
    security(("admin_token" = [])),
    tag = "catalog"
)]
pub async fn update_category(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<CategoryId>,
    body: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let draft = CategoryDraft::parse(body.nome.as_deref(), body.imagem_url.as_deref())?;
    let category = web::block(move || state.catalog.update_category(id, draft)).await??;
    Ok(HttpResponse::Ok().json(CategoryResponse::from(&category)))
}

/// DELETE /categories/{id}
///
/// Fails with 400 while products still reference the category.
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, description = "Category still has products"),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "Category not found"),
    ),
    security(("admin_token" = [])),
    tag = "catalog"
)]
pub async fn delete_category(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<CategoryId>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.catalog.delete_category(id)).await??;
    Ok(HttpResponse::NoContent().finish())
}

// ── Brands ───────────────────────────────────────────────────────────────────

/// GET /brands
///
/// Brands in display order: position first, unpositioned brands by name.
#[utoipa::path(
    get,
    path = "/brands",
    responses((status = 200, description = "Brands in display order", body = [BrandResponse])),
    tag = "catalog"
)]
pub async fn list_brands(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let brands = web::block(move || state.catalog.list_brands()).await??;
    let body: Vec<BrandResponse> = brands.iter().map(BrandResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /brands
#[utoipa::path(
    post,
    path = "/brands",
    request_body = BrandRequest,
    responses(
        (status = 201, description = "Brand created", body = BrandResponse),
        (status = 400, description = "Missing or duplicate name"),
        (status = 401, description = "Missing or wrong admin token"),
    ),
    security(("admin_token" = [])),
    tag = "catalog"
)]
pub async fn create_brand(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    body: web::Json<BrandRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let draft = BrandDraft::parse(body.nome.as_deref(), body.logo_url.as_deref())?;
    let brand = web::block(move || state.catalog.create_brand(draft)).await??;
    Ok(HttpResponse::Created().json(BrandResponse::from(&brand)))
}

/// PUT /brands/{id}
#[utoipa::path(
    put,
    path = "/brands/{id}",
    params(("id" = i32, Path, description = "Brand id")),
    request_body = BrandRequest,
    responses(
        (status = 200, description = "Brand updated", body = BrandResponse),
        (status = 400, description = "Missing or duplicate name"),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "Brand not found"),
    ),
    security(("admin_token" = [])),
    tag = "catalog"
)]
pub async fn update_brand(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<BrandId>,
    body: web::Json<BrandRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let draft = BrandDraft::parse(body.nome.as_deref(), body.logo_url.as_deref())?;
    let brand = web::block(move || state.catalog.update_brand(id, draft)).await??;
    Ok(HttpResponse::Ok().json(BrandResponse::from(&brand)))
}

/// DELETE /brands/{id}
///
/// Products of the brand are kept, without a brand.
#[utoipa::path(
    delete,
    path = "/brands/{id}",
    params(("id" = i32, Path, description = "Brand id")),
    responses(
        (status = 204, description = "Brand deleted"),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "Brand not found"),
    ),
    security(("admin_token" = [])),
    tag = "catalog"
)]
pub async fn delete_brand(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<BrandId>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.catalog.delete_brand(id)).await??;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /brands/reorder
#[utoipa::path(
    post,
    path = "/brands/reorder",
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Brands in their new order", body = [BrandResponse]),
        (status = 400, description = "Empty list or duplicate ids"),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "Unknown brand id"),
    ),
    security(("admin_token" = [])),
    tag = "catalog"
)]
pub async fn reorder_brands(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    body: web::Json<ReorderRequest>,
) -> Result<HttpResponse, AppError> {
    let ids = body.into_inner().order;
    let brands = web::block(move || -> Result<Vec<Brand>, DomainError> {
        state.catalog.reorder_brands(&ids)?;
        state.catalog.list_brands()
    })
    .await??;
    let body: Vec<BrandResponse> = brands.iter().map(BrandResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

// ── Products ─────────────────────────────────────────────────────────────────

/// GET /products
///
/// Grouped by brand position, cheapest first within a brand.
#[utoipa::path(
    get,
    path = "/products",
    responses((status = 200, description = "Storefront listing", body = [ProductResponse])),
    tag = "catalog"
)]
pub async fn list_products(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let products = web::block(move || state.catalog.list_products()).await??;
    Ok(products_json(&products))
}

/// GET /products/category/{id}
#[utoipa::path(
    get,
    path = "/products/category/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses((status = 200, description = "Products of the category by name", body = [ProductResponse])),
    tag = "catalog"
)]
pub async fn products_by_category(
    state: web::Data<AppState>,
    path: web::Path<CategoryId>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let products = web::block(move || state.catalog.products_by_category(id)).await??;
    Ok(products_json(&products))
}

/// GET /products/brand/{id}
#[utoipa::path(
    get,
    path = "/products/brand/{id}",
    params(("id" = i32, Path, description = "Brand id")),
    responses((status = 200, description = "Products of the brand by name", body = [ProductResponse])),
    tag = "catalog"
)]
pub async fn products_by_brand(
    state: web::Data<AppState>,
    path: web::Path<BrandId>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let products = web::block(move || state.catalog.products_by_brand(id)).await??;
    Ok(products_json(&products))
}

/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Missing or invalid field, or unknown category/brand"),
        (status = 401, description = "Missing or wrong admin token"),
    ),
    security(("admin_token" = [])),
    tag = "catalog"
)]
pub async fn create_product(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let submission = ProductSubmission::from(body.into_inner());
    let product = web::block(move || state.catalog.create_product(submission)).await??;
    Ok(HttpResponse::Created().json(ProductResponse::from(&product)))
}

/// PUT /products/{id}
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Missing or invalid field"),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "Product not found"),
    ),
    security(("admin_token" = [])),
    tag = "catalog"
)]
pub async fn update_product(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<ProductId>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let submission = ProductSubmission::from(body.into_inner());
    let product = web::block(move || state.catalog.update_product(id, submission)).await??;
    Ok(HttpResponse::Ok().json(ProductResponse::from(&product)))
}

/// DELETE /products/{id}
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "Product not found"),
    ),
    security(("admin_token" = [])),
    tag = "catalog"
)]
pub async fn delete_product(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<ProductId>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.catalog.delete_product(id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
