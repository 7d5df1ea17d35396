pub mod application;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;
pub mod state;

#[cfg(test)]
mod test_support;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use handlers::{address, catalog, checkout, health, orders, shipping};

pub use config::Config;
pub use db::{create_pool, DbPool};
pub use errors::AppError;
pub use openapi::ApiDoc;
pub use state::AppState;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Registers every route plus the JSON and path extractor settings.
///
/// Malformed bodies and path ids are answered with the same 400 body as
/// validation failures.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .route("/health", web::get().to(health::health))
    // orders
    .service(
        web::resource("/orders")
            .route(web::post().to(orders::submit_order))
            .route(web::get().to(orders::list_orders)),
    )
    .route("/admin/orders", web::post().to(orders::create_order))
    .service(
        web::resource("/orders/{id}")
            .route(web::get().to(orders::get_order))
            .route(web::put().to(orders::update_order))
            .route(web::delete().to(orders::delete_order)),
    )
    .route(
        "/orders/{id}/status",
        web::patch().to(orders::update_order_status),
    )
    // catalog
    .service(
        web::resource("/categories")
            .route(web::get().to(catalog::list_categories))
            .route(web::post().to(catalog::create_category)),
    )
    .service(
        web::resource("/categories/{id}")
            .route(web::put().to(catalog::update_category))
            .route(web::delete().to(catalog::delete_category)),
    )
    .service(
        web::resource("/brands")
            .route(web::get().to(catalog::list_brands))
            .route(web::post().to(catalog::create_brand)),
    )
    // must precede /brands/{id}
    .route("/brands/reorder", web::post().to(catalog::reorder_brands))
    .service(
        web::resource("/brands/{id}")
            .route(web::put().to(catalog::update_brand))
            .route(web::delete().to(catalog::delete_brand)),
    )
    .service(
        web::resource("/products")
            .route(web::get().to(catalog::list_products))
            .route(web::post().to(catalog::create_product)),
    )
    .route(
        "/products/category/{id}",
        web::get().to(catalog::products_by_category),
    )
    .route(
        "/products/brand/{id}",
        web::get().to(catalog::products_by_brand),
    )
    .service(
        web::resource("/products/{id}")
            .route(web::put().to(catalog::update_product))
            .route(web::delete().to(catalog::delete_product)),
    )
    // shipping and checkout
    .service(
        web::resource("/shipping-options")
            .route(web::get().to(shipping::list_options))
            .route(web::post().to(shipping::create_option)),
    )
    .service(
        web::resource("/shipping-options/{id}")
            .route(web::put().to(shipping::update_option))
            .route(web::delete().to(shipping::delete_option)),
    )
    .route("/checkout/quote", web::post().to(checkout::quote))
    .route("/address/{cep}", web::get().to(address::lookup));
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(state);
    let api = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", api.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
