use std::collections::BTreeMap;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::auth::AdminAuth;
use crate::domain::shipping::{ShippingOption, ShippingOptionDraft, ShippingOptionId};
use crate::errors::AppError;
use crate::state::AppState;

use super::{amount_text, money, timestamp};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ShippingOptionRequest {
    pub nome: Option<String>,
    /// Insurance percentage of the cart subtotal, 0 to 100
    #[schema(value_type = Option<f64>)]
    pub seguro: Option<Value>,
    /// State code to price, e.g. {"SP": 15.0, "RJ": "22.50"}
    #[serde(default)]
    #[schema(value_type = Object)]
    pub precos: BTreeMap<String, Value>,
}

impl ShippingOptionRequest {
    fn into_draft(self) -> Result<ShippingOptionDraft, AppError> {
        let seguro = amount_text(self.seguro);
        let prices: Vec<(String, String)> = self
            .precos
            .into_iter()
            .map(|(state, price)| (state, amount_text(Some(price)).unwrap_or_default()))
            .collect();
        Ok(ShippingOptionDraft::parse(
            self.nome.as_deref(),
            seguro.as_deref(),
            prices.iter().map(|(s, p)| (s.as_str(), p.as_str())),
        )?)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShippingOptionResponse {
    pub id: ShippingOptionId,
    pub nome: String,
    pub seguro: String,
    /// Only states with a price are listed
    #[schema(value_type = Object)]
    pub precos: BTreeMap<String, String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&ShippingOption> for ShippingOptionResponse {
    fn from(o: &ShippingOption) -> Self {
        ShippingOptionResponse {
            id: o.id,
            nome: o.name.clone(),
            seguro: money(&o.insurance_percentage),
            precos: o
                .prices
                .iter()
                .map(|(state, price)| (state.to_string(), money(price)))
                .collect(),
            created_at: timestamp(&o.created_at),
            updated_at: timestamp(&o.updated_at),
        }
    }
}

/// GET /shipping-options
#[utoipa::path(
    get,
    path = "/shipping-options",
    responses((status = 200, description = "Shipping options by name", body = [ShippingOptionResponse])),
    tag = "shipping"
)]
pub async fn list_options(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let options = web::block(move || state.shipping.list_options()).await??;
    let body: Vec<ShippingOptionResponse> =
        options.iter().map(ShippingOptionResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /shipping-options
#[utoipa::path(
    post,
    path = "/shipping-options",
    request_body = ShippingOptionRequest,
    responses(
        (status = 201, description = "Shipping option created", body = ShippingOptionResponse),
        (status = 400, description = "Missing name, bad percentage or bad price"),
        (status = 401, description = "Missing or wrong admin token"),
    ),
    security(("admin_token" = [])),
    tag = "shipping"
)]
pub async fn create_option(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    body: web::Json<ShippingOptionRequest>,
) -> Result<HttpResponse, AppError> {
    let draft = body.into_inner().into_draft()?;
    let option = web::block(move || state.shipping.create_option(draft)).await??;
    Ok(HttpResponse::Created().json(ShippingOptionResponse::from(&option)))
}

/// PUT /shipping-options/{id}
///
/// The submitted price table replaces the stored one.
#[utoipa::path(
    put,
    path = "/shipping-options/{id}",
    params(("id" = i32, Path, description = "Shipping option id")),
    request_body = ShippingOptionRequest,
    responses(
        (status = 200, description = "Shipping option updated", body = ShippingOptionResponse),
        (status = 400, description = "Missing name, bad percentage or bad price"),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "Shipping option not found"),
    ),
    security(("admin_token" = [])),
    tag = "shipping"
)]
pub async fn update_option(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<ShippingOptionId>,
    body: web::Json<ShippingOptionRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let draft = body.into_inner().into_draft()?;
    let option = web::block(move || state.shipping.update_option(id, draft)).await??;
    Ok(HttpResponse::Ok().json(ShippingOptionResponse::from(&option)))
}

/// DELETE /shipping-options/{id}
#[utoipa::path(
    delete,
    path = "/shipping-options/{id}",
    params(("id" = i32, Path, description = "Shipping option id")),
    responses(
        (status = 204, description = "Shipping option deleted"),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "Shipping option not found"),
    ),
    security(("admin_token" = [])),
    tag = "shipping"
)]
pub async fn delete_option(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<ShippingOptionId>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.shipping.delete_option(id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
