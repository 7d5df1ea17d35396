use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::address::{normalize_postal_code, Address};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddressResponse {
    pub cep: String,
    pub rua: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
}

impl From<Address> for AddressResponse {
    fn from(a: Address) -> Self {
        AddressResponse {
            cep: a.postal_code,
            rua: a.street,
            bairro: a.neighborhood,
            cidade: a.city,
            estado: a.state.to_string(),
        }
    }
}

/// GET /address/{cep}
///
/// Fills the checkout address from a postal code.
#[utoipa::path(
    get,
    path = "/address/{cep}",
    params(("cep" = String, Path, description = "Postal code, with or without punctuation")),
    responses(
        (status = 200, description = "Address found", body = AddressResponse),
        (status = 400, description = "Not an eight-digit postal code"),
        (status = 404, description = "Unknown postal code"),
        (status = 502, description = "Lookup service unavailable"),
    ),
    tag = "checkout"
)]
pub async fn lookup(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let cep = normalize_postal_code(&path.into_inner())?;
    let address = state.addresses.resolve(&cep).await?;
    Ok(HttpResponse::Ok().json(AddressResponse::from(address)))
}
