use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::checkout::QuoteRequest;
use crate::application::pricing::Quote;
use crate::domain::catalog::ProductId;
use crate::domain::shipping::ShippingOptionId;
use crate::errors::AppError;
use crate::state::AppState;

use super::money;

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuoteItem {
    pub produto_id: ProductId,
    pub quantidade: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuoteBody {
    pub itens: Vec<QuoteItem>,
    /// Destination state code
    pub estado: String,
    pub frete_id: ShippingOptionId,
    /// Whether shipping insurance was selected
    #[serde(default)]
    pub seguro: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    pub subtotal: String,
    pub frete: String,
    pub seguro: String,
    pub total: String,
}

impl From<&Quote> for QuoteResponse {
    fn from(q: &Quote) -> Self {
        QuoteResponse {
            subtotal: money(&q.subtotal),
            frete: money(&q.shipping_cost),
            seguro: money(&q.insurance_cost),
            total: money(&q.total),
        }
    }
}

/// POST /checkout/quote
///
/// Prices the cart with current catalog prices. Nothing is stored.
#[utoipa::path(
    post,
    path = "/checkout/quote",
    request_body = QuoteBody,
    responses(
        (status = 200, description = "Price breakdown", body = QuoteResponse),
        (status = 400, description = "Empty cart, bad quantity, unknown state or no price"),
        (status = 404, description = "Unknown product or shipping option"),
    ),
    tag = "checkout"
)]
pub async fn quote(
    state: web::Data<AppState>,
    body: web::Json<QuoteBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let request = QuoteRequest {
        items: body
            .itens
            .iter()
            .map(|i| (i.produto_id, i.quantidade))
            .collect(),
        state: body.estado,
        shipping_option_id: body.frete_id,
        insured: body.seguro,
    };
    let quote = web::block(move || state.checkout.quote(&request)).await??;
    Ok(HttpResponse::Ok().json(QuoteResponse::from(&quote)))
}
