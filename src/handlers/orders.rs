use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::auth::AdminAuth;
use crate::domain::order::{insurance_label, Order, OrderId, OrderSubmission};
use crate::errors::AppError;
use crate::state::AppState;

use super::{amount_text, money, timestamp};

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Checkout form. Every field is optional here so that a missing one is
/// reported by name instead of as a JSON error.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderRequest {
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub cep: Option<String>,
    pub rua: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    /// Two-letter state code, e.g. "SP"
    pub estado: Option<String>,
    /// cartao_credito, cartao_debito, pix, boleto or dinheiro
    pub metodo_pagamento: Option<String>,
    /// Shipping cost, number or decimal string
    #[schema(value_type = Option<f64>)]
    pub frete: Option<Value>,
    /// Order total, number or decimal string
    #[schema(value_type = Option<f64>)]
    pub total_pedido: Option<Value>,
    /// "sim" or "não"; omitted means not insured
    pub seguro: Option<String>,
    /// Only honoured on back-office routes
    pub status: Option<String>,
}

impl From<OrderRequest> for OrderSubmission {
    fn from(r: OrderRequest) -> Self {
        OrderSubmission {
            name: r.nome,
            tax_id: r.cpf,
            email: r.email,
            phone: r.telefone,
            postal_code: r.cep,
            street: r.rua,
            number: r.numero,
            complement: r.complemento,
            neighborhood: r.bairro,
            city: r.cidade,
            state: r.estado,
            payment_method: r.metodo_pagamento,
            shipping_cost: amount_text(r.frete),
            total: amount_text(r.total_pedido),
            insurance: r.seguro,
            status: r.status,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusRequest {
    /// pendente, confirmado, enviado, entregue or cancelado
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: OrderId,
    pub nome: String,
    pub cpf: String,
    pub email: String,
    pub telefone: String,
    pub cep: String,
    pub rua: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub metodo_pagamento: String,
    pub frete: String,
    pub total_pedido: String,
    pub seguro: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Order> for OrderResponse {
    fn from(o: &Order) -> Self {
        OrderResponse {
            id: o.id,
            nome: o.name.clone(),
            cpf: o.tax_id.clone(),
            email: o.email.clone(),
            telefone: o.phone.clone(),
            cep: o.postal_code.clone(),
            rua: o.street.clone(),
            numero: o.number.clone(),
            complemento: o.complement.clone(),
            bairro: o.neighborhood.clone(),
            cidade: o.city.clone(),
            estado: o.state.to_string(),
            metodo_pagamento: o.payment_method.as_str().to_string(),
            frete: money(&o.shipping_cost),
            total_pedido: money(&o.total),
            seguro: insurance_label(o.insured).to_string(),
            status: o.status.to_string(),
            created_at: timestamp(&o.created_at),
            updated_at: timestamp(&o.updated_at),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Storefront checkout. The order always starts out `pendente`.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Missing or invalid field"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn submit_order(
    state: web::Data<AppState>,
    body: web::Json<OrderRequest>,
) -> Result<HttpResponse, AppError> {
    let submission = OrderSubmission::from(body.into_inner());
    let order = web::block(move || state.orders.submit_order(submission)).await??;
    Ok(HttpResponse::Created().json(OrderResponse::from(&order)))
}

/// POST /admin/orders
#[utoipa::path(
    post,
    path = "/admin/orders",
    request_body = OrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Missing or invalid field"),
        (status = 401, description = "Missing or wrong admin token"),
    ),
    security(("admin_token" = [])),
    tag = "orders"
)]
pub async fn create_order(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    body: web::Json<OrderRequest>,
) -> Result<HttpResponse, AppError> {
    let submission = OrderSubmission::from(body.into_inner());
    let order = web::block(move || state.orders.create_order(submission)).await??;
    Ok(HttpResponse::Created().json(OrderResponse::from(&order)))
}

/// GET /orders
///
/// Every order, newest first.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderResponse]),
        (status = 401, description = "Missing or wrong admin token"),
    ),
    security(("admin_token" = [])),
    tag = "orders"
)]
pub async fn list_orders(
    _admin: AdminAuth,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || state.orders.list_orders()).await??;
    let body: Vec<OrderResponse> = orders.iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "Order not found"),
    ),
    security(("admin_token" = [])),
    tag = "orders"
)]
pub async fn get_order(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<OrderId>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let order = web::block(move || state.orders.get_order(id)).await??;
    Ok(HttpResponse::Ok().json(OrderResponse::from(&order)))
}

/// PUT /orders/{id}
///
/// Replaces the whole order. Without `status` the current one is kept.
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Missing or invalid field"),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "Order not found"),
    ),
    security(("admin_token" = [])),
    tag = "orders"
)]
pub async fn update_order(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<OrderId>,
    body: web::Json<OrderRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let submission = OrderSubmission::from(body.into_inner());
    let order = web::block(move || state.orders.update_order(id, submission)).await??;
    Ok(HttpResponse::Ok().json(OrderResponse::from(&order)))
}

/// PATCH /orders/{id}/status
#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    params(("id" = i32, Path, description = "Order id")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Status changed", body = OrderResponse),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "Order not found"),
    ),
    security(("admin_token" = [])),
    tag = "orders"
)]
pub async fn update_order_status(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<OrderId>,
    body: web::Json<StatusRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let status = body.into_inner().status;
    let order = web::block(move || state.orders.update_status(id, &status)).await??;
    Ok(HttpResponse::Ok().json(OrderResponse::from(&order)))
}

/// DELETE /orders/{id}
///
/// Returns the deleted order.
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted", body = OrderResponse),
        (status = 401, description = "Missing or wrong admin token"),
        (status = 404, description = "Order not found"),
    ),
    security(("admin_token" = [])),
    tag = "orders"
)]
pub async fn delete_order(
    _admin: AdminAuth,
    state: web::Data<AppState>,
    path: web::Path<OrderId>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let order = web::block(move || state.orders.delete_order(id)).await??;
    Ok(HttpResponse::Ok().json(OrderResponse::from(&order)))
}
