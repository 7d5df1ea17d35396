use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use super::errors::DomainError;
use super::money::parse_amount;
use super::state::StateCode;

pub type OrderId = i32;

pub const INSURED: &str = "sim";
pub const NOT_INSURED: &str = "não";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pendente",
            OrderStatus::Confirmed => "confirmado",
            OrderStatus::Shipped => "enviado",
            OrderStatus::Delivered => "entregue",
            OrderStatus::Cancelled => "cancelado",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    // Older rows were written capitalised ("Pendente").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendente" => Ok(OrderStatus::Pending),
            "confirmado" => Ok(OrderStatus::Confirmed),
            "enviado" => Ok(OrderStatus::Shipped),
            "entregue" => Ok(OrderStatus::Delivered),
            "cancelado" => Ok(OrderStatus::Cancelled),
            _ => Err(DomainError::validation("status")),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Pix,
    Boleto,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "cartao_credito",
            PaymentMethod::DebitCard => "cartao_debito",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Boleto => "boleto",
            PaymentMethod::Cash => "dinheiro",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cartao_credito" => Ok(PaymentMethod::CreditCard),
            "cartao_debito" => Ok(PaymentMethod::DebitCard),
            "pix" => Ok(PaymentMethod::Pix),
            "boleto" => Ok(PaymentMethod::Boleto),
            "dinheiro" => Ok(PaymentMethod::Cash),
            _ => Err(DomainError::validation("metodo_pagamento")),
        }
    }
}

/// Storage/wire label for the insurance flag.
pub fn insurance_label(insured: bool) -> &'static str {
    if insured {
        INSURED
    } else {
        NOT_INSURED
    }
}

/// Reads the stored insurance sentinel. `None` (column never written) means
/// not insured.
pub fn parse_insurance(raw: Option<&str>) -> Result<bool, DomainError> {
    match raw.map(|s| s.trim().to_lowercase()) {
        None => Ok(false),
        Some(s) if s.is_empty() => Ok(false),
        Some(s) if s == INSURED => Ok(true),
        Some(s) if s == NOT_INSURED || s == "nao" => Ok(false),
        Some(_) => Err(DomainError::validation("seguro")),
    }
}

/// Raw order form as received from a caller; nothing has been checked yet.
#[derive(Debug, Clone, Default)]
pub struct OrderSubmission {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub payment_method: Option<String>,
    pub shipping_cost: Option<String>,
    pub total: Option<String>,
    pub insurance: Option<String>,
    pub status: Option<String>,
}

/// A validated order, ready to hand to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub name: String,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
    pub postal_code: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: StateCode,
    pub payment_method: PaymentMethod,
    pub shipping_cost: BigDecimal,
    pub total: BigDecimal,
    pub insured: bool,
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
    pub postal_code: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: StateCode,
    pub payment_method: PaymentMethod,
    pub shipping_cost: BigDecimal,
    pub total: BigDecimal,
    pub insured: bool,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Non-blank and no longer than its `pedidos` column (`max` characters).
fn required(field: &str, value: Option<String>, max: usize) -> Result<String, DomainError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v.chars().count() <= max)
        .ok_or_else(|| DomainError::validation(field))
}

impl OrderSubmission {
    /// Checks fields in a fixed order and reports the first failure by its
    /// wire name.
    pub fn validate(self) -> Result<OrderDraft, DomainError> {
        let name = required("nome", self.name, 200)?;
        let tax_id = required("cpf", self.tax_id, 14)?;
        let email = required("email", self.email, 255)?;
        if !email.contains('@') {
            return Err(DomainError::validation("email"));
        }
        let phone = required("telefone", self.phone, 20)?;
        let postal_code = required("cep", self.postal_code, 10)?;
        let street = required("rua", self.street, 255)?;
        let number = required("numero", self.number, 20)?;
        let neighborhood = required("bairro", self.neighborhood, 100)?;
        let city = required("cidade", self.city, 100)?;
        let state = required("estado", self.state, 2)?
            .parse::<StateCode>()
            .map_err(|_| DomainError::validation("estado"))?;
        let payment_method = required("metodo_pagamento", self.payment_method, 50)?
            .parse::<PaymentMethod>()?;
        let shipping_cost = parse_amount("frete", self.shipping_cost.as_deref())?;
        let total = parse_amount("total_pedido", self.total.as_deref())?;
        let insured = parse_insurance(self.insurance.as_deref())?;
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<OrderStatus>()?),
        };
        let complement = self
            .complement
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if complement.as_ref().is_some_and(|c| c.chars().count() > 100) {
            return Err(DomainError::validation("complemento"));
        }

        Ok(OrderDraft {
            name,
            tax_id,
            email,
            phone,
            postal_code,
            street,
            number,
            complement,
            neighborhood,
            city,
            state,
            payment_method,
            shipping_cost,
            total,
            insured,
            status,
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::OrderSubmission;

    pub fn submission() -> OrderSubmission {
        OrderSubmission {
            name: Some("Maria Souza".into()),
            tax_id: Some("12345678901".into()),
            email: Some("maria@example.com".into()),
            phone: Some("11987654321".into()),
            postal_code: Some("01310100".into()),
            street: Some("Avenida Paulista".into()),
            number: Some("1000".into()),
            complement: Some("apto 12".into()),
            neighborhood: Some("Bela Vista".into()),
            city: Some("São Paulo".into()),
            state: Some("SP".into()),
            payment_method: Some("pix".into()),
            shipping_cost: Some("15.00".into()),
            total: Some("116.80".into()),
            insurance: Some("sim".into()),
            status: None,
        }
    }
}
