use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::catalog::{Brand, BrandDraft, Category, CategoryDraft, ProductDraft};
use crate::domain::errors::DomainError;
use crate::domain::order::{insurance_label, parse_insurance, Order, OrderDraft};
use crate::domain::shipping::{PriceTable, ShippingOption, ShippingOptionDraft};
use crate::domain::state::StateCode;
use crate::schema::{categorias, frete_precos, fretes, marcas, pedidos, produtos};

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = pedidos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PedidoRow {
    pub id: i32,
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
    pub frete: BigDecimal,
    pub total_pedido: BigDecimal,
    pub seguro: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = pedidos)]
pub struct NewPedidoRow {
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
    pub frete: BigDecimal,
    pub total_pedido: BigDecimal,
    pub seguro: String,
    pub status: String,
}

/// Full replacement of an order. `status: None` leaves the column alone;
/// `complemento: Some(None)` clears it.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = pedidos)]
pub struct PedidoChangeset {
    pub nome: String,
    pub cpf: String,
    pub email: String,
    pub telefone: String,
    pub cep: String,
    pub rua: String,
    pub numero: String,
    pub complemento: Option<Option<String>>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub metodo_pagamento: String,
    pub frete: BigDecimal,
    pub total_pedido: BigDecimal,
    pub seguro: String,
    pub status: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&OrderDraft> for NewPedidoRow {
    fn from(d: &OrderDraft) -> Self {
        NewPedidoRow {
            nome: d.name.clone(),
            cpf: d.tax_id.clone(),
            email: d.email.clone(),
            telefone: d.phone.clone(),
            cep: d.postal_code.clone(),
            rua: d.street.clone(),
            numero: d.number.clone(),
            complemento: d.complement.clone(),
            bairro: d.neighborhood.clone(),
            cidade: d.city.clone(),
            estado: d.state.as_str().to_string(),
            metodo_pagamento: d.payment_method.as_str().to_string(),
            frete: d.shipping_cost.clone(),
            total_pedido: d.total.clone(),
            seguro: insurance_label(d.insured).to_string(),
            status: d.status.unwrap_or_default().as_str().to_string(),
        }
    }
}

impl From<&OrderDraft> for PedidoChangeset {
    fn from(d: &OrderDraft) -> Self {
        PedidoChangeset {
            nome: d.name.clone(),
            cpf: d.tax_id.clone(),
            email: d.email.clone(),
            telefone: d.phone.clone(),
            cep: d.postal_code.clone(),
            rua: d.street.clone(),
            numero: d.number.clone(),
            complemento: Some(d.complement.clone()),
            bairro: d.neighborhood.clone(),
            cidade: d.city.clone(),
            estado: d.state.as_str().to_string(),
            metodo_pagamento: d.payment_method.as_str().to_string(),
            frete: d.shipping_cost.clone(),
            total_pedido: d.total.clone(),
            seguro: insurance_label(d.insured).to_string(),
            status: d.status.map(|s| s.as_str().to_string()),
            updated_at: Utc::now(),
        }
    }
}

fn corrupt(table: &str, id: i32, column: &str) -> DomainError {
    DomainError::Persistence(format!("{} row {} has an unreadable {}", table, id, column))
}

impl TryFrom<PedidoRow> for Order {
    type Error = DomainError;

    fn try_from(row: PedidoRow) -> Result<Self, Self::Error> {
        let id = row.id;
        Ok(Order {
            id,
            state: row.estado.parse().map_err(|_| corrupt("pedidos", id, "estado"))?,
            payment_method: row
                .metodo_pagamento
                .parse()
                .map_err(|_| corrupt("pedidos", id, "metodo_pagamento"))?,
            insured: parse_insurance(row.seguro.as_deref())
                .map_err(|_| corrupt("pedidos", id, "seguro"))?,
            status: row.status.parse().map_err(|_| corrupt("pedidos", id, "status"))?,
            name: row.nome,
            tax_id: row.cpf,
            email: row.email,
            phone: row.telefone,
            postal_code: row.cep,
            street: row.rua,
            number: row.numero,
            complement: row.complemento,
            neighborhood: row.bairro,
            city: row.cidade,
            shipping_cost: row.frete,
            total: row.total_pedido,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ── Shipping ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = fretes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FreteRow {
    pub id: i32,
    pub nome: String,
    pub seguro: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = fretes)]
pub struct NewFreteRow {
    pub nome: String,
    pub seguro: BigDecimal,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = fretes)]
pub struct FreteChangeset {
    pub nome: String,
    pub seguro: BigDecimal,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, Identifiable, Associations)]
#[diesel(table_name = frete_precos)]
#[diesel(primary_key(frete_id, estado))]
#[diesel(belongs_to(FreteRow, foreign_key = frete_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FretePrecoRow {
    pub frete_id: i32,
    pub estado: String,
    pub valor: BigDecimal,
}

impl From<&ShippingOptionDraft> for NewFreteRow {
    fn from(d: &ShippingOptionDraft) -> Self {
        NewFreteRow {
            nome: d.name.clone(),
            seguro: d.insurance_percentage.clone(),
        }
    }
}

impl From<&ShippingOptionDraft> for FreteChangeset {
    fn from(d: &ShippingOptionDraft) -> Self {
        FreteChangeset {
            nome: d.name.clone(),
            seguro: d.insurance_percentage.clone(),
            updated_at: Utc::now(),
        }
    }
}

pub fn price_rows(frete_id: i32, prices: &PriceTable) -> Vec<FretePrecoRow> {
    prices
        .iter()
        .map(|(state, valor)| FretePrecoRow {
            frete_id,
            estado: state.as_str().to_string(),
            valor: valor.clone(),
        })
        .collect()
}

pub fn shipping_option(
    row: FreteRow,
    prices: Vec<FretePrecoRow>,
) -> Result<ShippingOption, DomainError> {
    let mut table = PriceTable::new();
    for price in prices {
        let state: StateCode = price
            .estado
            .parse()
            .map_err(|_| corrupt("frete_precos", row.id, "estado"))?;
        table.insert(state, price.valor);
    }
    Ok(ShippingOption {
        id: row.id,
        name: row.nome,
        prices: table,
        insurance_percentage: row.seguro,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = categorias)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoriaRow {
    pub id: i32,
    pub nome: String,
    pub imagem_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = categorias)]
pub struct NewCategoriaRow {
    pub nome: String,
    pub imagem_url: Option<String>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = categorias)]
#[diesel(treat_none_as_null = true)]
pub struct CategoriaChangeset {
    pub nome: String,
    pub imagem_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&CategoryDraft> for NewCategoriaRow {
    fn from(d: &CategoryDraft) -> Self {
        NewCategoriaRow {
            nome: d.name.clone(),
            imagem_url: d.image_url.clone(),
        }
    }
}

impl From<&CategoryDraft> for CategoriaChangeset {
    fn from(d: &CategoryDraft) -> Self {
        CategoriaChangeset {
            nome: d.name.clone(),
            imagem_url: d.image_url.clone(),
            updated_at: Utc::now(),
        }
    }
}

impl From<CategoriaRow> for Category {
    fn from(row: CategoriaRow) -> Self {
        Category {
            id: row.id,
            name: row.nome,
            image_url: row.imagem_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = marcas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MarcaRow {
    pub id: i32,
    pub nome: String,
    pub logo_url: Option<String>,
    pub ordem: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = marcas)]
pub struct NewMarcaRow {
    pub nome: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = marcas)]
#[diesel(treat_none_as_null = true)]
pub struct MarcaChangeset {
    pub nome: String,
    pub logo_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&BrandDraft> for NewMarcaRow {
    fn from(d: &BrandDraft) -> Self {
        NewMarcaRow {
            nome: d.name.clone(),
            logo_url: d.logo_url.clone(),
        }
    }
}

impl From<&BrandDraft> for MarcaChangeset {
    fn from(d: &BrandDraft) -> Self {
        MarcaChangeset {
            nome: d.name.clone(),
            logo_url: d.logo_url.clone(),
            updated_at: Utc::now(),
        }
    }
}

impl From<MarcaRow> for Brand {
    fn from(row: MarcaRow) -> Self {
        Brand {
            id: row.id,
            name: row.nome,
            logo_url: row.logo_url,
            position: row.ordem,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = produtos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProdutoRow {
    pub id: i32,
    pub nome: String,
    pub preco: BigDecimal,
    pub descricao: Option<String>,
    pub imagem_url: Option<String>,
    pub estoque: i32,
    pub id_categoria: i32,
    pub marca_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = produtos)]
pub struct NewProdutoRow {
    pub nome: String,
    pub preco: BigDecimal,
    pub descricao: Option<String>,
    pub imagem_url: Option<String>,
    pub estoque: i32,
    pub id_categoria: i32,
    pub marca_id: Option<i32>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = produtos)]
#[diesel(treat_none_as_null = true)]
pub struct ProdutoChangeset {
    pub nome: String,
    pub preco: BigDecimal,
    pub descricao: Option<String>,
    pub imagem_url: Option<String>,
    pub estoque: i32,
    pub id_categoria: i32,
    pub marca_id: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ProductDraft> for NewProdutoRow {
    fn from(d: &ProductDraft) -> Self {
        NewProdutoRow {
            nome: d.name.clone(),
            preco: d.price.clone(),
            descricao: d.description.clone(),
            imagem_url: d.image_url.clone(),
            estoque: d.stock,
            id_categoria: d.category_id,
            marca_id: d.brand_id,
        }
    }
}

impl From<&ProductDraft> for ProdutoChangeset {
    fn from(d: &ProductDraft) -> Self {
        ProdutoChangeset {
            nome: d.name.clone(),
            preco: d.price.clone(),
            descricao: d.description.clone(),
            imagem_url: d.image_url.clone(),
            estoque: d.stock,
            id_categoria: d.category_id,
            marca_id: d.brand_id,
            updated_at: Utc::now(),
        }
    }
}
