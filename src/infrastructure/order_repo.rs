use chrono::Utc;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderDraft, OrderId, OrderStatus};
use crate::domain::ports::OrderRepository;
use crate::schema::pedidos;

use super::models::{NewPedidoRow, PedidoChangeset, PedidoRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::NotFound => DomainError::NotFound,
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation | DatabaseErrorKind::UniqueViolation,
                info,
            ) => DomainError::InvalidInput(info.message().to_string()),
            other => DomainError::Persistence(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_order(row: Option<PedidoRow>) -> Result<Option<Order>, DomainError> {
    row.map(Order::try_from).transpose()
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, draft: &OrderDraft) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        let row: PedidoRow = diesel::insert_into(pedidos::table)
            .values(&NewPedidoRow::from(draft))
            .returning(PedidoRow::as_returning())
            .get_result(&mut conn)?;

        Order::try_from(row)
    }

    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = pedidos::table
            .find(id)
            .select(PedidoRow::as_select())
            .first(&mut conn)
            .optional()?;

        to_order(row)
    }

    fn list(&self) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        pedidos::table
            .select(PedidoRow::as_select())
            .order((pedidos::created_at.desc(), pedidos::id.desc()))
            .load::<PedidoRow>(&mut conn)?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }

    fn update(&self, id: OrderId, draft: &OrderDraft) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(pedidos::table.find(id))
            .set(&PedidoChangeset::from(draft))
            .returning(PedidoRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        to_order(row)
    }

    fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(pedidos::table.find(id))
            .set((
                pedidos::status.eq(status.as_str()),
                pedidos::updated_at.eq(Utc::now()),
            ))
            .returning(PedidoRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        to_order(row)
    }

    fn delete(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::delete(pedidos::table.find(id))
            .returning(PedidoRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        to_order(row)
    }
}
