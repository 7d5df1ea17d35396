use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ShippingRepository;
use crate::domain::shipping::{ShippingOption, ShippingOptionDraft, ShippingOptionId};
use crate::schema::{frete_precos, fretes};

use super::models::{
    price_rows, shipping_option, FreteChangeset, FretePrecoRow, FreteRow, NewFreteRow,
};

pub struct DieselShippingRepository {
    pool: DbPool,
}

impl DieselShippingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn insert_prices(conn: &mut PgConnection, rows: &[FretePrecoRow]) -> Result<(), DomainError> {
    if !rows.is_empty() {
        diesel::insert_into(frete_precos::table)
            .values(rows)
            .execute(conn)?;
    }
    Ok(())
}

impl ShippingRepository for DieselShippingRepository {
    fn list(&self) -> Result<Vec<ShippingOption>, DomainError> {
        let mut conn = self.pool.get()?;

        let options = fretes::table
            .select(FreteRow::as_select())
            .order((fretes::nome.asc(), fretes::id.asc()))
            .load::<FreteRow>(&mut conn)?;
        let prices = FretePrecoRow::belonging_to(&options)
            .select(FretePrecoRow::as_select())
            .load::<FretePrecoRow>(&mut conn)?
            .grouped_by(&options);

        options
            .into_iter()
            .zip(prices)
            .map(|(option, prices)| shipping_option(option, prices))
            .collect()
    }

    fn find_by_id(&self, id: ShippingOptionId) -> Result<Option<ShippingOption>, DomainError> {
        let mut conn = self.pool.get()?;

        let Some(option) = fretes::table
            .find(id)
            .select(FreteRow::as_select())
            .first::<FreteRow>(&mut conn)
            .optional()?
        else {
            return Ok(None);
        };
        let prices = FretePrecoRow::belonging_to(&option)
            .select(FretePrecoRow::as_select())
            .load::<FretePrecoRow>(&mut conn)?;

        shipping_option(option, prices).map(Some)
    }

    fn create(&self, draft: &ShippingOptionDraft) -> Result<ShippingOption, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let option: FreteRow = diesel::insert_into(fretes::table)
                .values(&NewFreteRow::from(draft))
                .returning(FreteRow::as_returning())
                .get_result(conn)?;

            let prices = price_rows(option.id, &draft.prices);
            insert_prices(conn, &prices)?;

            shipping_option(option, prices)
        })
    }

    fn update(
        &self,
        id: ShippingOptionId,
        draft: &ShippingOptionDraft,
    ) -> Result<Option<ShippingOption>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let Some(option) = diesel::update(fretes::table.find(id))
                .set(&FreteChangeset::from(draft))
                .returning(FreteRow::as_returning())
                .get_result::<FreteRow>(conn)
                .optional()?
            else {
                return Ok(None);
            };

            // The price table is replaced wholesale.
            diesel::delete(frete_precos::table.filter(frete_precos::frete_id.eq(id)))
                .execute(conn)?;
            let prices = price_rows(id, &draft.prices);
            insert_prices(conn, &prices)?;

            shipping_option(option, prices).map(Some)
        })
    }

    fn delete(&self, id: ShippingOptionId) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        // Price rows go with it (ON DELETE CASCADE).
        let deleted = diesel::delete(fretes::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use diesel::prelude::*;

    use super::DieselShippingRepository;
    use crate::domain::ports::ShippingRepository;
    use crate::domain::shipping::ShippingOptionDraft;
    use crate::domain::state::StateCode;
    use crate::infrastructure::test_db::setup_db;
    use crate::schema::frete_precos;

    fn pac() -> ShippingOptionDraft {
        ShippingOptionDraft::parse(Some("PAC"), Some("1.8"), [("SP", "15.00"), ("RJ", "22.50")])
            .unwrap()
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn create_and_list_carry_the_price_table() {
        let (_container, pool) = setup_db().await;
        let repo = DieselShippingRepository::new(pool);
        repo.create(&ShippingOptionDraft::parse(Some("SEDEX"), None, [("SP", "30")]).unwrap())
            .unwrap();
        let created = repo.create(&pac()).expect("create failed");

        let options = repo.list().expect("list failed");
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].name, "PAC");
        assert_eq!(options[0], created);
        assert_eq!(
            options[0].prices.get(&StateCode::Rj),
            Some(&BigDecimal::from_str("22.50").unwrap())
        );
        assert_eq!(options[1].prices.len(), 1);
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn update_replaces_prices_and_delete_cascades() {
        let (_container, pool) = setup_db().await;
        let repo = DieselShippingRepository::new(pool.clone());
        let created = repo.create(&pac()).unwrap();

        let replacement = ShippingOptionDraft::parse(Some("PAC"), Some("2"), [("BA", "31.90")])
            .unwrap();
        let updated = repo
            .update(created.id, &replacement)
            .unwrap()
            .expect("option should exist");
        assert_eq!(updated.prices.keys().copied().collect::<Vec<_>>(), vec![StateCode::Ba]);

        let found = repo.find_by_id(created.id).unwrap().expect("option should exist");
        assert_eq!(found.prices, updated.prices);

        assert!(repo.delete(created.id).unwrap());
        assert!(!repo.delete(created.id).unwrap());
        let mut conn = pool.get().unwrap();
        let left: i64 = frete_precos::table.count().get_result(&mut conn).unwrap();
        assert_eq!(left, 0);
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn update_of_missing_option_is_none() {
        let (_container, pool) = setup_db().await;
        let repo = DieselShippingRepository::new(pool);
        assert!(repo.update(99, &pac()).unwrap().is_none());
        assert!(repo.find_by_id(99).unwrap().is_none());
    }
}
