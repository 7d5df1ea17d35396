use std::collections::BTreeMap;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};

use super::errors::DomainError;
use super::money::{fits_numeric, AMOUNT_INTEGER_DIGITS};
use super::state::StateCode;

pub type ShippingOptionId = i32;

pub type PriceTable = BTreeMap<StateCode, BigDecimal>;

#[derive(Debug, Clone, PartialEq)]
pub struct ShippingOption {
    pub id: ShippingOptionId,
    pub name: String,
    pub prices: PriceTable,
    /// Percentage of the cart subtotal charged when insurance is enabled.
    pub insurance_percentage: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShippingOption {
    /// Price for `state`, or the price of `fallback` when the table has no
    /// entry for it.
    pub fn price_for(&self, state: StateCode, fallback: StateCode) -> Option<&BigDecimal> {
        self.prices
            .get(&state)
            .or_else(|| self.prices.get(&fallback))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShippingOptionDraft {
    pub name: String,
    pub prices: PriceTable,
    pub insurance_percentage: BigDecimal,
}

/// 0 to 100 with at most two decimals (`fretes.seguro` is `NUMERIC(5, 2)`).
pub(crate) fn valid_percentage(p: &BigDecimal) -> bool {
    fits_numeric(p, 3) && *p >= BigDecimal::zero() && *p <= BigDecimal::from(100)
}

impl ShippingOptionDraft {
    /// Builds a draft from untyped input. `prices` maps state codes to decimal
    /// strings.
    pub fn parse<'a>(
        name: Option<&str>,
        insurance_percentage: Option<&str>,
        prices: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, DomainError> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty() && n.chars().count() <= 100)
            .ok_or_else(|| DomainError::validation("nome"))?
            .to_string();

        let insurance_percentage = match insurance_percentage.map(str::trim) {
            None | Some("") => BigDecimal::zero(),
            Some(raw) => {
                BigDecimal::from_str(raw).map_err(|_| DomainError::validation("seguro"))?
            }
        };
        if !valid_percentage(&insurance_percentage) {
            return Err(DomainError::validation("seguro"));
        }

        let mut table = PriceTable::new();
        for (code, raw_price) in prices {
            let state = code
                .parse::<StateCode>()
                .map_err(|_| DomainError::validation("precos"))?;
            let price = BigDecimal::from_str(raw_price.trim())
                .map_err(|_| DomainError::validation("precos"))?;
            if !fits_numeric(&price, AMOUNT_INTEGER_DIGITS) || price < BigDecimal::zero() {
                return Err(DomainError::validation("precos"));
            }
            table.insert(state, price);
        }

        Ok(ShippingOptionDraft {
            name,
            prices: table,
            insurance_percentage,
        })
    }
}
