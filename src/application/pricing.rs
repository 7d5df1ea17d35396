use bigdecimal::{BigDecimal, Zero};

use crate::domain::cart::CartLine;
use crate::domain::errors::DomainError;
use crate::domain::shipping::{valid_percentage, ShippingOption};
use crate::domain::state::StateCode;

/// Checkout price breakdown. Amounts are exact; round them only when
/// rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub subtotal: BigDecimal,
    pub shipping_cost: BigDecimal,
    pub insurance_cost: BigDecimal,
    pub total: BigDecimal,
}

/// Pure shipping/insurance calculator.
#[derive(Debug, Clone, Copy)]
pub struct PricingEngine {
    fallback_state: StateCode,
}

impl PricingEngine {
    /// `fallback_state` is charged when an option has no price for the
    /// destination state.
    pub fn new(fallback_state: StateCode) -> Self {
        Self { fallback_state }
    }

    pub fn fallback_state(&self) -> StateCode {
        self.fallback_state
    }

    pub fn quote(
        &self,
        subtotal: &BigDecimal,
        state: &str,
        option: &ShippingOption,
        insurance_enabled: bool,
    ) -> Result<Quote, DomainError> {
        if *subtotal < BigDecimal::zero() {
            return Err(DomainError::InvalidInput("subtotal is negative".into()));
        }
        let state: StateCode = state.parse()?;
        if !valid_percentage(&option.insurance_percentage) {
            return Err(DomainError::InvalidInput(format!(
                "insurance percentage of '{}' is outside 0-100",
                option.name
            )));
        }

        let shipping_cost = option
            .price_for(state, self.fallback_state)
            .cloned()
            .ok_or_else(|| {
                DomainError::InvalidInput(format!(
                    "'{}' has no price for {} or {}",
                    option.name, state, self.fallback_state
                ))
            })?;

        let insurance_cost = if insurance_enabled {
            subtotal * &option.insurance_percentage / BigDecimal::from(100)
        } else {
            BigDecimal::zero()
        };

        let total = subtotal + &shipping_cost + &insurance_cost;

        Ok(Quote {
            subtotal: subtotal.clone(),
            shipping_cost,
            insurance_cost,
            total,
        })
    }

    /// Same as [`quote`](Self::quote), summing the subtotal from cart lines.
    pub fn quote_cart(
        &self,
        lines: &[CartLine],
        state: &str,
        option: &ShippingOption,
        insurance_enabled: bool,
    ) -> Result<Quote, DomainError> {
        if let Some(line) = lines.iter().find(|l| l.quantity < 1) {
            return Err(DomainError::InvalidInput(format!(
                "quantity for product {} must be at least 1",
                line.product_id
            )));
        }
        let subtotal = lines
            .iter()
            .fold(BigDecimal::zero(), |acc, line| acc + line.line_total());
        self.quote(&subtotal, state, option, insurance_enabled)
    }
}
