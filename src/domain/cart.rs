use bigdecimal::{BigDecimal, Zero};

use super::catalog::ProductId;
use super::errors::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity: i64,
}

impl CartLine {
    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * &BigDecimal::from(self.quantity)
    }
}

/// Lines keep insertion order; each product appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds `quantity` units, merging into an existing line for the same
    /// product. The unit price of an existing line is kept.
    pub fn add(
        &mut self,
        product_id: ProductId,
        name: &str,
        unit_price: BigDecimal,
        quantity: i64,
    ) -> Result<(), DomainError> {
        if quantity < 1 {
            return Err(DomainError::InvalidInput(format!(
                "quantity for product {} must be at least 1",
                product_id
            )));
        }
        if unit_price < BigDecimal::zero() {
            return Err(DomainError::InvalidInput(format!(
                "price for product {} is negative",
                product_id
            )));
        }

        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(quantity).ok_or_else(|| {
                    DomainError::InvalidInput(format!(
                        "quantity for product {} is too large",
                        product_id
                    ))
                })?;
            }
            None => self.lines.push(CartLine {
                product_id,
                name: name.to_string(),
                unit_price,
                quantity,
            }),
        }
        Ok(())
    }

    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// A quantity of zero or less removes the line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<(), DomainError> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(());
        }
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(DomainError::NotFound),
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn subtotal(&self) -> BigDecimal {
        self.lines
            .iter()
            .fold(BigDecimal::zero(), |acc, line| acc + line.line_total())
    }
}
