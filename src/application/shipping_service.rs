use log::info;

use crate::domain::errors::DomainError;
use crate::domain::ports::ShippingRepository;
use crate::domain::shipping::{ShippingOption, ShippingOptionDraft, ShippingOptionId};

pub struct ShippingService<R> {
    repo: R,
}

impl<R: ShippingRepository> ShippingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_options(&self) -> Result<Vec<ShippingOption>, DomainError> {
        self.repo.list()
    }

    pub fn get_option(&self, id: ShippingOptionId) -> Result<ShippingOption, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound)
    }

    pub fn create_option(&self, draft: ShippingOptionDraft) -> Result<ShippingOption, DomainError> {
        let option = self.repo.create(&draft)?;
        info!(
            "shipping option {} '{}' created with {} state prices",
            option.id,
            option.name,
            option.prices.len()
        );
        Ok(option)
    }

    pub fn update_option(
        &self,
        id: ShippingOptionId,
        draft: ShippingOptionDraft,
    ) -> Result<ShippingOption, DomainError> {
        let option = self.repo.update(id, &draft)?.ok_or(DomainError::NotFound)?;
        info!("shipping option {} updated", id);
        Ok(option)
    }

    pub fn delete_option(&self, id: ShippingOptionId) -> Result<(), DomainError> {
        if !self.repo.delete(id)? {
            return Err(DomainError::NotFound);
        }
        info!("shipping option {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::StateCode;
    use crate::test_support::InMemoryShipping;

    fn draft(name: &str) -> ShippingOptionDraft {
        ShippingOptionDraft::parse(Some(name), Some("1.8"), [("SP", "15.00"), ("rj", "22.50")])
            .unwrap()
    }

    #[test]
    fn list_is_by_name_with_full_price_tables() {
        let svc = ShippingService::new(InMemoryShipping::default());
        svc.create_option(draft("SEDEX")).unwrap();
        svc.create_option(draft("PAC")).unwrap();
        let options = svc.list_options().unwrap();
        let names: Vec<_> = options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["PAC", "SEDEX"]);
        assert_eq!(options[0].prices.len(), 2);
        assert!(options[0].prices.contains_key(&StateCode::Rj));
    }

    #[test]
    fn update_replaces_the_price_table() {
        let svc = ShippingService::new(InMemoryShipping::default());
        let pac = svc.create_option(draft("PAC")).unwrap();
        let replacement =
            ShippingOptionDraft::parse(Some("PAC"), None, [("BA", "30.00")]).unwrap();
        let updated = svc.update_option(pac.id, replacement).unwrap();
        assert_eq!(updated.prices.keys().copied().collect::<Vec<_>>(), vec![StateCode::Ba]);
        assert_eq!(updated.insurance_percentage, bigdecimal::BigDecimal::from(0));
    }

    #[test]
    fn missing_option_is_not_found() {
        let svc = ShippingService::new(InMemoryShipping::default());
        assert!(matches!(svc.get_option(7), Err(DomainError::NotFound)));
        assert!(matches!(svc.delete_option(7), Err(DomainError::NotFound)));
        assert!(matches!(svc.update_option(7, draft("PAC")), Err(DomainError::NotFound)));
    }
}
