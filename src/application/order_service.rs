use log::info;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderId, OrderStatus, OrderSubmission};
use crate::domain::ports::OrderRepository;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Storefront checkout. Whatever status the caller sent, the order starts
    /// out pending.
    pub fn submit_order(&self, submission: OrderSubmission) -> Result<Order, DomainError> {
        let mut draft = submission.validate()?;
        draft.status = Some(OrderStatus::Pending);
        let order = self.repo.create(&draft)?;
        info!("order {} submitted ({}, total {})", order.id, order.state, order.total);
        Ok(order)
    }

    /// Back-office creation; the status may be chosen, pending otherwise.
    pub fn create_order(&self, submission: OrderSubmission) -> Result<Order, DomainError> {
        let mut draft = submission.validate()?;
        draft.status.get_or_insert(OrderStatus::Pending);
        let order = self.repo.create(&draft)?;
        info!("order {} created with status {}", order.id, order.status);
        Ok(order)
    }

    pub fn get_order(&self, id: OrderId) -> Result<Order, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound)
    }

    pub fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.repo.list()
    }

    /// Replaces every field. A missing status keeps the stored one.
    pub fn update_order(
        &self,
        id: OrderId,
        submission: OrderSubmission,
    ) -> Result<Order, DomainError> {
        let draft = submission.validate()?;
        let order = self.repo.update(id, &draft)?.ok_or(DomainError::NotFound)?;
        info!("order {} updated", id);
        Ok(order)
    }

    pub fn update_status(&self, id: OrderId, raw_status: &str) -> Result<Order, DomainError> {
        let status: OrderStatus = raw_status.parse()?;
        let order = self
            .repo
            .update_status(id, status)?
            .ok_or(DomainError::NotFound)?;
        info!("order {} moved to {}", id, status);
        Ok(order)
    }

    pub fn delete_order(&self, id: OrderId) -> Result<Order, DomainError> {
        let order = self.repo.delete(id)?.ok_or(DomainError::NotFound)?;
        info!("order {} deleted", id);
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::order::fixtures::submission;
    use crate::test_support::{FailingOrders, InMemoryOrders};

    fn service() -> (OrderService<Arc<InMemoryOrders>>, Arc<InMemoryOrders>) {
        let repo = Arc::new(InMemoryOrders::default());
        (OrderService::new(repo.clone()), repo)
    }

    #[test]
    fn submitted_order_is_pending_even_if_caller_says_otherwise() {
        let (svc, repo) = service();
        let mut s = submission();
        s.status = Some("entregue".into());
        let order = svc.submit_order(s).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.insured);
        assert_eq!(repo.writes(), 1);
    }

    #[test]
    fn submit_then_get_returns_the_draft_as_pending() {
        let (svc, _) = service();
        let draft = submission().validate().unwrap();
        let created = svc.submit_order(submission()).unwrap();
        let fetched = svc.get_order(created.id).unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.name, draft.name);
        assert_eq!(fetched.tax_id, draft.tax_id);
        assert_eq!(fetched.email, draft.email);
        assert_eq!(fetched.phone, draft.phone);
        assert_eq!(fetched.postal_code, draft.postal_code);
        assert_eq!(fetched.street, draft.street);
        assert_eq!(fetched.number, draft.number);
        assert_eq!(fetched.complement, draft.complement);
        assert_eq!(fetched.neighborhood, draft.neighborhood);
        assert_eq!(fetched.city, draft.city);
        assert_eq!(fetched.state, draft.state);
        assert_eq!(fetched.payment_method, draft.payment_method);
        assert_eq!(fetched.shipping_cost, draft.shipping_cost);
        assert_eq!(fetched.total, draft.total);
        assert_eq!(fetched.insured, draft.insured);
        assert_eq!(fetched.status, OrderStatus::Pending);
        assert!(fetched.id > 0);
        assert!(fetched.updated_at >= fetched.created_at);
    }

    #[test]
    fn store_failure_is_reported_after_a_single_attempt() {
        let repo = Arc::new(FailingOrders::default());
        let svc = OrderService::new(repo.clone());
        let err = svc.submit_order(submission()).unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
        assert_eq!(repo.attempts(), 1);
    }

    #[test]
    fn invalid_submission_never_reaches_the_store() {
        let (svc, repo) = service();
        let mut s = submission();
        s.email = None;
        let err = svc.submit_order(s).unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref f) if f == "email"));
        assert_eq!(repo.writes(), 0);
    }

    #[test]
    fn admin_create_keeps_requested_status() {
        let (svc, _) = service();
        let mut s = submission();
        s.status = Some("Confirmado".into());
        assert_eq!(svc.create_order(s).unwrap().status, OrderStatus::Confirmed);
        assert_eq!(svc.create_order(submission()).unwrap().status, OrderStatus::Pending);
    }

    #[test]
    fn status_update_changes_status_and_timestamp() {
        let (svc, _) = service();
        let order = svc.submit_order(submission()).unwrap();
        let updated = svc.update_status(order.id, "enviado").unwrap();
        assert_eq!(updated.status, OrderStatus::Shipped);
        assert!(updated.updated_at >= order.updated_at);
        assert_eq!(updated.total, order.total);
    }

    #[test]
    fn status_update_rejects_unknown_status_and_missing_order() {
        let (svc, repo) = service();
        let order = svc.submit_order(submission()).unwrap();
        assert!(matches!(
            svc.update_status(order.id, "perdido"),
            Err(DomainError::Validation(f)) if f == "status"
        ));
        assert!(matches!(
            svc.update_status(order.id + 100, "enviado"),
            Err(DomainError::NotFound)
        ));
        assert_eq!(repo.writes(), 1);
    }

    #[test]
    fn full_update_without_status_keeps_current_status() {
        let (svc, _) = service();
        let order = svc.submit_order(submission()).unwrap();
        svc.update_status(order.id, "confirmado").unwrap();

        let mut s = submission();
        s.city = Some("Campinas".into());
        let updated = svc.update_order(order.id, s).unwrap();
        assert_eq!(updated.city, "Campinas");
        assert_eq!(updated.status, OrderStatus::Confirmed);
    }

    #[test]
    fn delete_returns_the_row_then_not_found() {
        let (svc, _) = service();
        let order = svc.submit_order(submission()).unwrap();
        assert_eq!(svc.delete_order(order.id).unwrap().id, order.id);
        assert!(matches!(svc.delete_order(order.id), Err(DomainError::NotFound)));
        assert!(matches!(svc.get_order(order.id), Err(DomainError::NotFound)));
    }

    #[test]
    fn list_is_newest_first() {
        let (svc, _) = service();
        let first = svc.submit_order(submission()).unwrap();
        let second = svc.submit_order(submission()).unwrap();
        let ids: Vec<_> = svc.list_orders().unwrap().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
