//! Seller visits to customers.

use crate::{ClientError, OperationSlot, ResultEnvelope};
use fieldsale_api::{CommerceApi, Confirmation, Visit};
use std::future::Future;
use std::sync::Arc;

/// Visit history and registration.
pub struct VisitRepository {
    api: Arc<dyn CommerceApi>,
    visits: OperationSlot<Vec<Visit>>,
    register_visit: OperationSlot<Confirmation>,
}

impl VisitRepository {
    pub fn new(api: Arc<dyn CommerceApi>) -> Self {
        Self {
            api,
            visits: OperationSlot::new("list_visits"),
            register_visit: OperationSlot::new("register_visit"),
        }
    }

    /// Visits recorded for one customer.
    pub fn list_visits(
        &self,
        customer_id: i64,
    ) -> impl Future<Output = ResultEnvelope<Vec<Visit>>> + '_ {
        self.visits.run(async move {
            self.api
                .list_visits(customer_id)
                .await
                .map_err(ClientError::from)
        })
    }

    /// Record a visit; resolves to the server's acknowledgement.
    pub fn register_visit(
        &self,
        visit: Visit,
    ) -> impl Future<Output = ResultEnvelope<Confirmation>> + '_ {
        self.register_visit.run(async move {
            self.api
                .register_visit(&visit)
                .await
                .map_err(ClientError::from)
        })
    }

    pub fn visits_state(&self) -> &OperationSlot<Vec<Visit>> {
        &self.visits
    }

    pub fn register_visit_state(&self) -> &OperationSlot<Confirmation> {
        &self.register_visit
    }
}
