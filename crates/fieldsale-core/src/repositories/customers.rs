//! Customer directory.

use crate::{ClientError, OperationSlot, ResultEnvelope};
use fieldsale_api::{CommerceApi, Customer};
use std::future::Future;
use std::sync::Arc;

/// Customer listing.
pub struct CustomerRepository {
    api: Arc<dyn CommerceApi>,
    customers: OperationSlot<Vec<Customer>>,
}

impl CustomerRepository {
    pub fn new(api: Arc<dyn CommerceApi>) -> Self {
        Self {
            api,
            customers: OperationSlot::new("list_customers"),
        }
    }

    pub fn list_customers(&self) -> impl Future<Output = ResultEnvelope<Vec<Customer>>> + '_ {
        self.customers
            .run(async move { self.api.list_customers().await.map_err(ClientError::from) })
    }

    pub fn customers_state(&self) -> &OperationSlot<Vec<Customer>> {
        &self.customers
    }
}
