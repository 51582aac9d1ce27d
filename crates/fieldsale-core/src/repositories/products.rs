//! Product catalog.

use crate::{ClientError, OperationSlot, ResultEnvelope};
use fieldsale_api::{CommerceApi, Product};
use std::future::Future;
use std::sync::Arc;

/// Product listing.
pub struct ProductRepository {
    api: Arc<dyn CommerceApi>,
    products: OperationSlot<Vec<Product>>,
}

impl ProductRepository {
    pub fn new(api: Arc<dyn CommerceApi>) -> Self {
        Self {
            api,
            products: OperationSlot::new("list_products"),
        }
    }

    pub fn list_products(&self) -> impl Future<Output = ResultEnvelope<Vec<Product>>> + '_ {
        self.products
            .run(async move { self.api.list_products().await.map_err(ClientError::from) })
    }

    pub fn products_state(&self) -> &OperationSlot<Vec<Product>> {
        &self.products
    }
}
