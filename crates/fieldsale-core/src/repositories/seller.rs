//! Seller-side catalog and order placement.

use crate::{ClientError, OperationSlot, ResultEnvelope};
use fieldsale_api::{Category, CommerceApi, Confirmation, Product, SellerOrder};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Catalog browsing and order placement for sellers.
pub struct SellerRepository {
    api: Arc<dyn CommerceApi>,
    categories: OperationSlot<Vec<Category>>,
    seller_products: OperationSlot<Vec<Product>>,
    place_order: OperationSlot<Confirmation>,
}

impl SellerRepository {
    pub fn new(api: Arc<dyn CommerceApi>) -> Self {
        Self {
            api,
            categories: OperationSlot::new("list_categories"),
            seller_products: OperationSlot::new("list_seller_products"),
            place_order: OperationSlot::new("place_seller_order"),
        }
    }

    pub fn list_categories(&self) -> impl Future<Output = ResultEnvelope<Vec<Category>>> + '_ {
        self.categories.run(async move {
            self.api
                .list_categories()
                .await
                .map_err(ClientError::from)
        })
    }

    /// Products a seller can offer within one category.
    pub fn list_seller_products(
        &self,
        category_id: i64,
    ) -> impl Future<Output = ResultEnvelope<Vec<Product>>> + '_ {
        self.seller_products.run(async move {
            self.api
                .list_seller_products(category_id)
                .await
                .map_err(ClientError::from)
        })
    }

    /// Place an order on behalf of a customer.
    pub fn place_seller_order(
        &self,
        order: SellerOrder,
    ) -> impl Future<Output = ResultEnvelope<Confirmation>> + '_ {
        self.place_order.run(async move {
            self.api
                .place_seller_order(&order)
                .await
                .map_err(ClientError::from)
                .inspect(|_| {
                    info!(
                        customer_id = order.customer_id,
                        seller_id = order.seller_id,
                        items = order.items.len(),
                        "Seller order placed"
                    )
                })
        })
    }

    pub fn categories_state(&self) -> &OperationSlot<Vec<Category>> {
        &self.categories
    }

    pub fn seller_products_state(&self) -> &OperationSlot<Vec<Product>> {
        &self.seller_products
    }

    pub fn place_order_state(&self) -> &OperationSlot<Confirmation> {
        &self.place_order
    }
}
