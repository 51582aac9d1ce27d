//! Orders and delivery planning.

use crate::delivery::filter_for_delivery;
use crate::{ClientError, ClientResult, OperationSlot, ResultEnvelope};
use chrono::{Local, NaiveDate};
use fieldsale_api::{CommerceApi, Order};
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Order operations; delivery planning filters the full order list.
pub struct OrderRepository {
    api: Arc<dyn CommerceApi>,
    orders: OperationSlot<Vec<Order>>,
    create_order: OperationSlot<Order>,
    customer_orders: OperationSlot<Vec<Order>>,
    delivery: OperationSlot<Vec<Order>>,
}

impl OrderRepository {
    pub fn new(api: Arc<dyn CommerceApi>) -> Self {
        Self {
            api,
            orders: OperationSlot::new("list_orders"),
            create_order: OperationSlot::new("create_order"),
            customer_orders: OperationSlot::new("list_customer_orders"),
            delivery: OperationSlot::new("orders_for_delivery"),
        }
    }

    /// All orders visible to the signed-in user.
    pub fn list_orders(&self) -> impl Future<Output = ResultEnvelope<Vec<Order>>> + '_ {
        self.orders
            .run(async move { self.api.list_orders().await.map_err(ClientError::from) })
    }

    /// Submit a new order; resolves to the order as the server stored it.
    pub fn create_order(&self, order: Order) -> impl Future<Output = ResultEnvelope<Order>> + '_ {
        self.create_order.run(async move {
            self.api
                .create_order(&order)
                .await
                .map_err(ClientError::from)
        })
    }

    pub fn list_customer_orders(
        &self,
        customer_id: i64,
    ) -> impl Future<Output = ResultEnvelope<Vec<Order>>> + '_ {
        self.customer_orders.run(async move {
            self.api
                .list_customer_orders(customer_id)
                .await
                .map_err(ClientError::from)
        })
    }

    /// Orders still to be delivered on or after `today`, in server order.
    ///
    /// A single malformed order date fails the whole operation.
    pub fn orders_for_delivery(
        &self,
        today: NaiveDate,
    ) -> impl Future<Output = ResultEnvelope<Vec<Order>>> + '_ {
        self.delivery
            .run(async move { self.deliverable_orders(today).await })
    }

    async fn deliverable_orders(&self, today: NaiveDate) -> ClientResult<Vec<Order>> {
        let orders = self.api.list_orders().await?;
        let total = orders.len();
        let eligible = filter_for_delivery(orders, today)?;
        debug!(total, eligible = eligible.len(), %today, "Filtered orders for delivery");
        Ok(eligible)
    }

    /// [`orders_for_delivery`](Self::orders_for_delivery) against the local date.
    pub fn orders_for_delivery_today(
        &self,
    ) -> impl Future<Output = ResultEnvelope<Vec<Order>>> + '_ {
        self.orders_for_delivery(Local::now().date_naive())
    }

    pub fn orders_state(&self) -> &OperationSlot<Vec<Order>> {
        &self.orders
    }

    pub fn create_order_state(&self) -> &OperationSlot<Order> {
        &self.create_order
    }

    pub fn customer_orders_state(&self) -> &OperationSlot<Vec<Order>> {
        &self.customer_orders
    }

    pub fn delivery_state(&self) -> &OperationSlot<Vec<Order>> {
        &self.delivery
    }
}
