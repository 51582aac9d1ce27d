//! Test doubles shared by the repository tests.

use async_trait::async_trait;
use fieldsale_api::{
    ApiError, ApiResult, Category, Client, ClientRegistration, CommerceApi, Confirmation,
    Customer, LoginResponse, Order, OrderStatus, Product, SellerOrder, VideoUpload, Visit,
};
use fieldsale_storage::{
    Identity, KeyValueStore, MemoryStore, StorageError, StorageResult,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::ClientContext;

/// How a stubbed call fails.
#[derive(Debug, Clone, Copy)]
pub enum StubFailure {
    /// Server answered with this transport status.
    Status(u16),
    /// Body decoded but carried no payload.
    MissingData,
}

impl StubFailure {
    fn to_error(self) -> ApiError {
        match self {
            StubFailure::Status(code) => ApiError::Status {
                code,
                message: format!("stubbed status {code}"),
            },
            StubFailure::MissingData => ApiError::MissingData,
        }
    }
}

/// In-process [`CommerceApi`] with canned responses.
pub struct StubApi {
    pub failure: Mutex<Option<StubFailure>>,
    pub token: String,
    pub identity: Identity,
    pub orders: Mutex<Vec<Order>>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub categories: Vec<Category>,
    pub visits: Vec<Visit>,
    /// When set, every call waits for a permit before answering.
    pub gate: Option<Arc<Notify>>,
    pub calls: AtomicUsize,
    pub last_upload: Mutex<Option<(VideoUpload, i64, i64)>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self {
            failure: Mutex::new(None),
            token: "tok-abc".to_string(),
            identity: identity(),
            orders: Mutex::new(Vec::new()),
            products: vec![product(1, "Coffee 500g"), product(2, "Tea 250g")],
            customers: vec![Customer {
                id: 10,
                name: "Corner Store".to_string(),
                email: Some("owner@corner.example".to_string()),
                phone: None,
                address: Some("Main St 1".to_string()),
            }],
            categories: vec![Category {
                id: 3,
                name: "Beverages".to_string(),
            }],
            visits: vec![Visit {
                id: Some(5),
                customer_id: 10,
                seller_id: 42,
                date: "2026-10-19".to_string(),
                notes: Some("restock".to_string()),
                status: None,
            }],
            gate: None,
            calls: AtomicUsize::new(0),
            last_upload: Mutex::new(None),
        }
    }

    pub fn failing(failure: StubFailure) -> Self {
        let api = Self::new();
        *api.failure.lock() = Some(failure);
        api
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new()
        }
    }

    pub fn with_orders(orders: Vec<Order>) -> Self {
        let api = Self::new();
        *api.orders.lock() = orders;
        api
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> ApiResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match *self.failure.lock() {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    fn confirmation(message: &str) -> Confirmation {
        Confirmation {
            code: 201,
            status: Some("success".to_string()),
            message: Some(message.to_string()),
            data: None,
        }
    }
}

#[async_trait]
impl CommerceApi for StubApi {
    async fn authenticate(&self, email: &str, _password: &str) -> ApiResult<LoginResponse> {
        self.enter().await?;
        Ok(LoginResponse {
            token: self.token.clone(),
            user: Identity {
                email: email.to_string(),
                ..self.identity.clone()
            },
        })
    }

    async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        self.enter().await?;
        Ok(self.orders.lock().clone())
    }

    async fn create_order(&self, order: &Order) -> ApiResult<Order> {
        self.enter().await?;
        let mut orders = self.orders.lock();
        let created = Order {
            id: Some(orders.len() as i64 + 1),
            ..order.clone()
        };
        orders.push(created.clone());
        Ok(created)
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.enter().await?;
        Ok(self.products.clone())
    }

    async fn list_customers(&self) -> ApiResult<Vec<Customer>> {
        self.enter().await?;
        Ok(self.customers.clone())
    }

    async fn list_customer_orders(&self, customer_id: i64) -> ApiResult<Vec<Order>> {
        self.enter().await?;
        Ok(self
            .orders
            .lock()
            .iter()
            .filter(|order| order.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.enter().await?;
        Ok(self.categories.clone())
    }

    async fn list_seller_products(&self, category_id: i64) -> ApiResult<Vec<Product>> {
        self.enter().await?;
        Ok(self
            .products
            .iter()
            .filter(|product| product.category_id == Some(category_id))
            .cloned()
            .collect())
    }

    async fn place_seller_order(&self, _order: &SellerOrder) -> ApiResult<Confirmation> {
        self.enter().await?;
        Ok(Self::confirmation("order placed"))
    }

    async fn list_visits(&self, customer_id: i64) -> ApiResult<Vec<Visit>> {
        self.enter().await?;
        Ok(self
            .visits
            .iter()
            .filter(|visit| visit.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn register_visit(&self, _visit: &Visit) -> ApiResult<Confirmation> {
        self.enter().await?;
        Ok(Self::confirmation("visit registered"))
    }

    async fn upload_recommendation_video(
        &self,
        video: VideoUpload,
        customer_id: i64,
        seller_id: i64,
    ) -> ApiResult<Confirmation> {
        self.enter().await?;
        *self.last_upload.lock() = Some((video, customer_id, seller_id));
        Ok(Self::confirmation("video uploaded"))
    }

    async fn register_client(&self, registration: &ClientRegistration) -> ApiResult<Client> {
        self.enter().await?;
        Ok(Client {
            id: 77,
            name: registration.name.clone(),
            email: registration.email.clone(),
            phone: registration.phone.clone(),
            address: registration.address.clone(),
        })
    }
}

/// [`MemoryStore`] that fails writes or reads of chosen keys.
#[derive(Default)]
pub struct FaultyStore {
    inner: MemoryStore,
    fail_put: Mutex<Option<&'static str>>,
    fail_get: Mutex<Option<&'static str>>,
}

impl FaultyStore {
    pub fn failing_put(key: &'static str) -> Self {
        let store = Self::default();
        *store.fail_put.lock() = Some(key);
        store
    }

    pub fn failing_get(key: &'static str) -> Self {
        let store = Self::default();
        *store.fail_get.lock() = Some(key);
        store
    }

    fn injected(operation: &str, key: &str) -> StorageError {
        StorageError::Connection(format!("injected {operation} failure for {key}"))
    }
}

#[async_trait]
impl KeyValueStore for FaultyStore {
    async fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        if *self.fail_put.lock() == Some(key) {
            return Err(Self::injected("put", key));
        }
        self.inner.put(key, value).await
    }

    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if *self.fail_get.lock() == Some(key) {
            return Err(Self::injected("get", key));
        }
        self.inner.get(key).await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.inner.remove(key).await
    }
}

pub fn identity() -> Identity {
    Identity {
        email: "ana@example.com".to_string(),
        id: 42,
        role: "SELLER".to_string(),
        username: "ana".to_string(),
    }
}

pub fn product(id: i64, name: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: None,
        price: 9.5,
        stock: Some(12),
        category_id: Some(3),
        image_url: None,
    }
}

pub fn order(id: i64, status: OrderStatus, date: &str) -> Order {
    Order {
        id: Some(id),
        customer_id: 10,
        seller_id: Some(42),
        status,
        date: date.to_string(),
        total: Some(19.0),
        items: Vec::new(),
    }
}

/// Context over a memory store and the given stub.
pub fn context(api: StubApi) -> (ClientContext, Arc<StubApi>, Arc<MemoryStore>) {
    let api = Arc::new(api);
    let store = Arc::new(MemoryStore::new());
    let context = ClientContext::from_parts(store.clone(), api.clone());
    (context, api, store)
}

/// Context over an arbitrary store.
pub fn context_with_store(
    api: StubApi,
    store: Arc<dyn KeyValueStore>,
) -> (ClientContext, Arc<StubApi>) {
    let api = Arc::new(api);
    let context = ClientContext::from_parts(store, api.clone());
    (context, api)
}
