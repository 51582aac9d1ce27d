//! Remote API trait definitions.

use crate::models::{
    Category, Client, ClientRegistration, Customer, LoginResponse, Order, Product, SellerOrder,
    Visit, VideoUpload,
};
use crate::{ApiResult, Confirmation};
use async_trait::async_trait;

/// Operations the commerce backend exposes to the client.
///
/// Every method either returns the decoded payload or an
/// [`ApiError`](crate::ApiError) carrying the transport status when known.
#[async_trait]
pub trait CommerceApi: Send + Sync {
    /// Exchange credentials for a token and the signed-in identity.
    async fn authenticate(&self, email: &str, password: &str) -> ApiResult<LoginResponse>;

    async fn list_orders(&self) -> ApiResult<Vec<Order>>;

    async fn create_order(&self, order: &Order) -> ApiResult<Order>;

    async fn list_products(&self) -> ApiResult<Vec<Product>>;

    async fn list_customers(&self) -> ApiResult<Vec<Customer>>;

    async fn list_customer_orders(&self, customer_id: i64) -> ApiResult<Vec<Order>>;

    async fn list_categories(&self) -> ApiResult<Vec<Category>>;

    /// Products a seller can offer within one category.
    async fn list_seller_products(&self, category_id: i64) -> ApiResult<Vec<Product>>;

    async fn place_seller_order(&self, order: &SellerOrder) -> ApiResult<Confirmation>;

    async fn list_visits(&self, customer_id: i64) -> ApiResult<Vec<Visit>>;

    async fn register_visit(&self, visit: &Visit) -> ApiResult<Confirmation>;

    /// Upload a recommendation video recorded for a customer.
    async fn upload_recommendation_video(
        &self,
        video: VideoUpload,
        customer_id: i64,
        seller_id: i64,
    ) -> ApiResult<Confirmation>;

    async fn register_client(&self, registration: &ClientRegistration) -> ApiResult<Client>;
}
