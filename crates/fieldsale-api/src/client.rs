//! reqwest-backed implementation of [`CommerceApi`].
//!
//! Every response body is an [`ApiEnvelope`]. Non-2xx HTTP statuses and
//! envelopes with a non-2xx `code` both become [`ApiError::Status`], so the
//! caller sees one transport code regardless of where the server put it.

use crate::models::{
    Category, Client, ClientRegistration, Customer, LoginRequest, LoginResponse, Order, Product,
    SellerOrder, Visit, VideoUpload,
};
use crate::{ApiEnvelope, ApiError, ApiResult, CommerceApi, Confirmation};
use async_trait::async_trait;
use fieldsale_storage::SessionManager;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use url::Url;

fn summarize_response_body(body: &str) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("len={},digest={:016x}", body.len(), hasher.finish())
}

/// HTTP client for the commerce API.
#[derive(Clone)]
pub struct HttpCommerceApi {
    http_client: reqwest::Client,
    base_url: Url,
    session: Option<Arc<SessionManager>>,
}

impl HttpCommerceApi {
    /// Create a client for `base_url` that sends no credentials.
    pub fn new(mut base_url: Url) -> Self {
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            http_client: reqwest::Client::new(),
            base_url,
            session: None,
        }
    }

    /// Attach the session whose token authorizes requests.
    pub fn with_session(mut self, session: Arc<SessionManager>) -> Self {
        self.session = Some(session);
        self
    }

    /// Get the normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn authorize(&self, request: RequestBuilder) -> ApiResult<RequestBuilder> {
        let Some(session) = &self.session else {
            return Ok(request);
        };

        Ok(match session.token().await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    /// Send a request and decode its envelope, returning the HTTP status too.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> ApiResult<(ApiEnvelope<T>, u16)> {
        let response = self
            .authorize(request)
            .await?
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let body_summary = summarize_response_body(&body);
            tracing::error!(
                operation,
                status = %status,
                body_summary = %body_summary,
                "Commerce API request failed"
            );
            // The envelope code, when present, wins over the HTTP status.
            let envelope = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body).ok();
            let code = envelope
                .as_ref()
                .and_then(|envelope| envelope.code)
                .filter(|code| !(200..300).contains(code))
                .unwrap_or(status.as_u16());
            let message = envelope
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(ApiError::Status { code, message });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)?;
        tracing::debug!(operation, status = %status, "Commerce API request succeeded");
        Ok((envelope, status.as_u16()))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> ApiResult<T> {
        let (envelope, status) = self.send::<T>(request, operation).await?;
        envelope.into_data(status)
    }

    async fn confirm(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> ApiResult<Confirmation> {
        let (envelope, status) = self
            .send::<serde_json::Value>(request, operation)
            .await?;
        envelope.into_confirmation(status)
    }
}

#[async_trait]
impl CommerceApi for HttpCommerceApi {
    async fn authenticate(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let request = self
            .http_client
            .post(self.endpoint("auth/login")?)
            .json(&body);
        self.fetch(request, "authenticate").await
    }

    async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        let request = self.http_client.get(self.endpoint("orders")?);
        self.fetch(request, "list_orders").await
    }

    async fn create_order(&self, order: &Order) -> ApiResult<Order> {
        let request = self.http_client.post(self.endpoint("orders")?).json(order);
        self.fetch(request, "create_order").await
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        let request = self.http_client.get(self.endpoint("products")?);
        self.fetch(request, "list_products").await
    }

    async fn list_customers(&self) -> ApiResult<Vec<Customer>> {
        let request = self.http_client.get(self.endpoint("customers")?);
        self.fetch(request, "list_customers").await
    }

    async fn list_customer_orders(&self, customer_id: i64) -> ApiResult<Vec<Order>> {
        let url = self.endpoint(&format!("customers/{}/orders", customer_id))?;
        self.fetch(self.http_client.get(url), "list_customer_orders")
            .await
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let request = self.http_client.get(self.endpoint("categories")?);
        self.fetch(request, "list_categories").await
    }

    async fn list_seller_products(&self, category_id: i64) -> ApiResult<Vec<Product>> {
        let url = self.endpoint(&format!("categories/{}/products", category_id))?;
        self.fetch(self.http_client.get(url), "list_seller_products")
            .await
    }

    async fn place_seller_order(&self, order: &SellerOrder) -> ApiResult<Confirmation> {
        let request = self
            .http_client
            .post(self.endpoint("seller/orders")?)
            .json(order);
        self.confirm(request, "place_seller_order").await
    }

    async fn list_visits(&self, customer_id: i64) -> ApiResult<Vec<Visit>> {
        let url = self.endpoint(&format!("customers/{}/visits", customer_id))?;
        self.fetch(self.http_client.get(url), "list_visits").await
    }

    async fn register_visit(&self, visit: &Visit) -> ApiResult<Confirmation> {
        let request = self.http_client.post(self.endpoint("visits")?).json(visit);
        self.confirm(request, "register_visit").await
    }

    async fn upload_recommendation_video(
        &self,
        video: VideoUpload,
        customer_id: i64,
        seller_id: i64,
    ) -> ApiResult<Confirmation> {
        let size = video.bytes.len();
        let part = Part::bytes(video.bytes)
            .file_name(video.file_name)
            .mime_str(&video.content_type)?;
        let form = Form::new()
            .text("customerId", customer_id.to_string())
            .text("sellerId", seller_id.to_string())
            .part("video", part);

        tracing::debug!(customer_id, seller_id, size, "Uploading recommendation video");

        let request = self
            .http_client
            .post(self.endpoint("recommendations/videos")?)
            .multipart(form);
        self.confirm(request, "upload_recommendation_video").await
    }

    async fn register_client(&self, registration: &ClientRegistration) -> ApiResult<Client> {
        let request = self
            .http_client
            .post(self.endpoint("clients")?)
            .json(registration);
        self.fetch(request, "register_client").await
    }
}
