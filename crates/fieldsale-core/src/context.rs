//! Startup wiring.
//!
//! Builds the store, the session manager, the transport and every
//! repository exactly once; callers share the context by reference or `Arc`.

use crate::repositories::{
    AuthRepository, CustomerRepository, OrderRepository, ProductRepository,
    RecommendationRepository, SellerRepository, UserRepository, VisitRepository,
};
use crate::ClientResult;
use fieldsale_api::{CommerceApi, HttpCommerceApi};
use fieldsale_config::{init_logging, Config, LogConfig, Paths};
use fieldsale_storage::{KeyValueStore, SessionManager};
use std::sync::Arc;
use tracing::info;

/// Every long-lived client component, built once at startup.
///
/// Repositories share one [`SessionManager`] and one [`CommerceApi`].
pub struct ClientContext {
    config: Config,
    session: Arc<SessionManager>,
    auth: AuthRepository,
    orders: OrderRepository,
    products: ProductRepository,
    customers: CustomerRepository,
    seller: SellerRepository,
    visits: VisitRepository,
    recommendations: RecommendationRepository,
    user: UserRepository,
}

impl ClientContext {
    /// Host entry point: install client logging, then build the context.
    ///
    /// Logs go to stderr and `Paths::log_file()` at the configured level.
    /// Fails if a global tracing subscriber is already installed.
    pub async fn start(paths: &Paths) -> ClientResult<Self> {
        paths.ensure_dirs()?;
        let config = Config::load(paths)?;
        init_logging(&LogConfig::for_client(&config, paths))?;
        Self::open(paths, config).await
    }

    /// Load configuration, open the durable store and connect the HTTP API.
    ///
    /// Leaves logging to the host.
    pub async fn initialize(paths: &Paths) -> ClientResult<Self> {
        paths.ensure_dirs()?;
        let config = Config::load(paths)?;
        Self::open(paths, config).await
    }

    async fn open(paths: &Paths, config: Config) -> ClientResult<Self> {
        let base_url = config.api_base_url()?;

        let store = fieldsale_storage::create_store(paths).await?;
        let session = Arc::new(SessionManager::new(store));
        let api = HttpCommerceApi::new(base_url).with_session(session.clone());

        info!(
            api = %api.base_url(),
            store = %paths.store_file().display(),
            "Client context initialized"
        );

        Ok(Self::assemble(config, session, Arc::new(api)))
    }

    /// Build the context over injected collaborators with default config.
    pub fn from_parts(store: Arc<dyn KeyValueStore>, api: Arc<dyn CommerceApi>) -> Self {
        let session = Arc::new(SessionManager::new(store));
        Self::assemble(Config::new(), session, api)
    }

    fn assemble(config: Config, session: Arc<SessionManager>, api: Arc<dyn CommerceApi>) -> Self {
        Self {
            config,
            auth: AuthRepository::new(api.clone(), session.clone()),
            orders: OrderRepository::new(api.clone()),
            products: ProductRepository::new(api.clone()),
            customers: CustomerRepository::new(api.clone()),
            seller: SellerRepository::new(api.clone()),
            visits: VisitRepository::new(api.clone()),
            recommendations: RecommendationRepository::new(api),
            user: UserRepository::new(session.clone()),
            session,
        }
    }

    /// Loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Session shared by every repository.
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub fn auth(&self) -> &AuthRepository {
        &self.auth
    }

    pub fn orders(&self) -> &OrderRepository {
        &self.orders
    }

    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    pub fn customers(&self) -> &CustomerRepository {
        &self.customers
    }

    pub fn seller(&self) -> &SellerRepository {
        &self.seller
    }

    pub fn visits(&self) -> &VisitRepository {
        &self.visits
    }

    pub fn recommendations(&self) -> &RecommendationRepository {
        &self.recommendations
    }

    /// Session-derived values.
    pub fn user(&self) -> &UserRepository {
        &self.user
    }
}
