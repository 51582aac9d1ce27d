//! Sign-in and sign-out against the remote API and the local session.

use crate::{ClientError, ClientResult, OperationSlot, ResultEnvelope};
use fieldsale_api::{Client, ClientRegistration, CommerceApi};
use fieldsale_storage::{Identity, SessionManager};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Sign-in, sign-out and client self-registration.
pub struct AuthRepository {
    api: Arc<dyn CommerceApi>,
    session: Arc<SessionManager>,
    login: OperationSlot<Identity>,
    logout: OperationSlot<()>,
    register_client: OperationSlot<Client>,
}

impl AuthRepository {
    pub fn new(api: Arc<dyn CommerceApi>, session: Arc<SessionManager>) -> Self {
        Self {
            api,
            session,
            login: OperationSlot::new("login"),
            logout: OperationSlot::new("logout"),
            register_client: OperationSlot::new("register_client"),
        }
    }

    /// Authenticate and persist the resulting session.
    ///
    /// Succeeds only once both the token and the identity are stored. If the
    /// identity write fails the token already written is left in place.
    pub fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> impl Future<Output = ResultEnvelope<Identity>> + '_ {
        let email = email.into();
        let password = password.into();

        self.login
            .run(async move { self.sign_in(&email, &password).await })
    }

    async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Identity> {
        let response = self.api.authenticate(email, password).await?;
        self.session.save_token(&response.token).await?;
        self.session.save(&response.user).await?;
        info!(user_id = response.user.id, role = %response.user.role, "Signed in");
        Ok(response.user)
    }

    /// Clear the stored token and identity.
    pub fn logout(&self) -> impl Future<Output = ResultEnvelope<()>> + '_ {
        self.logout.run(async move {
            self.session
                .sign_out()
                .await
                .map_err(ClientError::from)
                .inspect(|_| info!("Signed out"))
        })
    }

    /// Create a client account through self-registration.
    pub fn register_client(
        &self,
        registration: ClientRegistration,
    ) -> impl Future<Output = ResultEnvelope<Client>> + '_ {
        self.register_client.run(async move {
            self.api
                .register_client(&registration)
                .await
                .map_err(ClientError::from)
                .inspect(|client| info!(client_id = client.id, "Client registered"))
        })
    }

    /// Slot observing [`login`](Self::login).
    pub fn login_state(&self) -> &OperationSlot<Identity> {
        &self.login
    }

    pub fn logout_state(&self) -> &OperationSlot<()> {
        &self.logout
    }

    pub fn register_client_state(&self) -> &OperationSlot<Client> {
        &self.register_client
    }
}
