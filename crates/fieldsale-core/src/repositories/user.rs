//! Values derived from the signed-in identity.

use crate::{ClientError, ClientResult, OperationSlot, ResultEnvelope};
use fieldsale_storage::{Identity, SessionManager};
use std::future::Future;
use std::sync::Arc;

/// Values derived from the stored session. No remote calls.
///
/// When nobody is signed in (or the session record is unreadable) every
/// operation succeeds with `None`.
pub struct UserRepository {
    session: Arc<SessionManager>,
    display_name: OperationSlot<Option<String>>,
    role: OperationSlot<Option<String>>,
    identity_by_id: OperationSlot<Option<Identity>>,
    current_identity: OperationSlot<Option<Identity>>,
}

impl UserRepository {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self {
            session,
            display_name: OperationSlot::new("display_name"),
            role: OperationSlot::new("role"),
            identity_by_id: OperationSlot::new("identity_by_id"),
            current_identity: OperationSlot::new("current_identity"),
        }
    }

    async fn signed_in(&self) -> ClientResult<Option<Identity>> {
        self.session.get().await.map_err(ClientError::from)
    }

    pub fn display_name(&self) -> impl Future<Output = ResultEnvelope<Option<String>>> + '_ {
        self.display_name.run(async move {
            self.signed_in()
                .await
                .map(|identity| identity.map(|identity| identity.username))
        })
    }

    pub fn role(&self) -> impl Future<Output = ResultEnvelope<Option<String>>> + '_ {
        self.role.run(async move {
            self.signed_in()
                .await
                .map(|identity| identity.map(|identity| identity.role))
        })
    }

    /// The signed-in identity, if its id is `id`.
    pub fn identity_by_id(
        &self,
        id: i64,
    ) -> impl Future<Output = ResultEnvelope<Option<Identity>>> + '_ {
        self.identity_by_id.run(async move {
            self.signed_in()
                .await
                .map(|identity| identity.filter(|identity| identity.id == id))
        })
    }

    /// The signed-in identity, if any.
    pub fn current_identity(&self) -> impl Future<Output = ResultEnvelope<Option<Identity>>> + '_ {
        self.current_identity
            .run(async move { self.signed_in().await })
    }

    pub fn display_name_state(&self) -> &OperationSlot<Option<String>> {
        &self.display_name
    }

    pub fn role_state(&self) -> &OperationSlot<Option<String>> {
        &self.role
    }

    pub fn identity_by_id_state(&self) -> &OperationSlot<Option<Identity>> {
        &self.identity_by_id
    }

    pub fn current_identity_state(&self) -> &OperationSlot<Option<Identity>> {
        &self.current_identity
    }
}
