//! Three-state result envelope and the observable slot each operation
//! publishes into.
//!
//! Invoking an operation publishes [`ResultEnvelope::Loading`] before any
//! work is awaited, then exactly one terminal value. Observers hold a
//! [`watch::Receiver`] and always see the latest envelope; slots are
//! last-value-wins and keep no history.

use crate::classifier::{classify, ErrorCategory};
use crate::operation_fsm::{OperationInput, OperationMachine, OperationPhase};
use crate::{ClientError, ClientResult};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Classified failure carried by a failed envelope.
#[derive(Debug, Clone)]
pub struct OperationFailure {
    pub cause: Arc<ClientError>,
    pub category: ErrorCategory,
    /// User-facing message for `category`.
    pub message: String,
    /// Transport status code, when the failure came from a response.
    pub code: Option<u16>,
}

impl OperationFailure {
    /// Classify `error` and attach its user-facing message.
    pub fn from_error(error: ClientError) -> Self {
        let category = classify(&error);
        Self {
            code: error.status_code(),
            message: category.user_message().to_string(),
            category,
            cause: Arc::new(error),
        }
    }

    /// Returns true if the server rejected the credentials.
    pub fn is_invalid_credentials(&self) -> bool {
        self.category == ErrorCategory::InvalidCredentials
    }
}

impl From<ClientError> for OperationFailure {
    fn from(error: ClientError) -> Self {
        Self::from_error(error)
    }
}

/// Outcome of an operation as seen by observers.
#[derive(Debug, Clone)]
pub enum ResultEnvelope<T> {
    /// Invoked; no terminal value yet.
    Loading,
    Success(T),
    Failure(OperationFailure),
}

impl<T> ResultEnvelope<T> {
    /// Returns true while the operation is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, ResultEnvelope::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResultEnvelope::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ResultEnvelope::Failure(_))
    }

    /// Borrow the value of a successful envelope.
    pub fn success(&self) -> Option<&T> {
        match self {
            ResultEnvelope::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the failure of a failed envelope.
    pub fn failure(&self) -> Option<&OperationFailure> {
        match self {
            ResultEnvelope::Failure(failure) => Some(failure),
            _ => None,
        }
    }

    /// Take the value of a successful envelope, dropping anything else.
    pub fn into_success(self) -> Option<T> {
        match self {
            ResultEnvelope::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Transform the success value, keeping `Loading` and failures as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResultEnvelope<U> {
        match self {
            ResultEnvelope::Loading => ResultEnvelope::Loading,
            ResultEnvelope::Success(value) => ResultEnvelope::Success(f(value)),
            ResultEnvelope::Failure(failure) => ResultEnvelope::Failure(failure),
        }
    }
}

impl<T> From<ClientResult<T>> for ResultEnvelope<T> {
    fn from(result: ClientResult<T>) -> Self {
        match result {
            Ok(value) => ResultEnvelope::Success(value),
            Err(e) => ResultEnvelope::Failure(OperationFailure::from_error(e)),
        }
    }
}

/// Observable slot holding the latest envelope of one operation.
///
/// `None` means the operation has never been invoked.
pub struct OperationSlot<T> {
    name: &'static str,
    machine: Mutex<OperationMachine>,
    sender: watch::Sender<Option<ResultEnvelope<T>>>,
}

impl<T: Clone> OperationSlot<T> {
    /// Create an idle slot; `name` labels its log events.
    pub fn new(name: &'static str) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            name,
            machine: Mutex::new(OperationMachine::new()),
            sender,
        }
    }

    /// Operation name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Subscribe to envelope updates.
    pub fn subscribe(&self) -> watch::Receiver<Option<ResultEnvelope<T>>> {
        self.sender.subscribe()
    }

    /// Latest published envelope.
    pub fn current(&self) -> Option<ResultEnvelope<T>> {
        self.sender.borrow().clone()
    }

    /// Phase of the most recent transition.
    pub fn phase(&self) -> OperationPhase {
        OperationPhase::from(self.machine.lock().state())
    }

    fn publish(&self, input: OperationInput, envelope: ResultEnvelope<T>) {
        // The machine lock must be released before `send_replace`: observers
        // may call `phase()` while holding a borrow of the channel.
        {
            let mut machine = self.machine.lock();
            if let Err(e) = machine.consume(&input) {
                warn!(
                    operation = self.name,
                    state = ?machine.state(),
                    input = ?input,
                    error = ?e,
                    "Unexpected operation transition"
                );
            }
        }
        self.sender.send_replace(Some(envelope));
    }

    /// Start an invocation.
    ///
    /// `Loading` is published before this returns, so it is visible even if
    /// the returned future is never polled. Awaiting the future runs `work`,
    /// publishes its terminal envelope and returns it.
    pub fn run<'a, F>(&'a self, work: F) -> impl Future<Output = ResultEnvelope<T>> + 'a
    where
        T: 'a,
        F: Future<Output = ClientResult<T>> + 'a,
    {
        self.publish(OperationInput::Invoke, ResultEnvelope::Loading);
        debug!(operation = self.name, "Operation started");

        async move {
            match work.await {
                Ok(value) => {
                    debug!(operation = self.name, "Operation succeeded");
                    let envelope = ResultEnvelope::Success(value);
                    self.publish(OperationInput::Succeed, envelope.clone());
                    envelope
                }
                Err(e) => {
                    let failure = OperationFailure::from_error(e);
                    warn!(
                        operation = self.name,
                        error = %failure.cause,
                        category = ?failure.category,
                        code = ?failure.code,
                        "Operation failed"
                    );
                    let envelope = ResultEnvelope::Failure(failure);
                    self.publish(OperationInput::Fail, envelope.clone());
                    envelope
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldsale_api::ApiError;
    use tokio::sync::oneshot;

    async fn ok(value: u32) -> ClientResult<u32> {
        Ok(value)
    }

    async fn fail(error: ClientError) -> ClientResult<u32> {
        Err(error)
    }

    fn unauthorized() -> ClientError {
        ClientError::Api(ApiError::Status {
            code: 401,
            message: "bad credentials".to_string(),
        })
    }

    #[test]
    fn test_slot_starts_empty() {
        let slot = OperationSlot::<u32>::new("count");
        assert!(slot.current().is_none());
        assert_eq!(slot.phase(), OperationPhase::Idle);
    }

    #[tokio::test]
    async fn test_loading_is_published_before_polling() {
        let slot = OperationSlot::<u32>::new("count");

        let pending = slot.run(ok(5));

        assert!(slot.current().unwrap().is_loading());
        assert_eq!(slot.phase(), OperationPhase::Loading);

        let result = pending.await;
        assert_eq!(result.success(), Some(&5));
        assert_eq!(slot.current().unwrap().success(), Some(&5));
        assert_eq!(slot.phase(), OperationPhase::Succeeded);
    }

    #[tokio::test]
    async fn test_observer_sees_loading_then_terminal() {
        let slot = OperationSlot::<u32>::new("count");
        let mut rx = slot.subscribe();
        let (release, gate) = oneshot::channel::<()>();

        let pending = slot.run(async move {
            let _ = gate.await;
            ok(9).await
        });

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().as_ref().unwrap().is_loading());

        release.send(()).unwrap();
        pending.await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_ref().unwrap().success(), Some(&9));
    }

    #[tokio::test]
    async fn test_failure_is_classified() {
        let slot = OperationSlot::<u32>::new("login");

        let result = slot.run(fail(unauthorized())).await;

        let failure = result.failure().unwrap();
        assert!(failure.is_invalid_credentials());
        assert_eq!(failure.code, Some(401));
        assert_eq!(failure.message, ErrorCategory::InvalidCredentials.user_message());
        assert_eq!(slot.phase(), OperationPhase::Failed);
        assert!(slot.current().unwrap().is_failure());
    }

    #[tokio::test]
    async fn test_every_invocation_republishes_loading() {
        let slot = OperationSlot::<u32>::new("count");
        slot.run(ok(1)).await;

        let pending = slot.run(ok(2));
        assert!(slot.current().unwrap().is_loading());
        pending.await;

        assert_eq!(slot.current().unwrap().success(), Some(&2));
    }

    #[tokio::test]
    async fn test_overlapping_invocations_last_terminal_wins() {
        let slot = OperationSlot::<u32>::new("count");
        let (release_first, first_gate) = oneshot::channel::<()>();

        let first = slot.run(async move {
            let _ = first_gate.await;
            ok(1).await
        });
        let second = slot.run(ok(2));

        assert_eq!(second.await.success(), Some(&2));
        assert_eq!(slot.current().unwrap().success(), Some(&2));

        release_first.send(()).unwrap();
        assert_eq!(first.await.success(), Some(&1));
        assert_eq!(slot.current().unwrap().success(), Some(&1));
    }

    #[test]
    fn test_phase_under_borrow_does_not_stall_publisher() {
        let slot = Arc::new(OperationSlot::<u32>::new("count"));
        let rx = slot.subscribe();

        let publisher = {
            let slot = slot.clone();
            std::thread::spawn(move || {
                for n in 0..2_000 {
                    slot.publish(OperationInput::Invoke, ResultEnvelope::Loading);
                    slot.publish(OperationInput::Succeed, ResultEnvelope::Success(n));
                }
            })
        };

        for _ in 0..2_000 {
            let guard = rx.borrow();
            let _ = slot.phase();
            drop(guard);
        }

        publisher.join().unwrap();
        assert_eq!(slot.phase(), OperationPhase::Succeeded);
        assert_eq!(slot.current().unwrap().success(), Some(&1_999));
    }

    #[test]
    fn test_map_preserves_failure() {
        let envelope: ResultEnvelope<u32> =
            ResultEnvelope::Failure(OperationFailure::from_error(unauthorized()));
        let mapped = envelope.map(|n| n.to_string());
        assert!(mapped.failure().unwrap().is_invalid_credentials());
    }

    #[test]
    fn test_from_result() {
        let ok: ResultEnvelope<u32> = ResultEnvelope::from(Ok(3));
        assert_eq!(ok.into_success(), Some(3));

        let err: ResultEnvelope<u32> =
            ResultEnvelope::from(Err(ClientError::Decode("bad".to_string())));
        assert_eq!(err.failure().unwrap().category, ErrorCategory::OperationFailed);
        assert_eq!(err.failure().unwrap().code, None);
    }
}
