//! Loading/error bookkeeping around one remote call at a time.
//!
//! A [`RequestLifecycle`] marks itself loading when a call starts, clears the
//! previous error, and on settlement either hands the result back or records
//! a display message and re-raises the failure. State is published through a
//! `watch` channel so views can re-render on every transition.
//!
//! Calls are not isolated from one another: a second call started before the
//! first settles overwrites the shared state, and whichever settles last
//! wins.

use std::fmt;
use std::future::Future;

use tokio::sync::watch;
use tracing::{Instrument, info, info_span, warn};

/// Errors that may carry a human-readable message from the failure payload.
pub trait FailureMessage {
    /// Message embedded in the failure payload, if any.
    fn payload_message(&self) -> Option<&str>;
}

/// Observable state of a [`RequestLifecycle`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestState {
    loading: bool,
    error: Option<String>,
}

impl RequestState {
    /// Whether a call is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Message describing the most recent failure, cleared when a new call
    /// starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Failure re-raised to the caller after the lifecycle records it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure<E> {
    message: String,
    source: E,
}

impl<E> RequestFailure<E> {
    /// Message stored in the lifecycle state.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Underlying operation error.
    pub fn cause(&self) -> &E {
        &self.source
    }

    /// Consume the failure, returning the underlying operation error.
    pub fn into_cause(self) -> E {
        self.source
    }
}

impl<E> fmt::Display for RequestFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl<E> std::error::Error for RequestFailure<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Tri-state wrapper shared by every data-fetching operation of one owner.
#[derive(Debug)]
pub struct RequestLifecycle {
    state: watch::Sender<RequestState>,
}

impl Default for RequestLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestLifecycle {
    /// Create an idle lifecycle: not loading, no error.
    pub fn new() -> Self {
        let (state, _) = watch::channel(RequestState::default());
        Self { state }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    /// Run `operation`, tracking it as the current call.
    ///
    /// On failure the stored message is the payload message when the error
    /// carries one, otherwise `default_message`. The failure is returned to
    /// the caller as well.
    ///
    /// # Errors
    ///
    /// Returns [`RequestFailure`] wrapping the operation's error.
    ///
    /// # Examples
    /// ```
    /// use booking_client::domain::{FailureMessage, RequestLifecycle};
    ///
    /// #[derive(Debug)]
    /// struct Offline;
    ///
    /// impl FailureMessage for Offline {
    ///     fn payload_message(&self) -> Option<&str> {
    ///         None
    ///     }
    /// }
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let lifecycle = RequestLifecycle::new();
    /// let failure = lifecycle
    ///     .run("fetch_services", "Failed to fetch services", || async {
    ///         Err::<(), _>(Offline)
    ///     })
    ///     .await
    ///     .expect_err("operation fails");
    /// assert_eq!(failure.message(), "Failed to fetch services");
    /// assert_eq!(lifecycle.state().error(), Some("Failed to fetch services"));
    /// assert!(!lifecycle.state().loading());
    /// # }
    /// ```
    pub async fn run<T, E, F, Fut>(
        &self,
        operation_name: &'static str,
        default_message: &str,
        operation: F,
    ) -> Result<T, RequestFailure<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: FailureMessage + fmt::Debug,
    {
        self.state.send_replace(RequestState {
            loading: true,
            error: None,
        });

        let outcome = operation()
            .instrument(info_span!("request", operation = operation_name))
            .await;

        match outcome {
            Ok(value) => {
                self.state.send_modify(|state| state.loading = false);
                info!(operation = operation_name, "request settled");
                Ok(value)
            }
            Err(source) => {
                let message = source
                    .payload_message()
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or(default_message)
                    .to_owned();
                warn!(
                    operation = operation_name,
                    error = ?source,
                    message = %message,
                    "request failed"
                );
                self.state.send_replace(RequestState {
                    loading: false,
                    error: Some(message.clone()),
                });
                Err(RequestFailure { message, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct TestFailure(Option<&'static str>);

    impl FailureMessage for TestFailure {
        fn payload_message(&self) -> Option<&str> {
            self.0
        }
    }

    #[tokio::test]
    async fn loading_is_set_only_while_the_call_is_in_flight() {
        let lifecycle = RequestLifecycle::new();
        assert!(!lifecycle.state().loading(), "idle before the call");

        let probe = lifecycle.subscribe();
        let value = lifecycle
            .run("probe", "unused", || async move {
                assert!(probe.borrow().loading(), "loading during the call");
                Ok::<_, TestFailure>(7)
            })
            .await
            .expect("operation succeeds");

        assert_eq!(value, 7);
        assert!(!lifecycle.state().loading(), "idle after settlement");
        assert_eq!(lifecycle.state().error(), None);
    }

    #[rstest]
    #[case::payload_message(Some("Slot already taken"), "Slot already taken")]
    #[case::no_payload(None, "Failed to submit booking")]
    #[case::blank_payload(Some("  "), "Failed to submit booking")]
    #[case::padded_payload(Some("  Slot already taken  "), "  Slot already taken  ")]
    #[tokio::test]
    async fn failure_message_prefers_payload_then_default(
        #[case] payload: Option<&'static str>,
        #[case] expected: &str,
    ) {
        let lifecycle = RequestLifecycle::new();
        let failure = lifecycle
            .run("submit_booking", "Failed to submit booking", || async move {
                Err::<(), _>(TestFailure(payload))
            })
            .await
            .expect_err("operation fails");

        assert_eq!(failure.message(), expected);
        assert_eq!(failure.cause(), &TestFailure(payload));
        assert_eq!(lifecycle.state().error(), Some(expected));
        assert!(!lifecycle.state().loading());
    }

    #[tokio::test]
    async fn next_call_clears_previous_error_at_start() {
        let lifecycle = RequestLifecycle::new();
        let _ = lifecycle
            .run("first", "first failed", || async {
                Err::<(), _>(TestFailure(None))
            })
            .await;
        assert_eq!(lifecycle.state().error(), Some("first failed"));

        let probe = lifecycle.subscribe();
        lifecycle
            .run("second", "second failed", || async move {
                assert_eq!(probe.borrow().error(), None, "error cleared at start");
                Ok::<_, TestFailure>(())
            })
            .await
            .expect("second call succeeds");
        assert_eq!(lifecycle.state().error(), None);
    }

    #[tokio::test]
    async fn subscribers_observe_each_transition() {
        let lifecycle = RequestLifecycle::new();
        let mut updates = lifecycle.subscribe();

        lifecycle
            .run("observe", "unused", || async { Ok::<_, TestFailure>(()) })
            .await
            .expect("operation succeeds");

        assert!(updates.has_changed().expect("sender alive"));
        assert!(!updates.borrow_and_update().loading());
    }
}
