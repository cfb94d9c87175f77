//! Boundary to the document host that embeds the trainer.
//!
//! The host persists the interactive state with its document. On start-up the
//! trainer probes the host, announces its frame and picks up any saved state;
//! afterwards the host calls back through [`handle_host_request`].

mod envelope;
mod retry;
mod transport;

pub use envelope::{HostAction, HostRequest, HostResponse};
pub use retry::{RetryConfig, retry_fixed};
pub use transport::{HostTransport, JsonLinesTransport, serve_json_lines};

use serde_json::{Value, json};
use thiserror::Error;
use tracing::{info, warn};

use crate::session::{InteractionState, StateError, TrainingSession};

pub const FRAME_RESOURCE: &str = "interactiveFrame";
pub const STATE_RESOURCE: &str = "interactiveState";
pub const FRAME_NAME: &str = "perceptron-trainer";
pub const FRAME_TITLE: &str = "Perceptron Trainer";
pub const FRAME_VERSION: &str = "1.0.0";

#[derive(Debug, Error)]
pub enum HostError {
    #[error("No response from host.")]
    NoResponse,
    #[error("{0}")]
    Rejected(String),
    #[error("Host transport I/O failed: {0}")]
    Io(std::io::Error),
    #[error("Failed to encode host request: {0}")]
    Encode(serde_json::Error),
    #[error("Invalid host response: {0}")]
    Decode(serde_json::Error),
}

/// Send a request and turn an unsuccessful reply into [`HostError::Rejected`].
pub fn request(
    transport: &mut impl HostTransport,
    request: &HostRequest,
) -> Result<HostResponse, HostError> {
    let response = transport.call(request)?;
    if response.success {
        return Ok(response);
    }
    let message = response
        .error_message()
        .unwrap_or("Host request failed.")
        .to_string();
    Err(HostError::Rejected(message))
}

/// Probe the host, announce the frame, and return any state saved with the document.
pub fn connect(
    transport: &mut impl HostTransport,
    retry: RetryConfig,
) -> Result<Option<InteractionState>, HostError> {
    let probe = HostRequest::new(HostAction::Get, FRAME_RESOURCE);
    retry_fixed(
        retry,
        || request(transport, &probe),
        |err| {
            warn!("Host probe failed: {err}");
            true
        },
    )?;
    request(
        transport,
        &HostRequest::new(HostAction::Update, FRAME_RESOURCE).with_values(json!({
            "name": FRAME_NAME,
            "title": FRAME_TITLE,
            "version": FRAME_VERSION,
        })),
    )?;
    info!("Connected to host");

    let frame = match request(transport, &probe) {
        Ok(frame) => frame,
        Err(err) => {
            warn!("Could not read saved state: {err}");
            return Ok(None);
        }
    };
    let saved = frame
        .values
        .and_then(|mut values| values.get_mut("savedState").map(Value::take))
        .filter(|saved| saved.is_object());
    let Some(saved) = saved else {
        return Ok(None);
    };
    match InteractionState::from_value(saved) {
        Ok(state) => Ok(Some(state)),
        Err(err) => {
            warn!("Ignoring saved state: {err}");
            Ok(None)
        }
    }
}

/// Answer a request initiated by the host.
///
/// `get interactiveState` exports the session, `set interactiveState` restores
/// it (payload under `interactiveState` or bare), anything else is acknowledged.
pub fn handle_host_request(session: &mut TrainingSession, request: &HostRequest) -> HostResponse {
    if request.is(HostAction::Get, STATE_RESOURCE) {
        return match session.export_state().to_value() {
            Ok(values) => HostResponse::ok_with(values),
            Err(err) => HostResponse::failure(err.to_string()),
        };
    }
    if request.is(HostAction::Set, STATE_RESOURCE) {
        return match incoming_state(request.values.as_ref()) {
            Ok(Some(state)) => {
                session.restore(&state);
                HostResponse::ok()
            }
            Ok(None) => HostResponse::ok(),
            Err(err) => {
                warn!("Rejected interactive state from host: {err}");
                HostResponse::failure(err.to_string())
            }
        };
    }
    HostResponse::ok()
}

fn incoming_state(values: Option<&Value>) -> Result<Option<InteractionState>, StateError> {
    let payload = match values {
        Some(values) => match values.get(STATE_RESOURCE) {
            Some(nested) if !nested.is_null() => nested,
            _ => values,
        },
        None => return Ok(None),
    };
    if payload.is_null() {
        return Ok(None);
    }
    InteractionState::from_value(payload.clone()).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perceptron::Model;
    use std::collections::VecDeque;
    use std::time::Duration;

    #[derive(Default)]
    struct ScriptedHost {
        replies: VecDeque<Result<HostResponse, HostError>>,
        seen: Vec<HostRequest>,
    }

    impl ScriptedHost {
        fn reply(mut self, reply: Result<HostResponse, HostError>) -> Self {
            self.replies.push_back(reply);
            self
        }
    }

    impl HostTransport for ScriptedHost {
        fn call(&mut self, request: &HostRequest) -> Result<HostResponse, HostError> {
            self.seen.push(request.clone());
            self.replies.pop_front().unwrap_or(Err(HostError::NoResponse))
        }
    }

    fn instant(max_attempts: usize) -> RetryConfig {
        RetryConfig {
            max_attempts,
            delay: Duration::ZERO,
        }
    }

    #[test]
    fn connect_retries_probe_then_announces_and_reads_saved_state() {
        let mut host = ScriptedHost::default()
            .reply(Err(HostError::NoResponse))
            .reply(Ok(HostResponse::failure("busy")))
            .reply(Ok(HostResponse::ok()))
            .reply(Ok(HostResponse::ok()))
            .reply(Ok(HostResponse::ok_with(json!({
                "savedState": { "w1": 1.0, "w2": 2.0, "c": 3.0, "epoch": 4 }
            }))));
        let saved = connect(&mut host, instant(8)).unwrap().unwrap();
        assert_eq!(saved.model(), Some(Model::new(1.0, 2.0, 3.0)));
        assert_eq!(saved.epoch, Some(4));
        assert_eq!(host.seen.len(), 5);
        assert!(host.seen[3].is(HostAction::Update, FRAME_RESOURCE));
        let announced = host.seen[3].values.as_ref().unwrap();
        assert_eq!(announced["name"], "perceptron-trainer");
        assert_eq!(announced["title"], "Perceptron Trainer");
        assert_eq!(announced["version"], "1.0.0");
    }

    #[test]
    fn connect_fails_with_last_error_after_attempts() {
        let mut host = ScriptedHost::default()
            .reply(Err(HostError::NoResponse))
            .reply(Ok(HostResponse::failure("still loading")));
        let err = connect(&mut host, instant(2)).unwrap_err();
        assert!(matches!(err, HostError::Rejected(message) if message == "still loading"));
        assert_eq!(host.seen.len(), 2);
    }

    #[test]
    fn connect_without_saved_state_starts_fresh() {
        let mut host = ScriptedHost::default()
            .reply(Ok(HostResponse::ok()))
            .reply(Ok(HostResponse::ok()))
            .reply(Ok(HostResponse::ok_with(json!({ "name": "frame" }))));
        assert_eq!(connect(&mut host, instant(1)).unwrap(), None);
    }

    #[test]
    fn get_state_exports_session() {
        let mut session = TrainingSession::default();
        let response = handle_host_request(
            &mut session,
            &HostRequest::new(HostAction::Get, STATE_RESOURCE),
        );
        assert!(response.success);
        let values = response.values.unwrap();
        assert_eq!(values["w1"], 0.4);
        assert_eq!(values["curIndex"], 0);
        assert_eq!(values["prevLineActive"], false);
    }

    #[test]
    fn set_state_accepts_nested_and_bare_payloads() {
        let mut session = TrainingSession::default();
        let nested = HostRequest::new(HostAction::Set, STATE_RESOURCE)
            .with_values(json!({ "interactiveState": { "w1": 2.0, "epoch": 3 } }));
        assert!(handle_host_request(&mut session, &nested).success);
        assert_eq!(session.model().w1, 2.0);
        assert_eq!(session.epoch(), 3);

        let bare = HostRequest::new(HostAction::Set, STATE_RESOURCE)
            .with_values(json!({ "lr": 0.5, "showError": true }));
        assert!(handle_host_request(&mut session, &bare).success);
        assert_eq!(session.learning_rate(), 0.5);
        assert!(session.display().show_error);
    }

    #[test]
    fn invalid_state_is_reported_without_changes() {
        let mut session = TrainingSession::default();
        let request = HostRequest::new(HostAction::Set, STATE_RESOURCE)
            .with_values(json!({ "w1": "heavy" }));
        let response = handle_host_request(&mut session, &request);
        assert!(!response.success);
        assert!(response.error_message().is_some());
        assert_eq!(session.model(), Model::DEFAULT);
    }

    #[test]
    fn other_requests_are_acknowledged() {
        let mut session = TrainingSession::default();
        let response = handle_host_request(
            &mut session,
            &HostRequest::new(HostAction::Notify, "dataContextChangeNotice"),
        );
        assert_eq!(response, HostResponse::ok());
    }
}
