//! Conversions from external infrastructure errors into domain errors.

use keyring::Error as KeyringError;
use mediatracker_domain::MediaTrackerError;
use reqwest::Error as HttpError;
use tokio_tungstenite::tungstenite::Error as WsError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MediaTrackerError);

impl From<InfraError> for MediaTrackerError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MediaTrackerError> for InfraError {
    fn from(value: MediaTrackerError) -> Self {
        InfraError(value)
    }
}

impl From<HttpError> for InfraError {
    fn from(err: HttpError) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else if err.is_decode() {
            return InfraError(MediaTrackerError::Internal(format!(
                "failed to decode response body: {err}"
            )));
        } else {
            err.to_string()
        };
        InfraError(MediaTrackerError::Network(message))
    }
}

impl From<KeyringError> for InfraError {
    fn from(err: KeyringError) -> Self {
        InfraError(MediaTrackerError::Internal(format!("keyring failure: {err}")))
    }
}

impl From<WsError> for InfraError {
    fn from(err: WsError) -> Self {
        InfraError(MediaTrackerError::Network(format!("websocket failure: {err}")))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(err: serde_json::Error) -> Self {
        InfraError(MediaTrackerError::Internal(format!("serialization failure: {err}")))
    }
}

impl From<url::ParseError> for InfraError {
    fn from(err: url::ParseError) -> Self {
        InfraError(MediaTrackerError::Config(format!("invalid backend URL: {err}")))
    }
}
