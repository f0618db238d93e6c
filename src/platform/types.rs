//! Platform-specific types and error definitions.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Identifier assigned by the platform to a submitted mutation.
///
/// Returned immediately on submission and used to poll for the eventual
/// outcome. The wire value may arrive as a JSON number or a numeric string;
/// both parse to the same handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionHandle(pub u64);

impl std::fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the collection all resource tokens live under.
///
/// Assigned by the platform when the collection finalizes; written to the
/// durable store exactly once per deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionId(pub String);

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CollectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Lifecycle state of a submitted transaction.
///
/// The platform reports more states than the service acts on; anything
/// unrecognized collapses to `Unknown` and is treated as not-yet-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionState {
    /// Awaiting out-of-band confirmation by a platform operator.
    Pending,
    /// Applied (or rejected) on-chain; consult the result.
    Finalized,
    /// Terminal failure before finalization.
    Failed,
    #[serde(other)]
    Unknown,
}

/// On-chain outcome of a finalized transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TransactionResult {
    #[serde(rename = "EXTRINSIC_SUCCESS")]
    Success,
    #[serde(rename = "EXTRINSIC_FAILED")]
    Failed,
    #[serde(other)]
    Unknown,
}

/// A single parameter attached to a transaction event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventParam {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// One event emitted by a finalized transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionEvent {
    #[serde(default)]
    pub params: Vec<EventParam>,
}

/// Latest observed status of a submitted transaction.
///
/// Produced by each poll; the orchestrator only ever holds the most recent
/// record for a handle.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub handle: TransactionHandle,
    pub state: TransactionState,
    pub result: Option<TransactionResult>,
    pub events: Vec<TransactionEvent>,
}

impl TransactionRecord {
    /// Scan the event list for the collection id assigned by the platform.
    pub fn collection_id(&self) -> Option<CollectionId> {
        self.events
            .iter()
            .flat_map(|event| event.params.iter())
            .find(|param| param.kind == "collection_id")
            .map(|param| CollectionId(param.value.clone()))
    }
}

/// A custodial wallet managed by the platform on behalf of a user identity.
///
/// Only the address crosses the HTTP boundary.
#[derive(Debug, Clone)]
pub struct WalletRecord {
    pub external_id: String,
    pub public_key: String,
    pub address: String,
}

/// Errors talking to the ledger platform.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Network or connectivity failure; always propagates.
    #[error("platform request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The platform returned a well-formed error for an operation.
    #[error("platform rejected {operation} ({status}): {message}")]
    Application {
        operation: &'static str,
        status: StatusCode,
        message: String,
    },

    /// The response body did not carry the expected envelope.
    #[error("malformed platform response for {operation}: {detail}")]
    Envelope {
        operation: &'static str,
        detail: String,
    },
}

impl PlatformError {
    /// Whether this is the "not found" class of application error.
    ///
    /// The platform answers queries for nonexistent tokens with HTTP 400;
    /// existence checks interpret exactly that as a negative result. Every
    /// other application error propagates.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PlatformError::Application { status, .. } if *status == StatusCode::BAD_REQUEST
        )
    }
}

/// Result type for platform calls.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Failure of an operation that was submitted to the platform.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The transaction reached a terminal failed state on-chain.
    #[error("{label} failed on the ledger platform")]
    Failed { label: String },

    #[error(transparent)]
    Platform(#[from] PlatformError),
}
