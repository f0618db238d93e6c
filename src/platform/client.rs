//! Ledger platform client.
//!
//! # Responsibilities
//! - Post named operations with bound variables to the platform endpoint
//! - Attach the fixed authorization credential to every call
//! - Parse the response envelope (data / errors), nothing deeper
//! - Surface transport and application errors unmodified to the caller
//!
//! No retry logic lives here; a submitted mutation is never resubmitted.

use std::time::{Duration, Instant};

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::observability::metrics;
use crate::platform::operation::{self, CollectionAttributes, RemoteOperation};
use crate::platform::types::{
    CollectionId, PlatformError, PlatformResult, TransactionEvent, TransactionHandle,
    TransactionRecord, TransactionResult, TransactionState, WalletRecord,
};

/// HTTP client for the remote ledger platform.
#[derive(Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    api_url: Url,
    api_key: String,
}

impl PlatformClient {
    /// Create a client for the given endpoint and credential.
    pub fn new(api_url: Url, api_key: &str, timeout: Duration) -> PlatformResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        tracing::info!(api_url = %api_url, "Platform client initialized");

        Ok(Self {
            http,
            api_url,
            api_key: api_key.to_string(),
        })
    }

    /// Submit an operation and return its payload from the response envelope.
    ///
    /// The payload is the `data` field named by the operation's
    /// `result_field`; `null` is a legitimate payload for queries that may
    /// find nothing.
    pub async fn submit(&self, op: &RemoteOperation) -> PlatformResult<Value> {
        let started = Instant::now();
        let outcome = self.post(op).await;
        metrics::record_platform_call(op.name, outcome.is_ok(), started.elapsed());

        if let Err(error) = &outcome {
            tracing::debug!(operation = op.name, error = %error, "Platform call failed");
        }

        outcome
    }

    async fn post(&self, op: &RemoteOperation) -> PlatformResult<Value> {
        let body = serde_json::json!({
            "query": op.document,
            "variables": op.params,
        });

        let response = self
            .http
            .post(self.api_url.clone())
            .header(AUTHORIZATION, self.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PlatformError::Application {
                operation: op.name,
                status,
                message,
            });
        }

        let envelope: Envelope = response.json().await?;
        if !envelope.errors.is_empty() {
            let message = envelope
                .errors
                .iter()
                .map(|error| error.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(PlatformError::Application {
                operation: op.name,
                status,
                message,
            });
        }

        let mut data = envelope.data.ok_or_else(|| PlatformError::Envelope {
            operation: op.name,
            detail: "response carried no data object".to_string(),
        })?;

        Ok(data
            .get_mut(op.result_field)
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    /// Submit a mutation and parse the transaction handle it was assigned.
    pub async fn submit_transaction(
        &self,
        op: &RemoteOperation,
    ) -> PlatformResult<TransactionHandle> {
        let payload = self.submit(op).await?;
        parse_handle(op.name, &payload)
    }

    /// Submit the collection-creation mutation.
    pub async fn create_collection(
        &self,
        attributes: &CollectionAttributes,
    ) -> PlatformResult<TransactionHandle> {
        self.submit_transaction(&operation::create_collection(attributes))
            .await
    }

    /// Submit a resource-token creation mutation.
    pub async fn create_token(
        &self,
        recipient: &str,
        collection: &CollectionId,
        token_id: u64,
        name: &str,
        media: &str,
    ) -> PlatformResult<TransactionHandle> {
        self.submit_transaction(&operation::create_token(
            recipient, collection, token_id, name, media,
        ))
        .await
    }

    /// Check whether a token already exists under the collection.
    ///
    /// The platform's "not found" application error is the negative result;
    /// any other error propagates to the caller.
    pub async fn token_exists(
        &self,
        collection: &CollectionId,
        token_id: u64,
    ) -> PlatformResult<bool> {
        match self.submit(&operation::get_token(collection, token_id)).await {
            Ok(_) => Ok(true),
            Err(error) if error.is_not_found() => Ok(false),
            Err(error) => Err(error),
        }
    }

    /// Fetch the current record for a submitted transaction.
    pub async fn transaction(
        &self,
        handle: TransactionHandle,
    ) -> PlatformResult<TransactionRecord> {
        let op = operation::get_transaction(handle);
        let payload = self.submit(&op).await?;
        let wire: TransactionWire =
            serde_json::from_value(payload).map_err(|error| PlatformError::Envelope {
                operation: op.name,
                detail: error.to_string(),
            })?;
        Ok(wire.into_record(handle))
    }

    /// Look up the custodial wallet for an external identity.
    ///
    /// Returns `None` until the platform reports a record with a populated
    /// address.
    pub async fn wallet(&self, external_id: &str) -> PlatformResult<Option<WalletRecord>> {
        let op = operation::get_wallet(external_id);
        let payload = self.submit(&op).await?;
        if payload.is_null() {
            return Ok(None);
        }

        let wire: WalletWire =
            serde_json::from_value(payload).map_err(|error| PlatformError::Envelope {
                operation: op.name,
                detail: error.to_string(),
            })?;

        Ok(wire.account.and_then(|account| {
            if account.address.is_empty() {
                None
            } else {
                Some(WalletRecord {
                    external_id: external_id.to_string(),
                    public_key: account.public_key,
                    address: account.address,
                })
            }
        }))
    }

    /// Submit the wallet-creation mutation.
    ///
    /// Fire-and-forget at the protocol level: unlike token mutations this
    /// returns no awaitable handle, so callers re-query instead of polling a
    /// transaction.
    pub async fn create_wallet(&self, external_id: &str) -> PlatformResult<()> {
        let op = operation::create_wallet(external_id);
        let payload = self.submit(&op).await?;
        if payload.as_bool() == Some(false) {
            return Err(PlatformError::Application {
                operation: op.name,
                status: reqwest::StatusCode::OK,
                message: "platform declined wallet creation".to_string(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

fn parse_handle(operation: &'static str, payload: &Value) -> PlatformResult<TransactionHandle> {
    let id = payload.get("id").cloned().unwrap_or(Value::Null);
    let parsed = match &id {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.parse().ok(),
        _ => None,
    };
    parsed.map(TransactionHandle).ok_or_else(|| PlatformError::Envelope {
        operation,
        detail: format!("submission returned no usable request id: {id}"),
    })
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TransactionWire {
    state: TransactionState,
    result: Option<TransactionResult>,
    events: Option<EventConnection>,
}

impl TransactionWire {
    fn into_record(self, handle: TransactionHandle) -> TransactionRecord {
        TransactionRecord {
            handle,
            state: self.state,
            result: self.result,
            events: self
                .events
                .map(|connection| {
                    connection
                        .edges
                        .into_iter()
                        .map(|edge| edge.node)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EventConnection {
    #[serde(default)]
    edges: Vec<EventEdge>,
}

#[derive(Debug, Deserialize)]
struct EventEdge {
    node: TransactionEvent,
}

#[derive(Debug, Deserialize)]
struct WalletWire {
    account: Option<AccountWire>,
}

#[derive(Debug, Deserialize)]
struct AccountWire {
    #[serde(rename = "publicKey", default)]
    public_key: String,
    #[serde(default)]
    address: String,
}
