//! Transaction finalization polling.
//!
//! # Responsibilities
//! - Drive a submitted transaction through its lifecycle until terminal
//! - Distinguish "awaiting operator confirmation" from "in flight"
//! - Surface on-chain failure as an error carrying the operation label
//!
//! The loop has no implicit timeout: some requests need out-of-band
//! confirmation in the platform console and that latency is
//! operator-controlled. Callers needing an upper bound impose one outside.
//! The wait step goes through an injectable [`Clock`] so tests can run many
//! cycles without real delay.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::platform::client::PlatformClient;
use crate::platform::types::{
    OperationError, PlatformResult, TransactionHandle, TransactionRecord, TransactionResult,
    TransactionState,
};

/// Cooperative wait step; the poller sleeps through this seam.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by the tokio timer.
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Source of transaction records for a handle.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn fetch(&self, handle: TransactionHandle) -> PlatformResult<TransactionRecord>;
}

#[async_trait]
impl TransactionSource for PlatformClient {
    async fn fetch(&self, handle: TransactionHandle) -> PlatformResult<TransactionRecord> {
        self.transaction(handle).await
    }
}

#[async_trait]
impl<T: TransactionSource + ?Sized> TransactionSource for Arc<T> {
    async fn fetch(&self, handle: TransactionHandle) -> PlatformResult<TransactionRecord> {
        (**self).fetch(handle).await
    }
}

/// Polls a transaction until it reaches a terminal state.
pub struct TransactionPoller<S> {
    source: S,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl<S: TransactionSource> TransactionPoller<S> {
    /// Create a poller with the production clock.
    pub fn new(source: S, interval: Duration) -> Self {
        Self::with_clock(source, interval, Arc::new(SystemClock))
    }

    /// Create a poller with an injected clock.
    pub fn with_clock(source: S, interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            interval,
        }
    }

    /// Wait until the transaction behind `handle` finalizes.
    ///
    /// Returns the finalized record on success. The only success terminal is
    /// `Finalized` with a `Success` result; a `Failed` state or result raises
    /// [`OperationError::Failed`] with the label. Every other observation
    /// (pending, unknown, finalized without a result yet) sleeps one
    /// interval and polls again.
    pub async fn await_finalization(
        &self,
        handle: TransactionHandle,
        label: &str,
    ) -> Result<TransactionRecord, OperationError> {
        loop {
            let record = self.source.fetch(handle).await?;

            match (record.state, record.result) {
                (TransactionState::Pending, _) => {
                    tracing::info!(
                        request_id = %handle,
                        operation = label,
                        "Awaiting confirmation of the request in the platform console"
                    );
                }
                (TransactionState::Finalized, Some(TransactionResult::Success)) => {
                    return Ok(record);
                }
                (TransactionState::Failed, _) | (_, Some(TransactionResult::Failed)) => {
                    return Err(OperationError::Failed {
                        label: label.to_string(),
                    });
                }
                _ => {
                    tracing::debug!(
                        request_id = %handle,
                        operation = label,
                        "Waiting for finalization"
                    );
                }
            }

            self.clock.sleep(self.interval).await;
        }
    }
}
