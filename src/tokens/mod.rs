//! Token operations facade.
//!
//! Thin pass-through for mint, burn and transfer. Each operation submits
//! its mutation with the collection id bootstrapped at startup and
//! acknowledges once the platform accepts the submission; waiting for
//! finalization is opt-in per deployment.

use std::sync::Arc;

use crate::config::schema::OperationsConfig;
use crate::platform::client::PlatformClient;
use crate::platform::operation;
use crate::platform::poller::TransactionPoller;
use crate::platform::types::{CollectionId, OperationError, TransactionHandle};

/// Runtime mint/burn/transfer operations against the provisioned collection.
pub struct TokenOps {
    client: Arc<PlatformClient>,
    poller: TransactionPoller<Arc<PlatformClient>>,
    collection: CollectionId,
    await_finalization: bool,
}

impl TokenOps {
    pub fn new(
        client: Arc<PlatformClient>,
        collection: CollectionId,
        config: &OperationsConfig,
        poller: TransactionPoller<Arc<PlatformClient>>,
    ) -> Self {
        Self {
            client,
            poller,
            collection,
            await_finalization: config.await_finalization,
        }
    }

    pub async fn mint(
        &self,
        token_id: u64,
        recipient: &str,
        amount: u64,
    ) -> Result<TransactionHandle, OperationError> {
        let op = operation::mint_token(&self.collection, token_id, recipient, amount);
        let label = format!("mint of token #{token_id}");
        self.submit(&op, token_id, recipient, amount, &label).await
    }

    pub async fn burn(
        &self,
        token_id: u64,
        account: &str,
        amount: u64,
    ) -> Result<TransactionHandle, OperationError> {
        let op = operation::burn_token(&self.collection, token_id, account, amount);
        let label = format!("burn of token #{token_id}");
        self.submit(&op, token_id, account, amount, &label).await
    }

    pub async fn transfer(
        &self,
        token_id: u64,
        recipient: &str,
        amount: u64,
    ) -> Result<TransactionHandle, OperationError> {
        let op = operation::transfer_token(&self.collection, token_id, recipient, amount);
        let label = format!("transfer of token #{token_id}");
        self.submit(&op, token_id, recipient, amount, &label).await
    }

    async fn submit(
        &self,
        op: &operation::RemoteOperation,
        token_id: u64,
        account: &str,
        amount: u64,
        label: &str,
    ) -> Result<TransactionHandle, OperationError> {
        let handle = self.client.submit_transaction(op).await?;

        tracing::info!(
            operation = op.name,
            token_id,
            account,
            amount,
            request_id = %handle,
            "Submission accepted"
        );

        if self.await_finalization {
            self.poller.await_finalization(handle, label).await?;
        }

        Ok(handle)
    }
}
