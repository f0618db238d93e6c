//! Startup resource provisioning.
//!
//! # Responsibilities
//! - Ensure the collection exists (create once, persist its id durably)
//! - Ensure every catalogue token exists under it
//! - Fail the whole startup on any error; the process must not serve
//!   traffic partially provisioned
//!
//! Existence checks and creations fan out concurrently across token ids
//! (they touch independent on-chain entities) and join before the process
//! proceeds.

pub mod catalogue;

use std::sync::Arc;

use futures_util::future::try_join_all;
use thiserror::Error;

use crate::config::schema::ProvisionerConfig;
use crate::config::store::CollectionStore;
use crate::platform::client::PlatformClient;
use crate::platform::operation::CollectionAttributes;
use crate::platform::poller::{Clock, SystemClock, TransactionPoller};
use crate::platform::types::{CollectionId, OperationError, PlatformError};

pub use catalogue::{ResourceTokenSpec, RESOURCE_TOKENS};

/// Fatal startup provisioning failure.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    /// The creation finalized successfully but its event list carried no
    /// collection id; there is nothing to recover from that.
    #[error("collection creation finalized without a collection_id event")]
    MissingCollectionId,

    #[error("failed to persist collection id: {0}")]
    Store(#[from] std::io::Error),

    #[error("resource token '{name}' creation failed: {source}")]
    TokenCreation {
        name: &'static str,
        source: OperationError,
    },
}

/// Drives the one-time startup bootstrap of collection and tokens.
pub struct Provisioner {
    client: Arc<PlatformClient>,
    poller: TransactionPoller<Arc<PlatformClient>>,
    clock: Arc<dyn Clock>,
    store: CollectionStore,
    config: ProvisionerConfig,
    catalogue: &'static [ResourceTokenSpec],
}

impl Provisioner {
    pub fn new(client: Arc<PlatformClient>, store: CollectionStore, config: ProvisionerConfig) -> Self {
        Self::with_clock(client, store, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        client: Arc<PlatformClient>,
        store: CollectionStore,
        config: ProvisionerConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let poller =
            TransactionPoller::with_clock(client.clone(), config.poll_interval(), clock.clone());
        Self {
            client,
            poller,
            clock,
            store,
            config,
            catalogue: &RESOURCE_TOKENS,
        }
    }

    /// Run the full provisioning pass; invoked once before the listener
    /// binds. Either everything the service depends on exists afterwards,
    /// or the error aborts startup.
    pub async fn ensure_ready(mut self) -> Result<CollectionId, ProvisionError> {
        let collection = match self.store.current().cloned() {
            Some(id) => {
                tracing::info!(collection_id = %id, "Collection already provisioned");
                id
            }
            None => self.create_collection().await?,
        };

        let client = &self.client;
        let checks = self.catalogue.iter().map(|spec| {
            let collection = collection.clone();
            async move {
                let exists = client.token_exists(&collection, spec.id).await?;
                Ok::<_, PlatformError>((spec, exists))
            }
        });
        let checked = try_join_all(checks).await?;

        let missing: Vec<&ResourceTokenSpec> = checked
            .into_iter()
            .filter(|(_, exists)| !exists)
            .map(|(spec, _)| spec)
            .collect();

        if missing.is_empty() {
            tracing::info!(collection_id = %collection, "All resource tokens present");
            return Ok(collection);
        }

        tracing::info!(count = missing.len(), "Creating missing resource tokens");
        let creations = missing
            .into_iter()
            .map(|spec| self.create_resource_token(&collection, spec));
        try_join_all(creations).await?;

        tracing::info!(collection_id = %collection, "Provisioning complete");
        Ok(collection)
    }

    async fn create_collection(&mut self) -> Result<CollectionId, ProvisionError> {
        tracing::info!(
            name = %self.config.collection_name,
            "No collection id persisted, creating collection"
        );

        let attributes = CollectionAttributes {
            name: self.config.collection_name.clone(),
            banner_image: self.config.collection_banner_image.clone(),
            media: self.config.collection_media.clone(),
        };
        let handle = self.client.create_collection(&attributes).await?;

        // Give the platform time to register the request before polling it.
        self.clock.sleep(self.config.settle_delay()).await;

        let label = format!("'{}' collection creation", self.config.collection_name);
        let record = self.poller.await_finalization(handle, &label).await?;

        let id = record
            .collection_id()
            .ok_or(ProvisionError::MissingCollectionId)?;
        self.store.record(&id)?;

        tracing::info!(collection_id = %id, "Collection created");
        Ok(id)
    }

    async fn create_resource_token(
        &self,
        collection: &CollectionId,
        spec: &ResourceTokenSpec,
    ) -> Result<(), ProvisionError> {
        tracing::info!(token = spec.name, token_id = spec.id, "Creating resource token");

        let result = self.submit_and_finalize(collection, spec).await;
        if let Err(error) = &result {
            tracing::error!(token = spec.name, error = %error, "Resource token creation failed");
        }

        result.map_err(|source| ProvisionError::TokenCreation {
            name: spec.name,
            source,
        })
    }

    async fn submit_and_finalize(
        &self,
        collection: &CollectionId,
        spec: &ResourceTokenSpec,
    ) -> Result<(), OperationError> {
        let handle = self
            .client
            .create_token(
                &self.config.default_recipient,
                collection,
                spec.id,
                spec.name,
                spec.media,
            )
            .await?;

        self.clock.sleep(self.config.settle_delay()).await;

        let label = format!("'{}' token creation", spec.name);
        self.poller.await_finalization(handle, &label).await?;

        tracing::info!(token = spec.name, "Resource token created");
        Ok(())
    }
}
