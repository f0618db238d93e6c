//! Custodial wallet management.
//!
//! Maps an external user identity to a platform-managed wallet. Creation is
//! fire-and-forget at the protocol level (no finalization event to poll),
//! so the manager re-queries up to a fixed bound instead of waiting
//! indefinitely the way transaction polling does.

use std::sync::Arc;

use crate::config::schema::WalletConfig;
use crate::platform::client::PlatformClient;
use crate::platform::poller::{Clock, SystemClock};
use crate::platform::types::{PlatformResult, WalletRecord};

/// Result of a get-or-create pass.
#[derive(Debug)]
pub enum WalletOutcome {
    /// A wallet with a populated address, pre-existing or newly created.
    Ready(WalletRecord),
    /// The creation was submitted but no queryable record appeared within
    /// the poll bound. Recoverable by the caller; the submitted creation
    /// may still complete later.
    NotVisible { attempts: u32 },
}

/// Manages custodial wallets keyed by external identity.
pub struct WalletManager {
    client: Arc<PlatformClient>,
    clock: Arc<dyn Clock>,
    config: WalletConfig,
}

impl WalletManager {
    pub fn new(client: Arc<PlatformClient>, config: WalletConfig) -> Self {
        Self::with_clock(client, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        client: Arc<PlatformClient>,
        config: WalletConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client,
            clock,
            config,
        }
    }

    /// Look up the wallet for an external identity without creating one.
    pub async fn get(&self, external_id: &str) -> PlatformResult<Option<WalletRecord>> {
        self.client.wallet(external_id).await
    }

    /// Return the existing wallet for `external_id`, creating one if absent.
    ///
    /// Idempotent: a pre-existing record short-circuits before any creation
    /// is attempted, so calling this twice never creates two wallets.
    pub async fn get_or_create(&self, external_id: &str) -> PlatformResult<WalletOutcome> {
        if let Some(record) = self.client.wallet(external_id).await? {
            tracing::debug!(external_id, "Managed wallet already exists");
            return Ok(WalletOutcome::Ready(record));
        }

        tracing::info!(external_id, "Creating managed wallet");
        self.client.create_wallet(external_id).await?;

        for attempt in 1..=self.config.poll_attempts {
            if let Some(record) = self.client.wallet(external_id).await? {
                tracing::info!(external_id, attempt, "Managed wallet ready");
                return Ok(WalletOutcome::Ready(record));
            }

            tracing::debug!(external_id, attempt, "Wallet not yet queryable");
            self.clock.sleep(self.config.poll_interval()).await;
        }

        tracing::warn!(
            external_id,
            attempts = self.config.poll_attempts,
            "Wallet did not become queryable within the poll bound"
        );
        Ok(WalletOutcome::NotVisible {
            attempts: self.config.poll_attempts,
        })
    }
}
