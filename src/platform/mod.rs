//! Ledger platform integration.
//!
//! # Data Flow
//! ```text
//! operation.rs (named mutation/query + bound variables)
//!     → client.rs (one HTTP call, fixed credential, envelope parsing)
//!     → poller.rs (status loop until the transaction finalizes or fails)
//! ```
//!
//! # Constraints
//! - The credential is attached to every call and never logged
//! - A mutation accepted by the platform is never resubmitted
//! - Polling is a status check, not a retry of the mutation

pub mod client;
pub mod operation;
pub mod poller;
pub mod types;

pub use client::PlatformClient;
pub use poller::{Clock, SystemClock, TransactionPoller, TransactionSource};
pub use types::{
    CollectionId, OperationError, PlatformError, TransactionHandle, TransactionRecord,
    WalletRecord,
};
