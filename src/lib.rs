//! Custodial game-asset service.
//!
//! Bootstraps a token collection on a remote ledger platform at startup and
//! exposes authenticated HTTP endpoints for mint/burn/transfer and per-user
//! custodial wallets. The platform only offers an asynchronous submit/poll
//! API; the `platform` module owns that orchestration.

pub mod config;
pub mod http;
pub mod observability;
pub mod platform;
pub mod provisioner;
pub mod tokens;
pub mod wallet;

pub use config::AppConfig;
pub use http::HttpServer;
pub use platform::PlatformClient;
