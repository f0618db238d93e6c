//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + secret env vars
//!     → loader.rs (parse, overlay secrets, semantic validation)
//!     → AppConfig (validated, immutable for the process lifetime)
//!
//! state file (TOML)
//!     → store.rs (durable collection id; read at startup,
//!       written once by the provisioner)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - The collection id is the only durable state the service writes

pub mod loader;
pub mod schema;
pub mod store;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use store::CollectionStore;
