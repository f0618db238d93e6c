//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! request
//!     → server.rs (Axum setup, timeout, request ID, tracing)
//!     → auth.rs (app-key gate, caller identity from the upstream gateway)
//!     → token.rs / wallet.rs (thin handlers over the facades)
//!     → response.rs ({success, ...} envelope)
//! ```

pub mod auth;
pub mod response;
pub mod server;
pub mod token;
pub mod wallet;

pub use server::{AppState, HttpServer};
