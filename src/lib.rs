//! # WhatsApp Gateway Client
//!
//! Client for a PSMS-style WhatsApp messaging gateway that authenticates
//! message sends with a short-lived bearer token obtained from a separate
//! token endpoint.
//!
//! Modules:
//! - `config` — gateway account settings and YAML loader
//! - `cache` — credential store abstraction and in-memory implementation
//! - `token` — token lifecycle: cached reuse, generation, forced refresh
//! - `dispatch` — message envelope construction and dispatch client
//! - `errors` — failure taxonomy and the gateway error-code catalog
//! - `server` — delivery-report webhook

pub mod cache;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod helpers;
pub mod server;
pub mod tests;
pub mod token;
pub mod utils;

pub use crate::cache::token_cache::{CachedToken, InMemoryTokenStore, TokenStore};
pub use crate::config::settings::GatewayConfig;
pub use crate::dispatch::client::MessageDispatcher;
pub use crate::dispatch::DispatchResult;
pub use crate::errors::GatewayError;
pub use crate::token::manager::TokenManager;
