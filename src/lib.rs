//! # Vault Agent
//!
//! HTTP agents that turn REST requests into unsigned `FunctionCall` actions
//! for the vault and auction contract. The caller signs and submits the
//! returned action; this crate never touches the network.
//!
//! Two services share the same machinery with independent endpoint tables:
//! [`contract::Service::Auction`] and [`contract::Service::Vault`]. The vault
//! service also publishes a plugin manifest (see [`manifest`]).

pub mod config;
pub mod contract;
pub mod manifest;
pub mod server;

pub use config::AgentConfig;
pub use contract::{Action, ContractMethod, FunctionCallAction, Service, ValidationError};

/// Crate version, advertised in the plugin manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
