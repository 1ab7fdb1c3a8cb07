//! HTTP server for the vault contract agents.
//!
//! Each endpoint validates its JSON body and answers with an unsigned
//! `FunctionCall` action; nothing is signed or sent to the network.
//!
//! # Endpoints
//!
//! - `POST /api/<method>`               — Build a call for a contract method
//! - `GET  /api/ping`                   — Liveness probe
//! - `GET  /.well-known/ai-plugin.json` — Plugin manifest (vault service only)

pub mod routes;

pub use routes::{app_router, serve, AppState};
