//! Interview Assistant API: résumé parsing, AI-backed question generation
//! and evaluation (with deterministic fallbacks), a flat-file session store,
//! and the interview flow state machine for embedding clients.

pub mod config;
pub mod errors;
pub mod evaluation;
pub mod extraction;
pub mod flow;
pub mod llm_client;
pub mod models;
pub mod questions;
pub mod routes;
pub mod sessions;
pub mod state;
pub mod store;
