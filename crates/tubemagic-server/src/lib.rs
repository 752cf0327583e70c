//! TubeMagic Hub HTTP server.
//!
//! Wires the launcher from `tubemagic-core` into an Axum server. Every
//! `GET /` is one launcher run rendered as the hosting page; component mode
//! additionally serves the content root under `/component/tubemagic_hub/`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
