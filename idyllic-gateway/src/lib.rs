//! HTTP API gateway for the Idyllic service.
//!
//! Exposes health, greeting, and in-memory user endpoints over axum. All user
//! state lives in an [`idyllic_core::UserStore`] injected through router state.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod telemetry;
