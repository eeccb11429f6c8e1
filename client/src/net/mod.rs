//! Networking modules for the trading API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the session crate's `AuthApi` over `gloo-net` and adds
//! the authenticated list reads; `types` defines their wire schema.

pub mod api;
pub mod types;
