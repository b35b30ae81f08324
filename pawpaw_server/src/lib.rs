//! # PawPaw server
//!
//! This crate hosts the HTTP surface of the PawPaw pet-matching service. It is responsible for:
//! * extracting the authenticated user id from each request's bearer token,
//! * translating requests into engine API calls (swipes, gifts, wallets, profiles, matches),
//! * mapping engine errors onto HTTP status codes,
//! * pushing one-shot match events to currently-connected users via the connection registry.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more
//! information.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod notifier;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
