//! PawPaw Social Engine
//!
//! The PawPaw engine holds the core logic of the pet-matching service: swipe recording, mutual-match
//! detection and the coin-gifting ledger. It is provider-agnostic.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@sqlite`]). SQLite is the supported backend. You should
//!    never need to access the database directly. Instead, use the public API provided by the engine.
//!    The exception is the data types used in the database. These are defined in the `db_types` module
//!    and are public.
//! 2. The engine public API ([`mod@ppe_api`]). This provides the public-facing functionality of the
//!    engine: swipe flows, pet profiles, wallets and gifting. Specific backends need to implement the
//!    traits in the [`mod@traits`] module in order to act as a backend for the PawPaw server.
//!
//! The engine also provides a set of events that can be subscribed to. These events are emitted when
//! certain actions occur within the engine — most notably, when two pets match. A simple actor
//! framework is used so that you can easily hook into these events and perform custom actions, such
//! as pushing a notification to the matched users' live connections.

pub mod db_types;
pub mod events;
mod ppe_api;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use ppe_api::{social_objects, ProfileApi, SwipeFlowApi, WalletApi};
