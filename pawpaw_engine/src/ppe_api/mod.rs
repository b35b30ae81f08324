//! # PawPaw engine API
//!
//! The public-facing API objects. Each wraps a backend implementing one (or more) of the
//! [`crate::traits`] and adds the flow logic that sits above raw storage: event publication for
//! fresh matches, and the fixed gift catalogue validation.

pub mod profile_api;
pub mod social_objects;
pub mod swipe_flow_api;
pub mod wallet_api;

pub use profile_api::ProfileApi;
pub use swipe_flow_api::SwipeFlowApi;
pub use wallet_api::WalletApi;
