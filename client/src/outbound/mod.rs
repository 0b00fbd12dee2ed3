//! Outbound adapters implementing domain ports.
//!
//! - **http**: reqwest-backed booking service.
//! - **identity**: watch-channel identity store for the host shell to feed.
//! - **navigation**: channel-backed navigator for the host shell to drain.
//!
//! Adapters translate between domain types and transport representations and
//! carry no gating or lifecycle logic.

pub mod http;
pub mod identity;
pub mod navigation;
