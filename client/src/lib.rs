//! Role-gated booking client.
//!
//! Route guards decide whether an area renders for the current identity,
//! booking operations run through a shared loading/error lifecycle, and
//! promotion countdowns tick down on a background task. The domain reaches
//! the identity provider, navigator and booking API through ports; the
//! `outbound` module supplies adapters for them.

pub mod config;
pub mod domain;
pub mod outbound;
