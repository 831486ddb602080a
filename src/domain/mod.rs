//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Domain types and local validation
//! - `wire.rs`: Raw serde structs matching backend responses (where they differ)
//! - `convert.rs`: `TryFrom`/`From` conversions with validation
//! - `state.rs`: Cache update logic for app-owned containers
//! - `client.rs`: Sub-client with HTTP methods and caching

pub mod metrics;
pub mod order;
pub mod restaurant;
