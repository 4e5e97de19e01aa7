//! rusty-trips/crates/rt-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Rusty-Trips:
//! owner-scoped trips and the activities nested inside them.

pub mod activities;
pub mod config;
pub mod error;
pub mod guard;
pub mod memory;
pub mod models;
pub mod service;
pub mod traits;
pub mod trips;
pub mod validate;

#[cfg(test)]
mod fixtures;

// Re-exporting for easier access in other crates
pub use config::AccessPolicy;
pub use error::*;
pub use memory::InMemoryStore;
pub use models::*;
pub use service::TripService;
pub use traits::*;
