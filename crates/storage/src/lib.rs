//! Persisted key-value storage for Ledgeline
//!
//! This crate provides the store the authentication flow persists its
//! session state into: an async [`SessionStore`] trait, a sled-backed
//! implementation for devices, and an in-memory implementation for tests
//! and wiring demos.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod sled_store;
pub mod store;

pub use memory::MemorySessionStore;
pub use sled_store::{SledConfig, SledSessionStore};
pub use store::{Result, SessionStore, StoreError};
