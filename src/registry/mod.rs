//! Framework asset registry
//!
//! Handles the read-only framework index and the local framework store.

pub mod client;
pub mod store;

pub use client::RegistryClient;
pub use store::FrameworkStore;
