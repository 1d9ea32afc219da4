//! Snapgate SDK
//!
//! Shared wire types for the Snapgate HTTP API and the Midtrans gateway,
//! notification signature helpers, and a typed gateway client behind the
//! `client` feature.

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
pub mod signature;
