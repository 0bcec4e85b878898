//! Static configuration for the token console.
//!
//! This crate provides:
//! - Network profiles (mainnet, testnet) with chain identity, RPC and
//!   explorer endpoints and the native currency
//! - The deployed token contract address per network

pub mod profile;

pub use profile::{NetworkKind, NetworkProfile};
