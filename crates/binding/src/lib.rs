//! Contract bindings for the deployed token contract.
//!
//! The onchain contract is an unmodified standard implementation: a
//! burnable ERC-20 base with an owner. The binding below covers the slice
//! of its interface this client consumes.
//!
//! All bindings are generated using alloy's `sol!` macro.

pub mod token;
