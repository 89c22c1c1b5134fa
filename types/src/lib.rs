//! Fundamental types for the rippled JSON-RPC client.
//!
//! This crate defines the core types the client crate builds on: account
//! addresses, transaction hashes, native and issued amounts, ledger
//! selectors, key material, and protocol constants.

pub mod address;
pub mod amount;
pub mod error;
pub mod hash;
pub mod keys;
pub mod ledger;
pub mod params;

pub use address::AccountId;
pub use amount::{Amount, AnyAmount, IssuedAmount};
pub use error::ValidationError;
pub use hash::TxHash;
pub use keys::{KeyType, Secret};
pub use ledger::LedgerSelector;
