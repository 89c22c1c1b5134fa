//! JSON-RPC client for a rippled node.
//!
//! Provides everything an application needs to talk to the ledger:
//! - Request envelope construction and outcome classification
//! - Table-driven decoding of results into typed entities
//! - Commands: `ping`, `server_info`, `account_info`, `wallet_propose`, `tx`
//! - The account payment workflow (unlock, sign, submit, verify)
//!
//! Retry policy is deliberately left to callers: the client never retries a
//! transport failure, and the payment workflow refuses to guess whether an
//! ambiguous submission reached the network.

pub mod account;
pub mod client;
pub mod config;
pub mod decode;
pub mod entities;
pub mod error;
pub mod result;
pub mod transport;

pub use account::{Account, PaymentOptions};
pub use client::{CallOptions, RippledClient};
pub use config::{ClientConfig, TlsPolicy};
pub use entities::{AccountInfo, BaseTx, PaymentTx, ServerInfo, Transaction, WalletPropose};
pub use error::{ApiSignal, ClientError, DecodeError};
pub use result::{QueryResult, RpcResult};
pub use transport::{HttpTransport, ResponseBody, Transport, TransportError, TransportResponse};
