//! Protocol constants for the rippled JSON-RPC surface.
//!
//! Everything here is fixed by the ledger protocol, not configurable.

// ── Amounts ──────────────────────────────────────────────────────────────

/// Decimal places between the display unit and drops: 1 XRP = 10^6 drops.
pub const DEFAULT_SCALE: u32 = 6;

/// Largest value a uint32 wire field may carry (tags, sequences, flags).
pub const UINT32_MAX: u64 = 4_294_967_295;

/// Longest accepted currency code for issued tokens.
pub const CURRENCY_MAX_LEN: usize = 16;

// ── Node endpoint ────────────────────────────────────────────────────────

/// Lowest port a rippled JSON-RPC endpoint is accepted on.
pub const PORT_MIN: u16 = 1000;

/// Highest port a rippled JSON-RPC endpoint is accepted on.
pub const PORT_MAX: u16 = 65534;

// ── Ledger references ────────────────────────────────────────────────────

/// Shortcut keywords accepted wherever a ledger index or hash would be.
pub const LEDGER_KEYWORDS: [&str; 3] = ["validated", "closed", "current"];

/// Hex length of a ledger version hash.
pub const LEDGER_HASH_LEN: usize = 40;

// ── Transactions ─────────────────────────────────────────────────────────

/// Transaction types the ledger defines; the decoder refuses anything else.
pub const TRANSACTION_TYPES: [&str; 18] = [
    "AccountSet",
    "AccountDelete",
    "CheckCancel",
    "CheckCash",
    "CheckCreate",
    "DepositPreauth",
    "EscrowCancel",
    "EscrowCreate",
    "EscrowFinish",
    "OfferCancel",
    "OfferCreate",
    "Payment",
    "PaymentChannelClaim",
    "PaymentChannelCreate",
    "PaymentChannelFund",
    "SetRegularKey",
    "SignerListSet",
    "TrustSet",
];

/// Engine code a submitted transaction must come back with to count as applied.
pub const ENGINE_SUCCESS: &str = "tesSUCCESS";
