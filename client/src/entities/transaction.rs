//! `tx` result: one transaction by hash, typed per its `TransactionType`.

use super::{is_drops_value, is_tx_hash_value, is_uint32};
use crate::decode::{
    canonicalize, check_fields, kind_name, snake_case_key, Document, FieldKind, FieldSpec,
};
use crate::error::{ClientError, DecodeError};
use rippled_types::params::TRANSACTION_TYPES;
use rippled_types::{Amount, AnyAmount, IssuedAmount, TxHash};
use serde_json::{Map, Value};

fn is_transaction_type(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| TRANSACTION_TYPES.contains(&s))
}

const BASE_FIELDS: &[FieldSpec] = &[
    FieldSpec::nullable("hash", &[FieldKind::String]).validated(is_tx_hash_value),
    FieldSpec::required("account", &[FieldKind::String]),
    FieldSpec::required("transaction_type", &[FieldKind::String]).validated(is_transaction_type),
    FieldSpec::required("fee", &[FieldKind::String]).validated(is_drops_value),
    FieldSpec::required("sequence", &[FieldKind::Integer]).validated(is_uint32),
    FieldSpec::required("flags", &[FieldKind::Integer]),
    FieldSpec::nullable("account_txn_id", &[FieldKind::String]).validated(is_tx_hash_value),
    FieldSpec::nullable("last_ledger_sequence", &[FieldKind::Integer]).validated(is_uint32),
    FieldSpec::nullable("memos", &[FieldKind::Array, FieldKind::Object]),
    FieldSpec::nullable("signers", &[FieldKind::Array, FieldKind::Object]),
    FieldSpec::nullable("source_tag", &[FieldKind::Integer]).validated(is_uint32),
    FieldSpec::required("signing_pub_key", &[FieldKind::String]),
    FieldSpec::nullable("txn_signature", &[FieldKind::String]),
    FieldSpec::nullable("ledger_index", &[FieldKind::Integer]).validated(is_uint32),
];

const PAYMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("amount", &[FieldKind::String, FieldKind::Object]),
    FieldSpec::required("destination", &[FieldKind::String]),
    FieldSpec::nullable("destination_tag", &[FieldKind::Integer]).validated(is_uint32),
    FieldSpec::nullable("invoice_id", &[FieldKind::String]).validated(is_tx_hash_value),
    FieldSpec::nullable("paths", &[FieldKind::Array, FieldKind::Object]),
    FieldSpec::nullable("send_max", &[FieldKind::String]).validated(is_drops_value),
    FieldSpec::nullable("deliver_min", &[FieldKind::String]).validated(is_drops_value),
];

/// Fields every transaction type shares.
///
/// `hash`, `ledger_index` and friends are populated when the transaction
/// came out of a closed ledger; a locally signed but unsubmitted `tx_json`
/// lacks them.
#[derive(Clone, Debug)]
pub struct BaseTx {
    pub hash: Option<TxHash>,
    pub account: String,
    pub transaction_type: String,
    pub fee: Amount,
    pub sequence: u32,
    pub flags: u32,
    pub account_txn_id: Option<TxHash>,
    pub last_ledger_sequence: Option<u32>,
    pub memos: Option<Value>,
    pub signers: Option<Value>,
    pub source_tag: Option<u32>,
    pub signing_pub_key: String,
    pub txn_signature: Option<String>,
    pub ledger_index: Option<u32>,
}

/// Payment-specific fields on top of [`BaseTx`].
#[derive(Clone, Debug)]
pub struct PaymentTx {
    pub base: BaseTx,
    pub amount: AnyAmount,
    pub destination: String,
    pub destination_tag: Option<u32>,
    pub invoice_id: Option<String>,
    pub paths: Option<Value>,
    pub send_max: Option<String>,
    pub deliver_min: Option<String>,
}

/// A decoded transaction, discriminated by `TransactionType`.
#[derive(Clone, Debug)]
pub enum Transaction {
    Base(BaseTx),
    Payment(PaymentTx),
}

impl Transaction {
    /// Decodes a `tx` result or an embedded `tx_json` object.
    ///
    /// The discriminator is read from the raw wire key before any case
    /// canonicalization; a missing or unrecognized type fails without
    /// touching the field tables.
    pub fn decode(result: &Map<String, Value>) -> Result<Self, ClientError> {
        let transaction_type = match result.get("TransactionType").and_then(Value::as_str) {
            Some(t) if TRANSACTION_TYPES.contains(&t) => t.to_string(),
            Some(t) => return Err(ClientError::UnknownTransactionType(t.to_string())),
            None => return Err(ClientError::UnknownTransactionType("(missing)".to_string())),
        };

        let fields = canonicalize(result, snake_case_key);
        check_fields(&fields, BASE_FIELDS)?;
        let is_payment = transaction_type == "Payment";
        if is_payment {
            check_fields(&fields, PAYMENT_FIELDS)?;
        }

        let doc = Document::new(fields);
        let base = BaseTx::from_document(&doc)?;
        if is_payment {
            Ok(Self::Payment(PaymentTx::from_document(base, &doc)?))
        } else {
            Ok(Self::Base(base))
        }
    }

    /// The shared base fields regardless of variant.
    pub fn base(&self) -> &BaseTx {
        match self {
            Self::Base(base) => base,
            Self::Payment(payment) => &payment.base,
        }
    }

    pub fn hash(&self) -> Option<&TxHash> {
        self.base().hash.as_ref()
    }
}

impl BaseTx {
    fn from_document(doc: &Document) -> Result<Self, ClientError> {
        let hash = match doc.opt_str_field("hash") {
            Some(s) => Some(s.parse::<TxHash>()?),
            None => None,
        };
        let account_txn_id = match doc.opt_str_field("account_txn_id") {
            Some(s) => Some(s.parse::<TxHash>()?),
            None => None,
        };
        Ok(Self {
            hash,
            account: doc.str_field("account")?.to_string(),
            transaction_type: doc.str_field("transaction_type")?.to_string(),
            fee: Amount::from_drops(doc.str_field("fee")?)?,
            sequence: doc.u32_field("sequence")?,
            flags: doc.u32_field("flags")?,
            account_txn_id,
            last_ledger_sequence: doc.opt_u32_field("last_ledger_sequence"),
            memos: doc.opt_value("memos").cloned(),
            signers: doc.opt_value("signers").cloned(),
            source_tag: doc.opt_u32_field("source_tag"),
            signing_pub_key: doc.str_field("signing_pub_key")?.to_string(),
            txn_signature: doc.opt_str_field("txn_signature").map(str::to_string),
            ledger_index: doc.opt_u32_field("ledger_index"),
        })
    }
}

impl PaymentTx {
    fn from_document(base: BaseTx, doc: &Document) -> Result<Self, ClientError> {
        let amount = match doc.value("amount")? {
            Value::String(drops) => AnyAmount::Native(Amount::from_drops(drops)?),
            Value::Object(parts) => AnyAmount::Issued(issued_from_object(parts)),
            other => {
                return Err(ClientError::Decode(DecodeError::WrongKind {
                    field: "amount".to_string(),
                    expected: "string or object".to_string(),
                    got: kind_name(other),
                }));
            }
        };
        Ok(Self {
            base,
            amount,
            destination: doc.str_field("destination")?.to_string(),
            destination_tag: doc.opt_u32_field("destination_tag"),
            invoice_id: doc.opt_str_field("invoice_id").map(str::to_string),
            paths: doc.opt_value("paths").cloned(),
            send_max: doc.opt_str_field("send_max").map(str::to_string),
            deliver_min: doc.opt_str_field("deliver_min").map(str::to_string),
        })
    }
}

/// Issued amounts arrive with whichever of the three parts the ledger kept;
/// construction is permissive and completeness is the caller's check.
fn issued_from_object(parts: &Map<String, Value>) -> IssuedAmount {
    IssuedAmount::from_parts(
        parts.get("currency").and_then(Value::as_str),
        parts.get("value").and_then(Value::as_str),
        parts.get("issuer").and_then(Value::as_str),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payment_result() -> Value {
        json!({
            "Account": "rMV5cxLAKs8SuoZ8Ly8geDSnXgf97pvKAL",
            "Amount": "2500000",
            "Destination": "rU4Dpn7hVsRyAGhnZz5fkLyHPc9BHBaiQB",
            "DestinationTag": 736049272,
            "Fee": "10",
            "Flags": 2147483648u32,
            "LastLedgerSequence": 14091640,
            "Sequence": 336,
            "SigningPubKey": "02C38FC8BC0DC1E99F1A4AC1CF2F9A43CBB0BF4187AE806F12B4EC0FD0BCDA4C3C",
            "TransactionType": "Payment",
            "TxnSignature": "3045022100D55ED1953F860ABC1839C39A0B0E97F40F4D1D5D24B9C0CB6B36F2A8CBD9427F",
            "hash": "E08D6E9754025BA2534A78707605E0601F03ACE063687A0CA1BDDACFCD1698C7",
            "ledger_index": 14091160,
            "status": "success",
            "validated": true,
        })
    }

    #[test]
    fn test_decode_native_payment() {
        let tx = Transaction::decode(payment_result().as_object().unwrap()).unwrap();
        let Transaction::Payment(payment) = &tx else {
            panic!("expected payment variant");
        };
        assert_eq!(payment.base.account, "rMV5cxLAKs8SuoZ8Ly8geDSnXgf97pvKAL");
        assert_eq!(payment.base.fee.drops(), "10");
        assert_eq!(payment.base.fee.display(), "0.00001");
        assert_eq!(payment.destination, "rU4Dpn7hVsRyAGhnZz5fkLyHPc9BHBaiQB");
        assert_eq!(payment.destination_tag, Some(736049272));
        let AnyAmount::Native(amount) = &payment.amount else {
            panic!("expected native amount");
        };
        assert_eq!(amount.display(), "2.5");
        assert_eq!(
            tx.hash().unwrap().to_hex(),
            "e08d6e9754025ba2534a78707605e0601f03ace063687a0ca1bddacfcd1698c7"
        );
    }

    #[test]
    fn test_decode_issued_payment() {
        let mut result = payment_result();
        result["Amount"] = json!({
            "currency": "USD",
            "value": "12.5",
            "issuer": "rMV5cxLAKs8SuoZ8Ly8geDSnXgf97pvKAL",
        });
        let tx = Transaction::decode(result.as_object().unwrap()).unwrap();
        let Transaction::Payment(payment) = tx else {
            panic!("expected payment variant");
        };
        let AnyAmount::Issued(issued) = &payment.amount else {
            panic!("expected issued amount");
        };
        assert!(issued.is_complete());
        assert_eq!(issued.currency(), Some("USD"));
        assert_eq!(issued.value(), Some("12.5"));
    }

    #[test]
    fn test_partial_issued_amount_kept_incomplete() {
        let mut result = payment_result();
        result["Amount"] = json!({"currency": "USD", "value": "not a number"});
        let tx = Transaction::decode(result.as_object().unwrap()).unwrap();
        let Transaction::Payment(payment) = tx else {
            panic!("expected payment variant");
        };
        let AnyAmount::Issued(issued) = &payment.amount else {
            panic!("expected issued amount");
        };
        assert_eq!(issued.currency(), Some("USD"));
        assert_eq!(issued.value(), None);
        assert!(!issued.is_complete());
    }

    #[test]
    fn test_non_payment_takes_base_variant() {
        let result = json!({
            "Account": "rMV5cxLAKs8SuoZ8Ly8geDSnXgf97pvKAL",
            "Fee": "12",
            "Flags": 0,
            "Sequence": 4,
            "SigningPubKey": "02C38FC8BC0DC1E99F1A4AC1CF2F9A43CBB0BF4187AE806F12B4EC0FD0BCDA4C3C",
            "TransactionType": "AccountSet",
            "status": "success",
        });
        let tx = Transaction::decode(result.as_object().unwrap()).unwrap();
        assert!(matches!(tx, Transaction::Base(_)));
        assert_eq!(tx.base().transaction_type, "AccountSet");
        assert_eq!(tx.hash(), None);
        assert_eq!(tx.base().txn_signature, None);
    }

    #[test]
    fn test_unknown_transaction_type() {
        let mut result = payment_result();
        result["TransactionType"] = json!("Teleport");
        let err = Transaction::decode(result.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, ClientError::UnknownTransactionType(t) if t == "Teleport"));
    }

    #[test]
    fn test_missing_transaction_type() {
        let mut result = payment_result();
        result.as_object_mut().unwrap().remove("TransactionType");
        assert!(matches!(
            Transaction::decode(result.as_object().unwrap()),
            Err(ClientError::UnknownTransactionType(_))
        ));
    }

    #[test]
    fn test_account_txn_id_canonicalized_from_wire_key() {
        let mut result = payment_result();
        result["AccountTxnID"] =
            json!("0D5FB50FA65C9FE1538FD7E398FFFE9D1908DFA4576D8D7A020040686F93C77D");
        let tx = Transaction::decode(result.as_object().unwrap()).unwrap();
        assert!(tx.base().account_txn_id.is_some());
    }

    #[test]
    fn test_truncated_hash_fails_validation() {
        let mut result = payment_result();
        result["hash"] = json!("E08D6E9754025BA2");
        let err = Transaction::decode(result.as_object().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Decode(DecodeError::FailedValidation(field)) if field == "hash"
        ));
    }

    #[test]
    fn test_fractional_fee_rejected() {
        let mut result = payment_result();
        result["Fee"] = json!("10.5");
        assert!(Transaction::decode(result.as_object().unwrap()).is_err());
    }
}
