//! Account-bound workflow: info queries and the sign-then-submit payment.

use crate::client::{required_result, RippledClient};
use crate::entities::AccountInfo;
use crate::error::{ApiSignal, ClientError};

use rippled_types::address::is_account_id;
use rippled_types::params::ENGINE_SUCCESS;
use rippled_types::{AccountId, AnyAmount, KeyType, LedgerSelector, Secret, TxHash};
use serde_json::{json, Map, Value};

/// Credential state of one account workflow.
///
/// A single credential is active at a time; unlocking again replaces it.
enum UnlockState {
    Locked,
    Unlocked { secret: Secret, key_type: KeyType },
}

/// Optional knobs for [`Account::payment_with`].
#[derive(Clone, Copy, Debug)]
pub struct PaymentOptions {
    /// `DestinationTag` for the payment. `Some(0)` is a valid tag and is sent.
    pub destination_tag: Option<u32>,
    /// `SourceTag` for the payment.
    pub source_tag: Option<u32>,
    /// Ceiling on the fee as a multiple of the reference fee; the node
    /// refuses to sign past it.
    pub fee_mult_max: u32,
    /// Ask the node to sign without submitting-related lookups.
    pub offline: bool,
}

impl Default for PaymentOptions {
    fn default() -> Self {
        Self {
            destination_tag: None,
            source_tag: None,
            fee_mult_max: 100,
            offline: false,
        }
    }
}

/// Workflow handle bound to one account id.
///
/// Holds the unlock credential between calls, so one instance per
/// outstanding payment; the sign and submit phases of a single call are
/// strictly ordered and never retried here. Retry policy belongs to the
/// caller, because retrying an ambiguous submission can pay twice.
pub struct Account<'a> {
    client: &'a RippledClient,
    account_id: AccountId,
    strict: bool,
    unlock: UnlockState,
}

impl<'a> Account<'a> {
    pub(crate) fn new(client: &'a RippledClient, account_id: AccountId) -> Self {
        Self {
            client,
            account_id,
            strict: true,
            unlock: UnlockState::Locked,
        }
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Toggle strict account resolution (on by default).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Arm the workflow with a passphrase credential. Replaces any prior
    /// credential; the material is zeroized when the workflow drops.
    pub fn unlock_with_passphrase(&mut self, passphrase: impl Into<String>, key_type: KeyType) {
        self.unlock = UnlockState::Unlocked {
            secret: Secret::Passphrase(passphrase.into()),
            key_type,
        };
    }

    /// Arm the workflow with a hex seed credential. Replaces any prior
    /// credential.
    pub fn unlock_with_seed(&mut self, seed_hex: impl Into<String>, key_type: KeyType) {
        self.unlock = UnlockState::Unlocked {
            secret: Secret::SeedHex(seed_hex.into()),
            key_type,
        };
    }

    /// Queries the account against the validated ledger.
    pub async fn info(&self) -> Result<AccountInfo, ClientError> {
        self.info_at(LedgerSelector::default()).await
    }

    /// Queries the account against an explicit ledger version.
    pub async fn info_at(&self, ledger: LedgerSelector) -> Result<AccountInfo, ClientError> {
        let mut params = json!({
            "account": self.account_id,
            "strict": self.strict,
        });
        let (key, value) = ledger.param();
        params[key] = value;

        let outcome = self.client.call("account_info", params).await?;
        AccountInfo::decode(required_result(&outcome)?.raw())
    }

    /// Sends a payment with default options.
    pub async fn payment(
        &self,
        destination: &str,
        amount: impl Into<AnyAmount>,
    ) -> Result<TxHash, ClientError> {
        self.payment_with(destination, amount, PaymentOptions::default())
            .await
    }

    /// Signs and submits a payment, returning the transaction hash the node
    /// reported.
    ///
    /// The two phases are strictly ordered: `sign` must yield a `tx_blob`
    /// before `submit` starts, so a [`SigningFailed`] is always safe to
    /// retry. A [`SubmissionAmbiguous`] is not, since the blob may have
    /// reached the network even though the response was unusable.
    ///
    /// [`SigningFailed`]: ClientError::SigningFailed
    /// [`SubmissionAmbiguous`]: ClientError::SubmissionAmbiguous
    pub async fn payment_with(
        &self,
        destination: &str,
        amount: impl Into<AnyAmount>,
        options: PaymentOptions,
    ) -> Result<TxHash, ClientError> {
        if !is_account_id(destination) {
            return Err(ClientError::InvalidDestination(destination.to_string()));
        }
        let amount = amount.into();
        if let AnyAmount::Issued(issued) = &amount {
            // Inbound decoding tolerates partial issued amounts; a payment
            // we author must carry all three parts.
            if !issued.is_complete() {
                return Err(ClientError::IncompleteIssuedAmount);
            }
        }
        let UnlockState::Unlocked { secret, key_type } = &self.unlock else {
            return Err(ClientError::AccountNotUnlocked);
        };

        let mut tx_json = Map::new();
        tx_json.insert("TransactionType".to_string(), json!("Payment"));
        tx_json.insert("Account".to_string(), json!(self.account_id));
        tx_json.insert("Amount".to_string(), json!(amount));
        tx_json.insert("Destination".to_string(), json!(destination));
        if let Some(tag) = options.destination_tag {
            tx_json.insert("DestinationTag".to_string(), json!(tag));
        }
        if let Some(tag) = options.source_tag {
            tx_json.insert("SourceTag".to_string(), json!(tag));
        }

        let mut params = json!({
            "offline": options.offline,
            "fee_mult_max": options.fee_mult_max,
            "key_type": key_type.as_str(),
            "tx_json": tx_json,
        });
        params[secret.param_name()] = json!(secret.reveal());

        tracing::debug!(account = %self.account_id, destination, "signing payment");
        let signed = match self.client.call("sign", params).await {
            Ok(outcome) => outcome,
            Err(ClientError::Api {
                signal: Some(ApiSignal::HighFee),
                ..
            }) => {
                return Err(ClientError::FeeTooLow {
                    fee_mult_max: options.fee_mult_max,
                });
            }
            Err(err) => return Err(err),
        };
        let blob = match required_result(&signed)?.get("tx_blob") {
            Some(Value::String(blob)) if !blob.is_empty() => blob.clone(),
            _ => return Err(ClientError::SigningFailed),
        };
        tracing::debug!(account = %self.account_id, "transaction signed");

        let submitted = self.client.call("submit", json!({"tx_blob": blob})).await?;
        let result = required_result(&submitted)?;
        let engine_result = result
            .get("engine_result")
            .and_then(Value::as_str)
            .unwrap_or("(missing)");
        if engine_result != ENGINE_SUCCESS {
            return Err(ClientError::SubmissionFailed {
                engine_result: engine_result.to_string(),
            });
        }

        let Some(Value::Object(tx_json)) = result.get("tx_json") else {
            return Err(self.ambiguous("submit result has no tx_json object"));
        };
        let hash = match tx_json.get("hash").and_then(Value::as_str) {
            Some(text) => match TxHash::from_hex(text) {
                Ok(hash) => hash,
                Err(_) => {
                    return Err(self.ambiguous(format!(
                        "submit returned a malformed transaction hash: {text}"
                    )));
                }
            },
            None => return Err(self.ambiguous("submit result tx_json has no hash")),
        };

        tracing::info!(account = %self.account_id, hash = %hash, "payment submitted");
        Ok(hash)
    }

    /// The engine accepted the transaction but the confirming fields were
    /// unusable. Callers must not blindly retry past this point.
    fn ambiguous(&self, detail: impl Into<String>) -> ClientError {
        let detail = detail.into();
        tracing::warn!(
            account = %self.account_id,
            %detail,
            "ambiguous submission: the transaction may already have been broadcast"
        );
        ClientError::SubmissionAmbiguous { detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::transport::nullable::{NullState, NullTransport};
    use rippled_types::{Amount, IssuedAmount};
    use std::sync::Arc;

    const ACCOUNT: &str = "rMV5cxLAKs8SuoZ8Ly8geDSnXgf97pvKAL";
    const DEST: &str = "rU4Dpn7hVsRyAGhnZz5fkLyHPc9BHBaiQB";
    const HASH: &str = "E08D6E9754025BA2534A78707605E0601F03ACE063687A0CA1BDDACFCD1698C7";

    fn null_client() -> (RippledClient, Arc<NullState>) {
        let (transport, state) = NullTransport::new();
        let client = RippledClient::with_transport(
            ClientConfig::new("localhost", 5005),
            Box::new(transport),
        )
        .unwrap();
        (client, state)
    }

    fn account_info_result() -> Value {
        json!({"result": {
            "account_data": {
                "Account": ACCOUNT,
                "Balance": "1000000",
                "Flags": 0,
                "LedgerEntryType": "AccountRoot",
                "OwnerCount": 0,
                "Sequence": 336,
            },
            "ledger_index": 14091520,
            "status": "success",
            "validated": true,
        }})
    }

    fn sign_result(blob: &str) -> Value {
        json!({"result": {"status": "success", "tx_blob": blob}})
    }

    fn submit_result(engine: &str) -> Value {
        json!({"result": {
            "status": "success",
            "engine_result": engine,
            "tx_json": {"hash": HASH},
        }})
    }

    fn xrp(display: &str) -> Amount {
        Amount::from_display(display).unwrap()
    }

    #[tokio::test]
    async fn test_info_defaults_to_validated_ledger() {
        let (client, state) = null_client();
        state.enqueue_json(200, account_info_result());

        let account = client.account(ACCOUNT.parse().unwrap());
        let info = account.info().await.unwrap();

        let params = &state.requests()[0].1["params"][0];
        assert_eq!(params["account"], ACCOUNT);
        assert_eq!(params["strict"], true);
        assert_eq!(params["ledger"], "validated");
        assert_eq!(info.balance.drops(), "1000000");
        assert_eq!(info.balance.display(), "1");
    }

    #[tokio::test]
    async fn test_info_at_index_and_hash() {
        let (client, state) = null_client();
        state.enqueue_json(200, account_info_result());
        state.enqueue_json(200, account_info_result());

        let account = client.account(ACCOUNT.parse().unwrap());
        account.info_at(LedgerSelector::Index(123)).await.unwrap();
        account
            .info_at(LedgerSelector::parse("E74B35BCD6CC4B55E24EAD5DB01A1D7BAC4D0AAE").unwrap())
            .await
            .unwrap();

        let requests = state.requests();
        assert_eq!(requests[0].1["params"][0]["ledger"], 123);
        assert_eq!(
            requests[1].1["params"][0]["ledger_hash"],
            "E74B35BCD6CC4B55E24EAD5DB01A1D7BAC4D0AAE"
        );
        assert!(requests[1].1["params"][0].get("ledger").is_none());
    }

    #[tokio::test]
    async fn test_strict_flag_carried() {
        let (client, state) = null_client();
        state.enqueue_json(200, account_info_result());

        let account = client.account(ACCOUNT.parse().unwrap()).strict(false);
        account.info().await.unwrap();

        assert_eq!(state.requests()[0].1["params"][0]["strict"], false);
    }

    #[tokio::test]
    async fn test_payment_requires_unlock() {
        let (client, state) = null_client();
        let account = client.account(ACCOUNT.parse().unwrap());

        let err = account.payment(DEST, xrp("1")).await.unwrap_err();
        assert!(matches!(err, ClientError::AccountNotUnlocked));
        // Rejected before anything went out.
        assert!(state.requests().is_empty());
    }

    #[tokio::test]
    async fn test_payment_rejects_bad_destination() {
        let (client, state) = null_client();
        let mut account = client.account(ACCOUNT.parse().unwrap());
        account.unlock_with_passphrase("open sesame", KeyType::Secp256k1);

        let err = account.payment("not-an-address", xrp("1")).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidDestination(_)));
        assert!(state.requests().is_empty());
    }

    #[tokio::test]
    async fn test_payment_rejects_incomplete_issued_amount() {
        let (client, state) = null_client();
        let mut account = client.account(ACCOUNT.parse().unwrap());
        account.unlock_with_passphrase("open sesame", KeyType::Secp256k1);

        let partial = IssuedAmount::from_parts(Some("USD"), None, None);
        let err = account.payment(DEST, partial).await.unwrap_err();
        assert!(matches!(err, ClientError::IncompleteIssuedAmount));
        assert!(state.requests().is_empty());
    }

    #[tokio::test]
    async fn test_payment_happy_path() {
        let (client, state) = null_client();
        state.enqueue_json(200, sign_result("DEADBEEF"));
        state.enqueue_json(200, submit_result("tesSUCCESS"));

        let mut account = client.account(ACCOUNT.parse().unwrap());
        account.unlock_with_passphrase("open sesame", KeyType::Secp256k1);
        let hash = account.payment(DEST, xrp("2.5")).await.unwrap();
        assert_eq!(hash.to_hex(), HASH.to_lowercase());

        let requests = state.requests();
        assert_eq!(requests.len(), 2);

        let (_, sign) = &requests[0];
        assert_eq!(sign["method"], "sign");
        let params = &sign["params"][0];
        assert_eq!(params["offline"], false);
        assert_eq!(params["fee_mult_max"], 100);
        assert_eq!(params["passphrase"], "open sesame");
        assert_eq!(params["key_type"], "secp256k1");
        let tx_json = &params["tx_json"];
        assert_eq!(tx_json["TransactionType"], "Payment");
        assert_eq!(tx_json["Account"], ACCOUNT);
        assert_eq!(tx_json["Amount"], "2500000");
        assert_eq!(tx_json["Destination"], DEST);
        assert!(tx_json.get("DestinationTag").is_none());
        assert!(tx_json.get("SourceTag").is_none());

        let (_, submit) = &requests[1];
        assert_eq!(submit["method"], "submit");
        assert_eq!(submit["params"][0], json!({"tx_blob": "DEADBEEF"}));
    }

    #[tokio::test]
    async fn test_payment_seed_credential_parameter() {
        let (client, state) = null_client();
        state.enqueue_json(200, sign_result("DEADBEEF"));
        state.enqueue_json(200, submit_result("tesSUCCESS"));

        let mut account = client.account(ACCOUNT.parse().unwrap());
        account.unlock_with_seed("DEDDA0C556F8B42BFA5F1D6F58D273C9", KeyType::Ed25519);
        account.payment(DEST, xrp("1")).await.unwrap();

        let params = &state.requests()[0].1["params"][0];
        assert_eq!(params["seed_hex"], "DEDDA0C556F8B42BFA5F1D6F58D273C9");
        assert_eq!(params["key_type"], "ed25519");
        assert!(params.get("passphrase").is_none());
    }

    #[tokio::test]
    async fn test_unlock_overwrites_prior_credential() {
        let (client, state) = null_client();
        state.enqueue_json(200, sign_result("DEADBEEF"));
        state.enqueue_json(200, submit_result("tesSUCCESS"));

        let mut account = client.account(ACCOUNT.parse().unwrap());
        account.unlock_with_passphrase("old phrase", KeyType::Secp256k1);
        account.unlock_with_seed("DEDDA0C556F8B42BFA5F1D6F58D273C9", KeyType::Secp256k1);
        account.payment(DEST, xrp("1")).await.unwrap();

        let params = &state.requests()[0].1["params"][0];
        assert!(params.get("passphrase").is_none());
        assert_eq!(params["seed_hex"], "DEDDA0C556F8B42BFA5F1D6F58D273C9");
    }

    #[tokio::test]
    async fn test_payment_zero_tag_is_sent() {
        let (client, state) = null_client();
        state.enqueue_json(200, sign_result("DEADBEEF"));
        state.enqueue_json(200, submit_result("tesSUCCESS"));

        let mut account = client.account(ACCOUNT.parse().unwrap());
        account.unlock_with_passphrase("open sesame", KeyType::Secp256k1);
        let options = PaymentOptions {
            destination_tag: Some(0),
            source_tag: Some(7),
            ..PaymentOptions::default()
        };
        account.payment_with(DEST, xrp("1"), options).await.unwrap();

        let tx_json = &state.requests()[0].1["params"][0]["tx_json"];
        assert_eq!(tx_json["DestinationTag"], 0);
        assert_eq!(tx_json["SourceTag"], 7);
    }

    #[tokio::test]
    async fn test_payment_issued_amount_on_wire() {
        let (client, state) = null_client();
        state.enqueue_json(200, sign_result("DEADBEEF"));
        state.enqueue_json(200, submit_result("tesSUCCESS"));

        let mut account = client.account(ACCOUNT.parse().unwrap());
        account.unlock_with_passphrase("open sesame", KeyType::Secp256k1);
        let issued = IssuedAmount::new("USD", "25.75", ACCOUNT).unwrap();
        account.payment(DEST, issued).await.unwrap();

        let amount = &state.requests()[0].1["params"][0]["tx_json"]["Amount"];
        assert_eq!(
            amount,
            &json!({"currency": "USD", "value": "25.75", "issuer": ACCOUNT})
        );
    }

    #[tokio::test]
    async fn test_high_fee_remapped_to_fee_too_low() {
        let (client, state) = null_client();
        state.enqueue_json(
            200,
            json!({"result": {"status": "error", "error": "highFee"}}),
        );

        let mut account = client.account(ACCOUNT.parse().unwrap());
        account.unlock_with_passphrase("open sesame", KeyType::Secp256k1);
        let err = account.payment(DEST, xrp("1")).await.unwrap_err();
        assert!(matches!(err, ClientError::FeeTooLow { fee_mult_max: 100 }));
        // Nothing was signed, so nothing must be submitted.
        assert_eq!(state.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_other_sign_errors_propagate() {
        let (client, state) = null_client();
        state.enqueue_json(
            200,
            json!({"result": {"status": "error", "error": "actNotFound"}}),
        );

        let mut account = client.account(ACCOUNT.parse().unwrap());
        account.unlock_with_passphrase("open sesame", KeyType::Secp256k1);
        let err = account.payment(DEST, xrp("1")).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api {
                signal: Some(ApiSignal::AccountNotFound),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_blob_fails_signing() {
        let (client, state) = null_client();
        state.enqueue_json(200, json!({"result": {"status": "success"}}));

        let mut account = client.account(ACCOUNT.parse().unwrap());
        account.unlock_with_passphrase("open sesame", KeyType::Secp256k1);
        let err = account.payment(DEST, xrp("1")).await.unwrap_err();
        assert!(matches!(err, ClientError::SigningFailed));
        // Sign failed, so submit never went out.
        assert_eq!(state.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_blob_fails_signing() {
        let (client, state) = null_client();
        state.enqueue_json(200, sign_result(""));

        let mut account = client.account(ACCOUNT.parse().unwrap());
        account.unlock_with_passphrase("open sesame", KeyType::Secp256k1);
        let err = account.payment(DEST, xrp("1")).await.unwrap_err();
        assert!(matches!(err, ClientError::SigningFailed));
    }

    #[tokio::test]
    async fn test_engine_failure_fails_submission() {
        let (client, state) = null_client();
        state.enqueue_json(200, sign_result("DEADBEEF"));
        state.enqueue_json(200, submit_result("terINSUF_FEE_B"));

        let mut account = client.account(ACCOUNT.parse().unwrap());
        account.unlock_with_passphrase("open sesame", KeyType::Secp256k1);
        let err = account.payment(DEST, xrp("1")).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::SubmissionFailed { engine_result } if engine_result == "terINSUF_FEE_B"
        ));
    }

    #[tokio::test]
    async fn test_missing_tx_json_is_ambiguous() {
        let (client, state) = null_client();
        state.enqueue_json(200, sign_result("DEADBEEF"));
        state.enqueue_json(
            200,
            json!({"result": {"status": "success", "engine_result": "tesSUCCESS"}}),
        );

        let mut account = client.account(ACCOUNT.parse().unwrap());
        account.unlock_with_passphrase("open sesame", KeyType::Secp256k1);
        let err = account.payment(DEST, xrp("1")).await.unwrap_err();
        assert!(matches!(err, ClientError::SubmissionAmbiguous { .. }));
        assert!(err.to_string().contains("may already have been broadcast"));
    }

    #[tokio::test]
    async fn test_malformed_hash_is_ambiguous() {
        let (client, state) = null_client();
        state.enqueue_json(200, sign_result("DEADBEEF"));
        state.enqueue_json(
            200,
            json!({"result": {
                "status": "success",
                "engine_result": "tesSUCCESS",
                "tx_json": {"hash": "E08D6E97"},
            }}),
        );

        let mut account = client.account(ACCOUNT.parse().unwrap());
        account.unlock_with_passphrase("open sesame", KeyType::Secp256k1);
        let err = account.payment(DEST, xrp("1")).await.unwrap_err();
        assert!(matches!(err, ClientError::SubmissionAmbiguous { .. }));
    }
}
