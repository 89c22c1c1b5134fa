//! The JSON-RPC client: one node, one URL, typed commands.

use crate::account::Account;
use crate::config::ClientConfig;
use crate::entities::{ServerInfo, Transaction, WalletPropose};
use crate::error::{ApiSignal, ClientError};
use crate::result::{QueryResult, RpcResult};
use crate::transport::{HttpTransport, ResponseBody, Transport};

use rippled_types::{AccountId, KeyType, Secret, TxHash};
use serde_json::{json, Value};

/// Per-call behavior switches.
#[derive(Clone, Copy, Debug)]
pub struct CallOptions {
    /// Fail when the response carries no `result` object.
    pub require_result: bool,
    /// Fail on non-JSON bodies and on `status: "error"` envelopes.
    pub raise_on_error: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            require_result: true,
            raise_on_error: true,
        }
    }
}

/// Client bound to a single rippled node.
///
/// Cheap to share across tasks: the transport pools connections and every
/// call is independent. No state is carried between calls.
pub struct RippledClient {
    config: ClientConfig,
    base_url: String,
    transport: Box<dyn Transport>,
}

impl RippledClient {
    /// Validates the endpoint and builds the HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::assembled(config, Box::new(transport)))
    }

    /// Same endpoint checks, caller-supplied transport.
    pub fn with_transport(
        config: ClientConfig,
        transport: Box<dyn Transport>,
    ) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(Self::assembled(config, transport))
    }

    fn assembled(config: ClientConfig, transport: Box<dyn Transport>) -> Self {
        let base_url = config.base_url();
        Self {
            config,
            base_url,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends one command with default options.
    pub async fn call(&self, command: &str, params: Value) -> Result<QueryResult, ClientError> {
        self.call_with(command, params, CallOptions::default())
            .await
    }

    /// Sends one command. `params` becomes the single member of the
    /// envelope's `params` array; `Null` turns into an empty object.
    pub async fn call_with(
        &self,
        command: &str,
        params: Value,
        options: CallOptions,
    ) -> Result<QueryResult, ClientError> {
        let params = if params.is_null() { json!({}) } else { params };
        let envelope = json!({"method": command, "params": [params]});

        tracing::debug!(command, url = %self.base_url, "sending command");
        let response = self.transport.send(&self.base_url, &envelope).await?;

        let result = match &response.body {
            ResponseBody::Json(body) => match RpcResult::new(body) {
                Ok(result) => Some(result),
                Err(err) => {
                    if options.raise_on_error {
                        return Err(err);
                    }
                    None
                }
            },
            ResponseBody::Raw(text) => {
                if options.raise_on_error {
                    return Err(malformed_body(response.status, text));
                }
                None
            }
        };

        if options.raise_on_error {
            if let Some(result) = &result {
                if !result.is_success() {
                    let message = result.error()?.map(str::to_string);
                    let signal = message.as_deref().and_then(ApiSignal::classify);
                    tracing::debug!(
                        command,
                        error = message.as_deref().unwrap_or("(none)"),
                        "command returned error status"
                    );
                    return Err(ClientError::Api {
                        command: command.to_string(),
                        message,
                        signal,
                    });
                }
            }
        }

        if result.is_none() && options.require_result {
            return Err(ClientError::MalformedResponse(format!(
                "no result object in response to \"{command}\""
            )));
        }

        Ok(QueryResult { response, result })
    }

    /// Liveness probe. Swallows protocol-level failures and reports only
    /// whether a success envelope came back; transport failures still error.
    pub async fn ping(&self) -> Result<bool, ClientError> {
        let options = CallOptions {
            require_result: false,
            raise_on_error: false,
        };
        let outcome = self.call_with("ping", Value::Null, options).await?;
        Ok(outcome.result.is_some_and(|result| result.is_success()))
    }

    /// Queries the node's build, state and ledger coverage.
    pub async fn server_info(&self) -> Result<ServerInfo, ClientError> {
        let outcome = self.call("server_info", Value::Null).await?;
        ServerInfo::decode(required_result(&outcome)?.raw())
    }

    /// Asks the node to derive a keypair. The optional secret seeds the
    /// derivation, posted under the parameter its kind dictates.
    pub async fn wallet_propose(
        &self,
        key_type: KeyType,
        secret: Option<&Secret>,
    ) -> Result<WalletPropose, ClientError> {
        let mut params = json!({"key_type": key_type.as_str()});
        if let Some(secret) = secret {
            params[secret.param_name()] = json!(secret.reveal());
        }
        let outcome = self.call("wallet_propose", params).await?;
        WalletPropose::decode(required_result(&outcome)?.raw())
    }

    /// Looks up a transaction by hash and decodes it per its type.
    pub async fn tx(&self, hash: &TxHash) -> Result<Transaction, ClientError> {
        let params = json!({"transaction": hash, "binary": false});
        let outcome = self.call("tx", params).await?;
        Transaction::decode(required_result(&outcome)?.raw())
    }

    /// A stateful workflow handle bound to one account id.
    pub fn account(&self, account_id: AccountId) -> Account<'_> {
        Account::new(self, account_id)
    }
}

/// `call` guarantees a result under the default options; this bridges the
/// `Option` for the typed command wrappers without unwrapping.
pub(crate) fn required_result(outcome: &QueryResult) -> Result<&RpcResult, ClientError> {
    outcome.result.as_ref().ok_or_else(|| {
        ClientError::MalformedResponse("no result object in response".to_string())
    })
}

fn malformed_body(status: u16, text: &str) -> ClientError {
    // Short bodies are quoted; anything longer is summarized.
    if !text.is_empty() && text.len() < 128 {
        ClientError::MalformedResponse(format!("[{status}] node did not send JSON: {text}"))
    } else {
        ClientError::MalformedResponse(format!("[{status}] node did not send a JSON body"))
    }
}
