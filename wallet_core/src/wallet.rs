//! High-level wallet bound to one node and one signer.

use serde::{Deserialize, Serialize};

use mochimo_rpc::messages::{MempoolTransactionResponse, TagResolution};
use mochimo_rpc::{ConstructionClient, HttpTransport, Transport};
use mochimo_transactions::memo::{self, MEMO_LEN};
use mochimo_transactions::{encode_transaction, RawTransaction, TransferIntent};
use mochimo_types::{
    AccountIdentifier, PreprocessMetadata, PublicKey, TransactionIdentifier, WalletKeys,
};

use crate::config::ClientConfig;
use crate::construction::ConstructionFlow;
use crate::error::WalletError;

/// A transfer as the wallet user describes it. The source is the wallet itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub destination_tag: String,
    /// Amount in nanoMCM.
    pub amount: u64,
    /// Fee in nanoMCM.
    pub fee: u64,
    #[serde(default)]
    pub memo: Option<String>,
    /// Public key hash that receives the change.
    pub change_pk: String,
    pub change_addr: String,
    #[serde(default)]
    pub block_to_live: u32,
}

/// What a completed transfer produced.
#[derive(Clone, Debug)]
pub struct TransferReceipt {
    pub transaction_identifier: TransactionIdentifier,
    pub signed_transaction: String,
    /// Local binary record of the transfer.
    pub raw_transaction: RawTransaction,
    /// Protocol form of the memo; all zero when absent or rejected.
    pub memo_field: [u8; MEMO_LEN],
    pub mempool: MempoolTransactionResponse,
}

/// Binds a construction client, a signer and a configuration.
pub struct Wallet<K, T = HttpTransport> {
    client: ConstructionClient<T>,
    keys: K,
    config: ClientConfig,
}

impl<K: WalletKeys> Wallet<K, HttpTransport> {
    /// Build a wallet talking HTTP to the node named in `config`.
    pub fn from_config(config: ClientConfig, keys: K) -> Result<Self, WalletError> {
        let client = config.build_client()?;
        Ok(Self::new(client, keys, config))
    }
}

impl<K: WalletKeys, T: Transport> Wallet<K, T> {
    pub fn new(client: ConstructionClient<T>, keys: K, config: ClientConfig) -> Self {
        Self {
            client,
            keys,
            config,
        }
    }

    pub fn client(&self) -> &ConstructionClient<T> {
        &self.client
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The wallet's own account, by address.
    pub fn account(&self) -> AccountIdentifier {
        AccountIdentifier::new(self.keys.address())
    }

    /// Current MCM balance of the wallet's address, in nanoMCM.
    pub async fn balance(&self) -> Result<u64, WalletError> {
        let response = self.client.account_balance(&self.account()).await?;
        let amount = response
            .mcm()
            .ok_or_else(|| WalletError::InvalidBalance("no MCM balance in response".to_string()))?;
        amount
            .as_u64()
            .map_err(|e| WalletError::InvalidBalance(e.to_string()))
    }

    /// Resolve `tag` to the address currently holding it.
    pub async fn resolve(&self, tag: &str) -> Result<TagResolution, WalletError> {
        Ok(self.client.resolve_tag(tag).await?)
    }

    /// Send `request` from this wallet and wait until the node's mempool has it.
    ///
    /// Fails before any construction call if the balance cannot cover
    /// amount plus fee, or if the memo is malformed and `strict_memo` is set.
    pub async fn transfer(&self, request: &TransferRequest) -> Result<TransferReceipt, WalletError> {
        let memo_field = self.memo_field(request.memo.as_deref())?;

        let available = self.balance().await?;
        let needed = u128::from(request.amount) + u128::from(request.fee);
        if needed > u128::from(available) {
            return Err(WalletError::InsufficientBalance { needed, available });
        }

        let intent = TransferIntent {
            source_tag: self.keys.tag(),
            source_address: self.keys.address(),
            destination_tag: request.destination_tag.clone(),
            amount: request.amount,
            fee: request.fee,
            memo: request.memo.clone(),
        };
        let raw_transaction = encode_transaction(
            &intent.transaction_fields(&request.change_pk, request.block_to_live),
        )?;

        let span = tracing::info_span!(
            "transfer",
            destination = %request.destination_tag,
            amount = request.amount,
            fee = request.fee
        );
        let mut flow = ConstructionFlow::new(
            self.client.clone(),
            &intent,
            PublicKey::wotsp(self.keys.public_key()),
        )
        .with_span(span);

        let metadata = PreprocessMetadata {
            block_to_live: request.block_to_live.to_string(),
            change_pk: request.change_pk.clone(),
            change_addr: request.change_addr.clone(),
            source_balance: available.to_string(),
        };
        let build = flow.build_and_sign(&self.keys, &metadata).await?;
        let transaction_identifier = flow.submit().await?;
        let mempool = flow.monitor(self.config.monitor_policy()).await?;

        Ok(TransferReceipt {
            transaction_identifier,
            signed_transaction: build.signed_transaction,
            raw_transaction,
            memo_field,
            mempool,
        })
    }

    fn memo_field(&self, memo: Option<&str>) -> Result<[u8; MEMO_LEN], WalletError> {
        let Some(memo) = memo else {
            return Ok([0u8; MEMO_LEN]);
        };
        if self.config.strict_memo {
            return Ok(memo::encode_strict(memo)?);
        }
        if !memo::validate(memo) {
            tracing::warn!(memo, "malformed memo, protocol field left empty");
        }
        Ok(memo::encode(memo))
    }
}
