//! Typed facade: one method per catalog operation.

use std::path::PathBuf;

use tracing::debug;

use crate::Result;
use crate::args::render;
use crate::context::CommandContext;
use crate::invoker::{ProcessRunner, Runner};
use crate::ops::{
    Balance, CreateDeal, DealStatus, Init, OfflineDeal, Operation, ProviderLibp2pInfo,
    ProviderRetrievalAsk, ProviderRetrievalTransports, ProviderStorageAsk, Response,
    WalletBalance, WalletDefault, WalletDelete, WalletEntry, WalletExport, WalletFormat,
    WalletImport, WalletList, WalletNew, WalletSetDefault, WalletSign, WalletType,
};

#[derive(Debug, Clone)]
pub struct Boost<R = ProcessRunner> {
    ctx: CommandContext<R>,
}

impl Boost<ProcessRunner> {
    /// Client for `binary` with no extra persistent arguments.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self::from_context(CommandContext::new(binary, Vec::<String>::new()))
    }
}

impl<R: Runner> Boost<R> {
    pub fn from_context(ctx: CommandContext<R>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &CommandContext<R> {
        &self.ctx
    }

    /// Render `op`, run it, and decode its output.
    pub async fn call<O: Operation>(&self, op: &O) -> Result<O::Output> {
        if op.is_noop() {
            debug!(operation = O::NAME, "nothing to do, not invoking");
            return Ok(O::Output::default());
        }

        let args = render(op);
        let invocation = self.ctx.invoke(O::PATH, &args).await?;
        O::Output::from_output(&invocation.output)
    }

    pub async fn init(&self) -> Result<()> {
        self.call(&Init).await
    }

    pub async fn create_deal(&self, deal: &CreateDeal) -> Result<()> {
        self.call(deal).await
    }

    pub async fn deal_status(&self, status: &DealStatus) -> Result<()> {
        self.call(status).await
    }

    pub async fn offline_deal(&self, deal: &OfflineDeal) -> Result<()> {
        self.call(deal).await
    }

    /// Returns the new address.
    pub async fn wallet_new(&self, wallet_type: WalletType) -> Result<String> {
        Ok(self.call(&WalletNew { wallet_type }).await?.address)
    }

    pub async fn wallet_list(&self, lookup_ids: bool) -> Result<Vec<WalletEntry>> {
        self.call(&WalletList { lookup_ids }).await
    }

    /// Balance of `address`, or of the default wallet when `address` is empty.
    ///
    /// Check [`Balance::warning`] before trusting a zero.
    pub async fn wallet_balance(&self, address: &str) -> Result<Balance> {
        self.call(&WalletBalance {
            address: address.to_string(),
        })
        .await
    }

    /// Returns the hex-encoded private key.
    pub async fn wallet_export(&self, address: &str) -> Result<String> {
        let key = self
            .call(&WalletExport {
                address: address.to_string(),
            })
            .await?;
        Ok(key.private_key)
    }

    /// Returns the imported address.
    pub async fn wallet_import(
        &self,
        path: &str,
        format: WalletFormat,
        as_default: bool,
    ) -> Result<String> {
        let imported = self
            .call(&WalletImport {
                path: path.to_string(),
                format,
                as_default,
            })
            .await?;
        Ok(imported.address)
    }

    pub async fn wallet_default(&self) -> Result<String> {
        Ok(self.call(&WalletDefault).await?.address)
    }

    /// No-op when `address` is empty.
    pub async fn wallet_set_default(&self, address: &str) -> Result<()> {
        self.call(&WalletSetDefault {
            address: address.to_string(),
        })
        .await
    }

    pub async fn wallet_delete(&self, address: &str) -> Result<()> {
        self.call(&WalletDelete {
            address: address.to_string(),
        })
        .await
    }

    /// Returns the signature as printed by the program.
    pub async fn wallet_sign(&self, address: &str, hex_message: &str) -> Result<String> {
        let signed = self
            .call(&WalletSign {
                address: address.to_string(),
                hex_message: hex_message.to_string(),
            })
            .await?;
        Ok(signed.signature)
    }

    pub async fn provider_libp2p_info(&self, provider: &str) -> Result<serde_json::Value> {
        self.call(&ProviderLibp2pInfo {
            provider: provider.to_string(),
        })
        .await
    }

    pub async fn provider_storage_ask(&self, provider: &str) -> Result<serde_json::Value> {
        self.call(&ProviderStorageAsk {
            provider: provider.to_string(),
        })
        .await
    }

    pub async fn provider_retrieval_ask(&self, provider: &str) -> Result<serde_json::Value> {
        self.call(&ProviderRetrievalAsk {
            provider: provider.to_string(),
        })
        .await
    }

    pub async fn provider_retrieval_transports(
        &self,
        provider: &str,
    ) -> Result<serde_json::Value> {
        self.call(&ProviderRetrievalTransports {
            provider: provider.to_string(),
        })
        .await
    }
}
