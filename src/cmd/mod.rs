/*!
Subcommand implementations for the `boostwrap` binary.

  src/cmd/
    mod.rs       (this file)
    shared.rs    Globals, config resolution, blocking Session, output helpers
    format.rs    color / box header / table primitives (human output only)
    deal.rs      init, deal, offline-deal, deal-status
    wallet.rs    wallet <new|list|balance|export|import|default|set-default|delete|sign>
    provider.rs  provider <libp2p-info|storage-ask|retrieval-ask|retrieval-transports>
    ops.rs       catalog listing

Conventions:
  - Each module exposes `execute_*` functions returning `anyhow::Result<()>`.
  - Argument structs derive `clap::Args` / `clap::Subcommand`.
  - Client calls go through `shared::Session`, which owns the Tokio runtime.
*/

pub mod deal;
pub mod format;
pub mod ops;
pub mod provider;
pub mod shared;
pub mod wallet;

pub use deal::{
    DealArgs, DealStatusArgs, OfflineDealArgs, execute_deal, execute_deal_status, execute_init,
    execute_offline_deal,
};
pub use ops::execute_ops;
pub use provider::{ProviderArgs, execute_provider};
pub use shared::Globals;
pub use wallet::{WalletArgs, execute_wallet};
