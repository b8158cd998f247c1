/*!
`provider` subcommand group: read-only queries against a storage provider.

The program's JSON is passed through untouched (pretty-printed in human
mode).
*/

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cmd::shared::{Globals, Session};

#[derive(Args, Debug)]
pub struct ProviderArgs {
    #[command(subcommand)]
    pub command: ProviderCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProviderCommand {
    /// Peer id, addresses and protocols of a provider
    Libp2pInfo { provider: String },
    /// Current storage ask
    StorageAsk { provider: String },
    /// Current retrieval ask
    RetrievalAsk { provider: String },
    /// Supported retrieval transports
    RetrievalTransports { provider: String },
}

impl ProviderCommand {
    fn operation(&self) -> &'static str {
        match self {
            ProviderCommand::Libp2pInfo { .. } => "provider-libp2p-info",
            ProviderCommand::StorageAsk { .. } => "provider-storage-ask",
            ProviderCommand::RetrievalAsk { .. } => "provider-retrieval-ask",
            ProviderCommand::RetrievalTransports { .. } => "provider-retrieval-transports",
        }
    }
}

pub fn execute_provider(args: ProviderArgs, globals: &Globals) -> Result<()> {
    let session = Session::open(globals)?;
    let boost = session.boost();
    let operation = args.command.operation();

    let (value, ms) = match &args.command {
        ProviderCommand::Libp2pInfo { provider } => {
            session.block_on(operation, boost.provider_libp2p_info(provider))?
        }
        ProviderCommand::StorageAsk { provider } => {
            session.block_on(operation, boost.provider_storage_ask(provider))?
        }
        ProviderCommand::RetrievalAsk { provider } => {
            session.block_on(operation, boost.provider_retrieval_ask(provider))?
        }
        ProviderCommand::RetrievalTransports { provider } => {
            session.block_on(operation, boost.provider_retrieval_transports(provider))?
        }
    };

    if session.json {
        session.json_result(operation, ms, &value);
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boostwrap::ops;

    #[test]
    fn operation_names_are_in_catalog() {
        for cmd in [
            ProviderCommand::Libp2pInfo { provider: "f0".into() },
            ProviderCommand::StorageAsk { provider: "f0".into() },
            ProviderCommand::RetrievalAsk { provider: "f0".into() },
            ProviderCommand::RetrievalTransports { provider: "f0".into() },
        ] {
            assert!(ops::find(cmd.operation()).is_some(), "{}", cmd.operation());
        }
    }
}
