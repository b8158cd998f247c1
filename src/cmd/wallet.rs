/*!
`wallet` subcommand group.

  boostwrap wallet new [secp256k1|bls]
  boostwrap wallet list [--id]
  boostwrap wallet balance [ADDRESS]
  boostwrap wallet export ADDRESS
  boostwrap wallet import PATH [--format hex-lotus|json-lotus|gfc-json] [--as-default]
  boostwrap wallet default
  boostwrap wallet set-default ADDRESS
  boostwrap wallet delete ADDRESS
  boostwrap wallet sign ADDRESS HEX_MESSAGE

JSON mode wraps each decoded record as
`{"status":"ok","operation":"wallet-...","elapsed_ms":N,"result":...}`.
*/

use anyhow::Result;
use boostwrap::ops::{Balance, WalletAddress, WalletEntry, WalletFormat, WalletType};
use clap::{Args, Subcommand};

use crate::cmd::format::{Role, box_header, color, emoji, table};
use crate::cmd::shared::{Globals, Session};

#[derive(Args, Debug)]
pub struct WalletArgs {
    #[command(subcommand)]
    pub command: WalletCommand,
}

#[derive(Subcommand, Debug)]
pub enum WalletCommand {
    /// Generate a new key of the given type
    New {
        #[arg(value_enum, default_value_t = WalletType::Secp256k1)]
        wallet_type: WalletType,
    },
    /// List wallet addresses with balances
    List {
        /// Resolve actor ids (slower)
        #[arg(long = "id")]
        lookup_ids: bool,
    },
    /// Balance of ADDRESS, or of the default wallet
    Balance { address: Option<String> },
    /// Export a private key (hex)
    Export { address: String },
    /// Import a key file
    Import {
        path: String,
        #[arg(long, value_enum, default_value_t = WalletFormat::HexLotus)]
        format: WalletFormat,
        /// Make the imported key the default wallet
        #[arg(long)]
        as_default: bool,
    },
    /// Show the default wallet address
    Default,
    /// Set the default wallet (an empty ADDRESS does nothing)
    SetDefault { address: String },
    /// Delete a key from the keystore
    Delete { address: String },
    /// Sign a hex-encoded message
    Sign {
        address: String,
        #[arg(value_name = "HEX_MESSAGE")]
        hex_message: String,
    },
}

pub fn execute_wallet(args: WalletArgs, globals: &Globals) -> Result<()> {
    let session = Session::open(globals)?;
    let boost = session.boost();

    match args.command {
        WalletCommand::New { wallet_type } => {
            let (address, ms) = session.block_on("wallet-new", boost.wallet_new(wallet_type))?;
            show_address(&session, "wallet-new", ms, address);
        }
        WalletCommand::List { lookup_ids } => {
            let (entries, ms) = session.block_on("wallet-list", boost.wallet_list(lookup_ids))?;
            show_list(&session, ms, &entries);
        }
        WalletCommand::Balance { address } => {
            let address = address.unwrap_or_default();
            let (balance, ms) =
                session.block_on("wallet-balance", boost.wallet_balance(&address))?;
            show_balance(&session, ms, &balance);
        }
        WalletCommand::Export { address } => {
            let (key, ms) = session.block_on("wallet-export", boost.wallet_export(&address))?;
            if session.json {
                session.json_result("wallet-export", ms, &serde_json::json!({ "key": key }));
            } else {
                println!("{key}");
            }
        }
        WalletCommand::Import {
            path,
            format,
            as_default,
        } => {
            let (address, ms) = session.block_on(
                "wallet-import",
                boost.wallet_import(&path, format, as_default),
            )?;
            show_address(&session, "wallet-import", ms, address);
        }
        WalletCommand::Default => {
            let (address, ms) = session.block_on("wallet-default", boost.wallet_default())?;
            show_address(&session, "wallet-default", ms, address);
        }
        WalletCommand::SetDefault { address } => {
            let ((), ms) =
                session.block_on("wallet-set-default", boost.wallet_set_default(&address))?;
            let message = if address.is_empty() {
                "no address given, default wallet unchanged".to_string()
            } else {
                format!("default wallet set to {address}")
            };
            session.done("wallet-set-default", ms, &message);
        }
        WalletCommand::Delete { address } => {
            let ((), ms) = session.block_on("wallet-delete", boost.wallet_delete(&address))?;
            session.done("wallet-delete", ms, &format!("deleted {address}"));
        }
        WalletCommand::Sign {
            address,
            hex_message,
        } => {
            let (signature, ms) =
                session.block_on("wallet-sign", boost.wallet_sign(&address, &hex_message))?;
            if session.json {
                session.json_result(
                    "wallet-sign",
                    ms,
                    &serde_json::json!({ "signature": signature }),
                );
            } else {
                println!("{signature}");
            }
        }
    }
    Ok(())
}

fn show_address(session: &Session, operation: &str, ms: u128, address: String) {
    if session.json {
        session.json_result(operation, ms, &WalletAddress { address });
    } else {
        println!("{address}");
    }
}

fn show_balance(session: &Session, ms: u128, balance: &Balance) {
    if session.json {
        session.json_result("wallet-balance", ms, balance);
        return;
    }
    let style = &session.style;
    println!("{}", balance.balance);
    if balance.is_ambiguous() {
        let note = if balance.warning.is_empty() {
            "balance may read 0 while the chain is syncing"
        } else {
            balance.warning.as_str()
        };
        eprintln!("{} {}", emoji("warn", style), color(Role::Warning, note, style));
    }
}

fn show_list(session: &Session, ms: u128, entries: &[WalletEntry]) {
    if session.json {
        session.json_result("wallet-list", ms, &entries);
        return;
    }
    let style = &session.style;
    println!(
        "{}",
        box_header(
            format!("{} Wallets ({})", emoji("wallet", style), entries.len()),
            Some(format!("{ms} ms")),
            style,
        )
    );
    if entries.is_empty() {
        println!("{}", color(Role::Dim, "(none)", style));
        return;
    }
    let rows: Vec<Vec<String>> = entries.iter().map(wallet_row).collect();
    println!(
        "{}",
        table(&["ADDRESS", "ID", "BALANCE", "NONCE", "DEFAULT"], &rows, style)
    );
}

fn wallet_row(e: &WalletEntry) -> Vec<String> {
    vec![
        e.address.clone(),
        if e.id.is_empty() { "-".into() } else { e.id.clone() },
        e.balance.to_string(),
        e.nonce.to_string(),
        if e.is_default { "X".into() } else { String::new() },
    ]
}
