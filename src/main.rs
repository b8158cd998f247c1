use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod utils;

use cmd::format::{Role, StyleOptions, box_header, color, emoji};
use cmd::{DealArgs, DealStatusArgs, Globals, OfflineDealArgs, ProviderArgs, WalletArgs};

/// boostwrap - typed front end for the Boost storage-deal client
///
/// Every subcommand runs the configured `boost` binary once with `--json`
/// and reports the decoded result.
///
/// Global flags / env:
///   -v / -vv          Increase verbosity (logs go to stderr)
///   -q / --quiet      Errors only
///   -b / --bin        Binary spec, e.g. "boost --repo /data/boost" (or BOOST_BIN)
///   -c / --config     YAML config file (binary, args, timeout_secs)
///   --timeout SECS    Kill the program after SECS (or BOOST_TIMEOUT; 0 = never)
///   --json            Machine-readable output on stdout
///
/// Examples:
///   boostwrap wallet list --id
///   boostwrap -b "boost --repo /data/boost" wallet balance f1abc...
///   boostwrap deal --http-url https://files.example/a.car --provider f01234 \
///       --commp baga6ea... --payload-cid bafy... --piece-size 34359738368 --json
///   boostwrap ops
#[derive(Parser, Debug)]
#[command(
    name = "boostwrap",
    version,
    author,
    about = "Typed front end for the Boost storage-deal client",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Binary to run, with persistent arguments (shell-style)
    #[arg(short = 'b', long = "bin", global = true, value_name = "SPEC")]
    bin: Option<String>,

    /// YAML configuration file
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Per-call deadline in seconds (0 disables)
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the client repository
    Init,

    /// Make an online deal (provider fetches the CAR over HTTP)
    Deal(DealArgs),

    /// Make an offline deal
    OfflineDeal(OfflineDealArgs),

    /// Query the status of a deal
    DealStatus(DealStatusArgs),

    /// Manage wallets
    Wallet(WalletArgs),

    /// Query a storage provider
    Provider(ProviderArgs),

    /// List supported operations
    Ops,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    let globals = Globals {
        bin: cli.bin.clone(),
        config: cli.config.clone(),
        timeout: cli.timeout,
        json: cli.json,
    };

    match run(cli.command, &globals) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, globals.json);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, globals: &Globals) -> Result<()> {
    match command {
        Commands::Init => cmd::execute_init(globals),
        Commands::Deal(args) => cmd::execute_deal(args, globals),
        Commands::OfflineDeal(args) => cmd::execute_offline_deal(args, globals),
        Commands::DealStatus(args) => cmd::execute_deal_status(args, globals),
        Commands::Wallet(args) => cmd::execute_wallet(args, globals),
        Commands::Provider(args) => cmd::execute_provider(args, globals),
        Commands::Ops => cmd::execute_ops(globals),
    }
}

/// Print `err`, including any output the program produced before failing.
fn report_error(err: &anyhow::Error, json: bool) {
    let captured = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<boostwrap::Error>())
        .and_then(|e| e.output())
        .map(|bytes| String::from_utf8_lossy(bytes).trim_end().to_string());

    if json {
        println!(
            "{}",
            serde_json::json!({
                "status": "error",
                "error": format!("{err:#}"),
                "output": captured,
            })
        );
        return;
    }

    let style = StyleOptions::detect();
    eprintln!(
        "{}",
        box_header(
            format!("{} {}", emoji("error", &style), color(Role::Error, "Error", &style)),
            None::<&str>,
            &style,
        )
    );
    eprintln!("{err:#}");
    if let Some(out) = captured.filter(|s| !s.is_empty()) {
        eprintln!("{}", color(Role::Dim, "program output:", &style));
        eprintln!("{out}");
    }
}
