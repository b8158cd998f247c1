/*!
`init`, `deal`, `offline-deal` and `deal-status` subcommands.

None of these produce a result record; success is reported as
`{"status":"ok","operation":"<name>","elapsed_ms":N}` in JSON mode.

Zero-valued numeric flags are not forwarded, so `--start-epoch 0` means
"let the program choose".
*/

use anyhow::Result;
use boostwrap::ops::{CreateDeal, DealStatus, OfflineDeal};
use clap::Args;

use crate::cmd::shared::{Globals, Session, parse_http_url};

/// Terms shared by online and offline deals.
#[derive(Args, Debug, Clone, Default)]
pub struct DealTerms {
    /// Storage provider address (f0...)
    #[arg(long)]
    pub provider: String,

    /// Piece commitment (CommP) of the CAR file
    #[arg(long)]
    pub commp: String,

    /// Padded piece size in bytes
    #[arg(long, default_value_t = 0)]
    pub piece_size: u64,

    /// CAR file size in bytes
    #[arg(long, default_value_t = 0)]
    pub car_size: u64,

    /// Root CID of the payload
    #[arg(long)]
    pub payload_cid: String,

    /// Epoch the deal should start at (0 = provider default)
    #[arg(long, default_value_t = 0)]
    pub start_epoch: i64,

    /// Deal duration in epochs (0 = program default)
    #[arg(long, default_value_t = 0)]
    pub duration: i64,

    /// Provider collateral in attoFIL
    #[arg(long, default_value_t = 0)]
    pub provider_collateral: i64,

    /// Storage price per epoch in attoFIL
    #[arg(long, default_value_t = 0)]
    pub storage_price: i64,

    /// Make a verified (Fil+) deal
    #[arg(long)]
    pub verified: bool,

    /// Client wallet (defaults to the program's default wallet)
    #[arg(long, default_value = "")]
    pub wallet: String,
}

impl DealTerms {
    fn into_offline(self) -> OfflineDeal {
        OfflineDeal {
            provider: self.provider,
            commp: self.commp,
            piece_size: self.piece_size,
            car_size: self.car_size,
            payload_cid: self.payload_cid,
            start_epoch: self.start_epoch,
            duration: self.duration,
            provider_collateral: self.provider_collateral,
            storage_price: self.storage_price,
            verified: self.verified,
            wallet: self.wallet,
        }
    }
}

/// `boostwrap deal --http-url <URL> --provider ... `
#[derive(Args, Debug, Clone)]
pub struct DealArgs {
    /// URL the provider downloads the CAR file from
    #[arg(long, value_parser = parse_http_url)]
    pub http_url: String,

    /// Extra HTTP headers for the download (`Key=Value`, comma separated)
    #[arg(long, default_value = "")]
    pub http_headers: String,

    #[command(flatten)]
    pub terms: DealTerms,
}

impl DealArgs {
    pub fn into_deal(self) -> CreateDeal {
        let OfflineDeal {
            provider,
            commp,
            piece_size,
            car_size,
            payload_cid,
            start_epoch,
            duration,
            provider_collateral,
            storage_price,
            verified,
            wallet,
        } = self.terms.into_offline();
        CreateDeal {
            http_url: self.http_url,
            http_headers: self.http_headers,
            provider,
            commp,
            piece_size,
            car_size,
            payload_cid,
            start_epoch,
            duration,
            provider_collateral,
            storage_price,
            verified,
            wallet,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct OfflineDealArgs {
    #[command(flatten)]
    pub terms: DealTerms,
}

#[derive(Args, Debug, Clone)]
pub struct DealStatusArgs {
    /// Storage provider address
    #[arg(long)]
    pub provider: String,

    /// UUID returned when the deal was proposed
    #[arg(long)]
    pub deal_uuid: String,

    /// Client wallet the deal was made with
    #[arg(long, default_value = "")]
    pub wallet: String,
}

pub fn execute_init(globals: &Globals) -> Result<()> {
    let session = Session::open(globals)?;
    let ((), ms) = session.block_on("init", session.boost().init())?;
    session.done("init", ms, "client repository initialized");
    Ok(())
}

pub fn execute_deal(args: DealArgs, globals: &Globals) -> Result<()> {
    let session = Session::open(globals)?;
    let deal = args.into_deal();
    tracing::info!(provider = %deal.provider, url = %deal.http_url, "proposing online deal");
    let ((), ms) = session.block_on("create-deal", session.boost().create_deal(&deal))?;
    session.done(
        "create-deal",
        ms,
        &format!("deal proposed to {}", deal.provider),
    );
    Ok(())
}

pub fn execute_offline_deal(args: OfflineDealArgs, globals: &Globals) -> Result<()> {
    let session = Session::open(globals)?;
    let deal = args.terms.into_offline();
    tracing::info!(provider = %deal.provider, "proposing offline deal");
    let ((), ms) = session.block_on("offline-deal", session.boost().offline_deal(&deal))?;
    session.done(
        "offline-deal",
        ms,
        &format!("offline deal proposed to {}", deal.provider),
    );
    Ok(())
}

pub fn execute_deal_status(args: DealStatusArgs, globals: &Globals) -> Result<()> {
    let session = Session::open(globals)?;
    let status = DealStatus {
        provider: args.provider,
        deal_uuid: args.deal_uuid,
        wallet: args.wallet,
    };
    let ((), ms) = session.block_on("deal-status", session.boost().deal_status(&status))?;
    session.done(
        "deal-status",
        ms,
        &format!("status requested for deal {}", status.deal_uuid),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boostwrap::render;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        cmd: TestSub,
    }

    #[derive(clap::Subcommand, Debug)]
    enum TestSub {
        Deal(DealArgs),
        OfflineDeal(OfflineDealArgs),
    }

    #[test]
    fn deal_flags_map_onto_record() {
        let cli = TestCli::try_parse_from([
            "t",
            "deal",
            "--http-url",
            "https://files.example/a.car",
            "--provider",
            "f01234",
            "--commp",
            "baga6ea",
            "--payload-cid",
            "bafy",
            "--piece-size",
            "2048",
            "--verified",
        ])
        .unwrap();
        let TestSub::Deal(args) = cli.cmd else {
            panic!("expected deal");
        };
        let deal = args.into_deal();
        assert_eq!(
            render(&deal),
            vec![
                "--http-url=https://files.example/a.car",
                "--provider=f01234",
                "--commp=baga6ea",
                "--piece-size=2048",
                "--payload-cid=bafy",
                "--verified=true",
            ]
        );
    }

    #[test]
    fn deal_rejects_non_http_url() {
        let res = TestCli::try_parse_from([
            "t",
            "deal",
            "--http-url",
            "file:///tmp/a.car",
            "--provider",
            "f0",
            "--commp",
            "c",
            "--payload-cid",
            "p",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn offline_deal_has_no_http_flags() {
        let cli = TestCli::try_parse_from([
            "t",
            "offline-deal",
            "--provider",
            "f0",
            "--commp",
            "c",
            "--payload-cid",
            "p",
            "--duration",
            "518400",
        ])
        .unwrap();
        let TestSub::OfflineDeal(args) = cli.cmd else {
            panic!("expected offline-deal");
        };
        let deal = args.terms.into_offline();
        assert_eq!(deal.duration, 518400);
        assert!(!render(&deal).iter().any(|t| t.starts_with("--http")));
    }
}
