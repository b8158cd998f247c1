//! Repository setup and storage-deal operations.
//!
//! These print progress/results that callers do not consume, so their
//! output type is `()`.

use serde::{Deserialize, Serialize};

use crate::args::{ArgList, ToArgs};
use crate::ops::Operation;
use crate::param_record;

/// `boost init`: create the client repository and its wallet keystore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Init;

impl ToArgs for Init {
    fn to_args(&self) -> ArgList {
        ArgList::new()
    }
}

impl Operation for Init {
    const NAME: &'static str = "init";
    const PATH: &'static [&'static str] = &["init"];
    const SUMMARY: &'static str = "Initialize the client repository";
    type Output = ();
}

param_record! {
    /// Online deal: the provider fetches the CAR over HTTP.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct CreateDeal {
        pub http_url: String => "--http-url=",
        pub http_headers: String => "--http-headers=",
        pub provider: String => "--provider=",
        pub commp: String => "--commp=",
        pub piece_size: u64 => "--piece-size=",
        pub car_size: u64 => "--car-size=",
        pub payload_cid: String => "--payload-cid=",
        pub start_epoch: i64 => "--start-epoch=",
        pub duration: i64 => "--duration=",
        pub provider_collateral: i64 => "--provider-collateral=",
        pub storage_price: i64 => "--storage-price=",
        pub verified: bool => "--verified=",
        pub wallet: String => "--wallet=",
    }
}

impl Operation for CreateDeal {
    const NAME: &'static str = "create-deal";
    const PATH: &'static [&'static str] = &["deal"];
    const SUMMARY: &'static str = "Make an online deal with a storage provider";
    type Output = ();
}

param_record! {
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct DealStatus {
        pub provider: String => "--provider=",
        pub deal_uuid: String => "--deal-uuid=",
        pub wallet: String => "--wallet=",
    }
}

impl Operation for DealStatus {
    const NAME: &'static str = "deal-status";
    const PATH: &'static [&'static str] = &["deal-status"];
    const SUMMARY: &'static str = "Query the status of a deal with a storage provider";
    type Output = ();
}

param_record! {
    /// Offline deal: the CAR is delivered to the provider out of band.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct OfflineDeal {
        pub provider: String => "--provider=",
        pub commp: String => "--commp=",
        pub piece_size: u64 => "--piece-size=",
        pub car_size: u64 => "--car-size=",
        pub payload_cid: String => "--payload-cid=",
        pub start_epoch: i64 => "--start-epoch=",
        pub duration: i64 => "--duration=",
        pub provider_collateral: i64 => "--provider-collateral=",
        pub storage_price: i64 => "--storage-price=",
        pub verified: bool => "--verified=",
        pub wallet: String => "--wallet=",
    }
}

impl Operation for OfflineDeal {
    const NAME: &'static str = "offline-deal";
    const PATH: &'static [&'static str] = &["offline-deal"];
    const SUMMARY: &'static str = "Make an offline deal with a storage provider";
    type Output = ();
}

impl From<CreateDeal> for OfflineDeal {
    fn from(d: CreateDeal) -> Self {
        Self {
            provider: d.provider,
            commp: d.commp,
            piece_size: d.piece_size,
            car_size: d.car_size,
            payload_cid: d.payload_cid,
            start_epoch: d.start_epoch,
            duration: d.duration,
            provider_collateral: d.provider_collateral,
            storage_price: d.storage_price,
            verified: d.verified,
            wallet: d.wallet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::render;

    #[test]
    fn partial_deal_renders_only_set_fields() {
        let deal = CreateDeal {
            provider: "f01234".into(),
            piece_size: 0,
            verified: true,
            ..Default::default()
        };
        assert_eq!(render(&deal), vec!["--provider=f01234", "--verified=true"]);
    }

    #[test]
    fn full_deal_renders_in_declaration_order() {
        let deal = CreateDeal {
            http_url: "https://files.example/x.car".into(),
            http_headers: "Authorization=Bearer t".into(),
            provider: "f01234".into(),
            commp: "baga6ea4sea".into(),
            piece_size: 34359738368,
            car_size: 1024,
            payload_cid: "bafyroot".into(),
            start_epoch: 2_000_000,
            duration: 518400,
            provider_collateral: 1,
            storage_price: 20000000000,
            verified: true,
            wallet: "f1wallet".into(),
        };
        assert_eq!(
            render(&deal),
            vec![
                "--http-url=https://files.example/x.car",
                "--http-headers=Authorization=Bearer t",
                "--provider=f01234",
                "--commp=baga6ea4sea",
                "--piece-size=34359738368",
                "--car-size=1024",
                "--payload-cid=bafyroot",
                "--start-epoch=2000000",
                "--duration=518400",
                "--provider-collateral=1",
                "--storage-price=20000000000",
                "--verified=true",
                "--wallet=f1wallet",
            ]
        );
    }

    #[test]
    fn offline_deal_drops_http_fields() {
        let deal = CreateDeal {
            http_url: "https://files.example/x.car".into(),
            provider: "f0".into(),
            duration: 10,
            ..Default::default()
        };
        let offline = OfflineDeal::from(deal);
        assert_eq!(render(&offline), vec!["--provider=f0", "--duration=10"]);
    }

    #[test]
    fn deal_status_and_init() {
        let status = DealStatus {
            provider: "f0".into(),
            deal_uuid: "0e7a".into(),
            wallet: String::new(),
        };
        assert_eq!(render(&status), vec!["--provider=f0", "--deal-uuid=0e7a"]);
        assert!(render(&Init).is_empty());
    }
}
