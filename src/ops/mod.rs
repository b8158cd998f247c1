//! Operation catalog.
//!
//! Each operation is a parameter record type implementing [`Operation`],
//! which binds it to a subcommand path and a result type. The catalog is
//! pure data: [`crate::Boost::call`] does the render -> invoke -> decode
//! composition for all of them.

use serde::Serialize;

use crate::args::ToArgs;
use crate::{Error, Result};

pub mod deal;
pub mod provider;
pub mod wallet;

pub use deal::{CreateDeal, DealStatus, Init, OfflineDeal};
pub use provider::{
    ProviderLibp2pInfo, ProviderRetrievalAsk, ProviderRetrievalTransports, ProviderStorageAsk,
};
pub use wallet::{
    Balance, ExportedKey, Fil, Signature, WalletAddress, WalletBalance, WalletDefault,
    WalletDelete, WalletEntry, WalletExport, WalletFormat, WalletImport, WalletList, WalletNew,
    WalletSetDefault, WalletSign, WalletType,
};

/// How an operation's output is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Output is ignored.
    None,
    /// Output is decoded into a typed record.
    Record,
    /// Output is decoded as untyped JSON.
    Json,
}

/// A result type an operation can produce from captured output.
pub trait Response: Sized + Default {
    const KIND: OutputKind;

    fn from_output(output: &[u8]) -> Result<Self>;
}

impl Response for () {
    const KIND: OutputKind = OutputKind::None;

    fn from_output(_output: &[u8]) -> Result<Self> {
        Ok(())
    }
}

// Untyped output is passed through as printed, keys untouched.
impl Response for serde_json::Value {
    const KIND: OutputKind = OutputKind::Json;

    fn from_output(output: &[u8]) -> Result<Self> {
        serde_json::from_slice(output).map_err(|source| Error::Decode {
            source,
            output: output.to_vec(),
        })
    }
}

/// Implement [`Response`] for lenient JSON records.
macro_rules! record_response {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::ops::Response for $t {
                const KIND: $crate::ops::OutputKind = $crate::ops::OutputKind::Record;

                fn from_output(output: &[u8]) -> $crate::Result<Self> {
                    $crate::decode::decode(output)
                }
            }
        )*
    };
}
pub(crate) use record_response;

/// A named operation on the wrapped program.
pub trait Operation: ToArgs {
    const NAME: &'static str;
    const PATH: &'static [&'static str];
    const SUMMARY: &'static str;

    type Output: Response;

    /// Whether this particular request should not reach the program at all.
    fn is_noop(&self) -> bool {
        false
    }
}

/// Static description of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    pub name: &'static str,
    pub path: &'static [&'static str],
    pub summary: &'static str,
    pub output: OutputKind,
}

impl Descriptor {
    /// Subcommand path joined with spaces.
    pub fn command(&self) -> String {
        self.path.join(" ")
    }
}

pub const fn describe<O: Operation>() -> Descriptor {
    Descriptor {
        name: O::NAME,
        path: O::PATH,
        summary: O::SUMMARY,
        output: <O::Output as Response>::KIND,
    }
}

pub const CATALOG: &[Descriptor] = &[
    describe::<Init>(),
    describe::<CreateDeal>(),
    describe::<DealStatus>(),
    describe::<OfflineDeal>(),
    describe::<WalletNew>(),
    describe::<WalletList>(),
    describe::<WalletBalance>(),
    describe::<WalletExport>(),
    describe::<WalletImport>(),
    describe::<WalletDefault>(),
    describe::<WalletSetDefault>(),
    describe::<WalletDelete>(),
    describe::<WalletSign>(),
    describe::<ProviderLibp2pInfo>(),
    describe::<ProviderStorageAsk>(),
    describe::<ProviderRetrievalAsk>(),
    describe::<ProviderRetrievalTransports>(),
];

/// Look up a catalog entry by operation name.
pub fn find(name: &str) -> Option<&'static Descriptor> {
    CATALOG.iter().find(|d| d.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = CATALOG.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn paths_are_unique_and_non_empty() {
        let paths: HashSet<_> = CATALOG.iter().map(|d| d.command()).collect();
        assert_eq!(paths.len(), CATALOG.len());
        assert!(CATALOG.iter().all(|d| !d.path.is_empty()));
    }

    #[test]
    fn find_is_case_insensitive() {
        let d = find(" Wallet-List ").unwrap();
        assert_eq!(d.command(), "wallet list");
        assert_eq!(d.output, OutputKind::Record);
        assert!(find("wallet-frobnicate").is_none());
    }

    #[test]
    fn output_kinds_follow_result_types() {
        assert_eq!(find("create-deal").unwrap().output, OutputKind::None);
        assert_eq!(find("wallet-set-default").unwrap().output, OutputKind::None);
        assert_eq!(find("wallet-balance").unwrap().output, OutputKind::Record);
        assert_eq!(find("provider-storage-ask").unwrap().output, OutputKind::Json);
    }
}
