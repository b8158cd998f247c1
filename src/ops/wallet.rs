//! Wallet keystore operations.
//!
//! Result records use lower-case field names (see [`crate::decode`]) and
//! default every missing key. A zero [`Fil`] balance is ambiguous: the
//! program reports 0 while its chain view is still syncing, and says so in
//! [`Balance::warning`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::args::{ArgList, ArgValue, ToArgs};
use crate::ops::{Operation, record_response};

/// Amount in attoFIL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Fil(pub i64);

impl Fil {
    pub fn atto(self) -> i64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Fil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} attoFIL", self.0)
    }
}

// Accepts a JSON integer or a string holding a base-10 integer.
impl<'de> Deserialize<'de> for Fil {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Ok(Fil(n)),
            Raw::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(Fil)
                .map_err(|e| serde::de::Error::custom(format!("invalid FIL amount '{s}': {e}"))),
        }
    }
}

/// Key type for a new wallet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    #[default]
    #[value(name = "secp256k1")]
    Secp256k1,
    Bls,
}

impl WalletType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletType::Secp256k1 => "secp256k1",
            WalletType::Bls => "bls",
        }
    }
}

impl fmt::Display for WalletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WalletType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "secp256k1" => Ok(WalletType::Secp256k1),
            "bls" => Ok(WalletType::Bls),
            other => Err(format!("unknown wallet type '{other}' (expected secp256k1|bls)")),
        }
    }
}

impl ArgValue for WalletType {
    fn is_unset(&self) -> bool {
        false
    }

    fn to_arg(&self) -> String {
        self.as_str().to_string()
    }
}

/// Encoding of a key file passed to `wallet import`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WalletFormat {
    #[default]
    HexLotus,
    JsonLotus,
    GfcJson,
}

impl WalletFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletFormat::HexLotus => "hex-lotus",
            WalletFormat::JsonLotus => "json-lotus",
            WalletFormat::GfcJson => "gfc-json",
        }
    }
}

impl fmt::Display for WalletFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WalletFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex-lotus" => Ok(WalletFormat::HexLotus),
            "json-lotus" => Ok(WalletFormat::JsonLotus),
            "gfc-json" => Ok(WalletFormat::GfcJson),
            other => Err(format!(
                "unknown wallet format '{other}' (expected hex-lotus|json-lotus|gfc-json)"
            )),
        }
    }
}

impl ArgValue for WalletFormat {
    fn is_unset(&self) -> bool {
        false
    }

    fn to_arg(&self) -> String {
        self.as_str().to_string()
    }
}

/* ---- Result records ---- */

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletAddress {
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletEntry {
    pub address: String,
    pub balance: Fil,
    #[serde(rename = "default")]
    pub is_default: bool,
    pub id: String,
    pub nonce: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Balance {
    pub balance: Fil,
    pub warning: String,
}

impl Balance {
    /// A zero balance may only mean the chain view is not synced yet.
    pub fn is_ambiguous(&self) -> bool {
        self.balance.is_zero()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportedKey {
    #[serde(rename = "key", alias = "privatekey")]
    pub private_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signature {
    pub signature: String,
}

record_response!(WalletAddress, Vec<WalletEntry>, Balance, ExportedKey, Signature);

/* ---- Operations ---- */

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletNew {
    pub wallet_type: WalletType,
}

impl ToArgs for WalletNew {
    fn to_args(&self) -> ArgList {
        ArgList::new().positional(&self.wallet_type)
    }
}

impl Operation for WalletNew {
    const NAME: &'static str = "wallet-new";
    const PATH: &'static [&'static str] = &["wallet", "new"];
    const SUMMARY: &'static str = "Generate a new key of the given type";
    type Output = WalletAddress;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletList {
    /// Also resolve the ID address of every wallet.
    pub lookup_ids: bool,
}

impl ToArgs for WalletList {
    fn to_args(&self) -> ArgList {
        ArgList::new().always("--id=", &self.lookup_ids)
    }
}

impl Operation for WalletList {
    const NAME: &'static str = "wallet-list";
    const PATH: &'static [&'static str] = &["wallet", "list"];
    const SUMMARY: &'static str = "List wallet addresses with balances";
    type Output = Vec<WalletEntry>;
}

/// An empty address asks for the default wallet's balance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletBalance {
    pub address: String,
}

impl ToArgs for WalletBalance {
    fn to_args(&self) -> ArgList {
        ArgList::new().positional(&self.address)
    }
}

impl Operation for WalletBalance {
    const NAME: &'static str = "wallet-balance";
    const PATH: &'static [&'static str] = &["wallet", "balance"];
    const SUMMARY: &'static str = "Show the balance of an address (default wallet if omitted)";
    type Output = Balance;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletExport {
    pub address: String,
}

impl ToArgs for WalletExport {
    fn to_args(&self) -> ArgList {
        ArgList::new().positional(&self.address)
    }
}

impl Operation for WalletExport {
    const NAME: &'static str = "wallet-export";
    const PATH: &'static [&'static str] = &["wallet", "export"];
    const SUMMARY: &'static str = "Export the private key of an address";
    type Output = ExportedKey;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletImport {
    pub path: String,
    pub format: WalletFormat,
    pub as_default: bool,
}

impl ToArgs for WalletImport {
    fn to_args(&self) -> ArgList {
        ArgList::new()
            .always("--format=", &self.format)
            .always("--as-default=", &self.as_default)
            .positional(&self.path)
    }
}

impl Operation for WalletImport {
    const NAME: &'static str = "wallet-import";
    const PATH: &'static [&'static str] = &["wallet", "import"];
    const SUMMARY: &'static str = "Import a private key from a file";
    type Output = WalletAddress;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletDefault;

impl ToArgs for WalletDefault {
    fn to_args(&self) -> ArgList {
        ArgList::new()
    }
}

impl Operation for WalletDefault {
    const NAME: &'static str = "wallet-default";
    const PATH: &'static [&'static str] = &["wallet", "default"];
    const SUMMARY: &'static str = "Show the default wallet address";
    type Output = WalletAddress;
}

/// Does nothing (no process is started) when `address` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSetDefault {
    pub address: String,
}

impl ToArgs for WalletSetDefault {
    fn to_args(&self) -> ArgList {
        ArgList::new().positional(&self.address)
    }
}

impl Operation for WalletSetDefault {
    const NAME: &'static str = "wallet-set-default";
    const PATH: &'static [&'static str] = &["wallet", "set-default"];
    const SUMMARY: &'static str = "Set the default wallet address";
    type Output = ();

    fn is_noop(&self) -> bool {
        self.address.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletDelete {
    pub address: String,
}

impl ToArgs for WalletDelete {
    fn to_args(&self) -> ArgList {
        ArgList::new().positional(&self.address)
    }
}

impl Operation for WalletDelete {
    const NAME: &'static str = "wallet-delete";
    const PATH: &'static [&'static str] = &["wallet", "delete"];
    const SUMMARY: &'static str = "Delete an address from the keystore";
    type Output = ();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSign {
    pub address: String,
    pub hex_message: String,
}

impl ToArgs for WalletSign {
    fn to_args(&self) -> ArgList {
        ArgList::new()
            .positional(&self.address)
            .positional(&self.hex_message)
    }
}

impl Operation for WalletSign {
    const NAME: &'static str = "wallet-sign";
    const PATH: &'static [&'static str] = &["wallet", "sign"];
    const SUMMARY: &'static str = "Sign a hex-encoded message with an address";
    type Output = Signature;
}
