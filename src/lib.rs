//! Typed bridge to the Boost storage-deal client CLI.
//!
//! Parameter records are rendered to `--flag=value` tokens ([`args`]), the
//! binary is run once per call through a [`CommandContext`] (which always
//! forces `--json`), and the captured output is decoded leniently into
//! result records ([`decode`]). [`Boost`] wraps that composition with one
//! method per operation in the [`ops`] catalog.
//!
//! ```no_run
//! # async fn demo() -> boostwrap::Result<()> {
//! let boost = boostwrap::Boost::new("boost");
//! let balance = boost.wallet_balance("").await?;
//! if balance.is_ambiguous() {
//!     eprintln!("balance unknown: {}", balance.warning);
//! }
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod client;
pub mod config;
pub mod context;
pub mod decode;
pub mod error;
pub mod invoker;
pub mod mock;
pub mod ops;

pub use args::{ArgList, ArgValue, ToArgs, render};
pub use client::Boost;
pub use config::Config;
pub use context::CommandContext;
pub use decode::decode;
pub use error::{Error, Result};
pub use invoker::{Invocation, ProcessRunner, Runner};
pub use ops::{CATALOG, Descriptor, Operation, OutputKind, Response};
