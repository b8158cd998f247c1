//! Storage-provider queries.
//!
//! Their output schemas vary between program versions, so results are
//! returned as untyped JSON.

use crate::args::{ArgList, ToArgs};
use crate::ops::Operation;

macro_rules! provider_query {
    ($(#[$meta:meta])* $name:ident, $op:literal, $sub:literal, $summary:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            /// Provider address, e.g. `f01234`.
            pub provider: String,
        }

        impl ToArgs for $name {
            fn to_args(&self) -> ArgList {
                ArgList::new().positional(&self.provider)
            }
        }

        impl Operation for $name {
            const NAME: &'static str = $op;
            const PATH: &'static [&'static str] = &["provider", $sub];
            const SUMMARY: &'static str = $summary;
            type Output = serde_json::Value;
        }
    };
}

provider_query!(
    ProviderLibp2pInfo,
    "provider-libp2p-info",
    "libp2p-info",
    "Show the libp2p peer info of a provider"
);
provider_query!(
    ProviderStorageAsk,
    "provider-storage-ask",
    "storage-ask",
    "Query a provider's storage ask"
);
provider_query!(
    ProviderRetrievalAsk,
    "provider-retrieval-ask",
    "retrieval-ask",
    "Query a provider's retrieval ask"
);
provider_query!(
    /// Retrieval transports (protocols and multiaddrs) a provider supports.
    ProviderRetrievalTransports,
    "provider-retrieval-transports",
    "retrieval-transports",
    "Query a provider's retrieval transports"
);
