//! Reverse DNS lookup for client hostnames.

use hickory_resolver::TokioResolver;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::name_server::TokioConnectionProvider;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

/// Upper bound on a single PTR lookup.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves peer addresses to hostnames. Disabled resolvers never look up.
#[derive(Clone)]
pub struct HostnameResolver {
    resolver: Option<TokioResolver>,
}

impl HostnameResolver {
    /// Create a resolver; `enabled = false` skips DNS entirely.
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self { resolver: None };
        }

        // Try system config, fall back to defaults
        let resolver = TokioResolver::builder_tokio()
            .map(|b| b.build())
            .unwrap_or_else(|_| {
                TokioResolver::builder_with_config(
                    ResolverConfig::default(),
                    TokioConnectionProvider::default(),
                )
                .build()
            });

        Self {
            resolver: Some(resolver),
        }
    }

    /// PTR name for `ip`, without the trailing dot.
    pub async fn lookup(&self, ip: IpAddr) -> Option<String> {
        let resolver = self.resolver.as_ref()?;

        match tokio::time::timeout(LOOKUP_TIMEOUT, resolver.reverse_lookup(ip)).await {
            Ok(Ok(names)) => names
                .iter()
                .next()
                .map(|name| name.to_string().trim_end_matches('.').to_string())
                .filter(|name| !name.is_empty()),
            Ok(Err(e)) => {
                debug!(%ip, error = %e, "Reverse lookup failed");
                None
            }
            Err(_) => {
                debug!(%ip, "Reverse lookup timed out");
                None
            }
        }
    }
}
