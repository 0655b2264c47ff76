//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Token bucket parameters for one class of routes.
#[derive(Debug, Clone, Copy)]
struct Quota {
    per_second: u64,
    burst_size: u32,
}

/// Pages and the health probe: 2 requests per second, burst of 100.
const PUBLIC: Quota = Quota {
    per_second: 2,
    burst_size: 100,
};

/// Login submission and the session API: 1 request per second, burst of 10.
const SECURE: Quota = Quota {
    per_second: 1,
    burst_size: 10,
};

/// How clients are told apart for rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKey {
    /// Socket peer address. Requires `into_make_service_with_connect_info`.
    PeerIp,
    /// `X-Forwarded-For` / `X-Real-IP` / `Forwarded`, falling back to the peer
    /// address. Only safe behind a trusted reverse proxy.
    ForwardedIp,
}

impl ClientKey {
    pub fn from_behind_proxy(behind_proxy: bool) -> Self {
        if behind_proxy {
            ClientKey::ForwardedIp
        } else {
            ClientKey::PeerIp
        }
    }
}

fn governor<K: KeyExtractor>(
    key_extractor: K,
    quota: Quota,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(quota.per_second)
            .burst_size(quota.burst_size)
            .finish()
            .expect("rate limit quotas are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

fn limit(router: Router<AppState>, key: ClientKey, quota: Quota) -> Router<AppState> {
    match key {
        ClientKey::PeerIp => router.layer(governor(PeerIpKeyExtractor, quota)),
        ClientKey::ForwardedIp => router.layer(governor(SmartIpKeyExtractor, quota)),
    }
}

/// Applies the public limit to `router`.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let pages = rate_limit::public(web::routes::public_routes(), ClientKey::PeerIp);
/// ```
pub fn public(router: Router<AppState>, key: ClientKey) -> Router<AppState> {
    limit(router, key, PUBLIC)
}

/// Applies the stricter limit used for credential handling.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
pub fn secure(router: Router<AppState>, key: ClientKey) -> Router<AppState> {
    limit(router, key, SECURE)
}
