//! Per-client rate limiting backed by `tower_governor`.
//!
//! Clients are keyed by the peer address from `ConnectInfo`. Behind a
//! trusted reverse proxy (`TRUST_PROXY_HEADERS=true`) the key is taken from
//! `X-Forwarded-For` (first hop), then `X-Real-IP`, before falling back to
//! the peer. Clients can forge those headers, so they are ignored otherwise.
//! Requests with no discoverable address share one bucket. Rejections are
//! rendered with the standard JSON error envelope.

use axum::{
    Router,
    extract::{ConnectInfo, Request},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tower_governor::{
    GovernorError, GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor,
};
use tracing::{debug, info};

use super::RateLimitConfig;
use crate::errors::AppError;

const UNKNOWN_CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("rate limit needs a non-zero rate and burst (got {per_second}/s, burst {burst})")]
    InvalidQuota { per_second: u64, burst: u32 },
}

/// Resolves the client IP used as the rate-limit key.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClientIpKeyExtractor {
    /// Honour `X-Forwarded-For` / `X-Real-IP`
    pub trust_proxy_headers: bool,
}

impl ClientIpKeyExtractor {
    pub fn client_ip<T>(&self, req: &axum::http::Request<T>) -> IpAddr {
        let forwarded = if self.trust_proxy_headers {
            forwarded_ip(req.headers())
        } else {
            None
        };

        forwarded
            .or_else(|| {
                req.extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip())
            })
            .unwrap_or(UNKNOWN_CLIENT)
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &axum::http::Request<T>) -> Result<Self::Key, GovernorError> {
        Ok(self.client_ip(req))
    }
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let forwarded_for = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse().ok());

    forwarded_for.or_else(|| {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    })
}

/// Wrap `router` with the governor layer and the JSON 429 mapper.
pub fn apply_rate_limit(router: Router, config: &RateLimitConfig) -> Result<Router, RateLimitError> {
    let invalid = RateLimitError::InvalidQuota {
        per_second: config.per_second,
        burst: config.burst,
    };
    if config.per_second == 0 {
        return Err(invalid);
    }

    let period_ms = (1000 / config.per_second).max(1);
    let governor_config = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKeyExtractor {
            trust_proxy_headers: config.trust_proxy_headers,
        })
        .per_millisecond(period_ms)
        .burst_size(config.burst)
        .finish()
        .ok_or(invalid)?;

    // Idle client buckets are pruned periodically so memory stays bounded
    let limiter = governor_config.limiter().clone();
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_secs(60));
                loop {
                    interval.tick().await;
                    limiter.retain_recent();
                    debug!(tracked_clients = limiter.len(), "Rate limiter buckets pruned");
                }
            });
        }
        Err(_) => debug!("No Tokio runtime, rate limiter cleanup task not started"),
    }

    info!(
        per_second = config.per_second,
        burst = config.burst,
        trust_proxy_headers = config.trust_proxy_headers,
        "Rate limiting enabled"
    );

    Ok(router
        .layer(GovernorLayer::new(governor_config))
        .layer(middleware::from_fn(json_rate_limit_response)))
}

/// Re-render governor's plain-text 429 as the JSON error envelope,
/// keeping its `Retry-After`/`X-RateLimit-*` headers.
async fn json_rate_limit_response(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() != StatusCode::TOO_MANY_REQUESTS || is_json(response.headers()) {
        return response;
    }

    let (parts, _) = response.into_parts();
    let retry_after = parts
        .headers
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let mut json = AppError::TooManyRequests(format!("retry after {retry_after}s")).into_response();
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            json.headers_mut().insert(name.clone(), value.clone());
        }
    }
    json
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
