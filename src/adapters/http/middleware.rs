use std::{
    convert::Infallible,
    net::{IpAddr, SocketAddr},
};

use axum::{
    extract::{ConnectInfo, FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::{
    adapters::http::app_state::AppState, app_error::AppError,
    application::access_gate::API_KEY_HEADER,
};

/// Rejects the request unless it carries the configured API key.
pub async fn api_key_auth(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if let Err(err) = app_state.access_gate.verify_api_key(presented) {
        tracing::debug!(
            path = %request.uri().path(),
            header_present = presented.is_some(),
            "API key rejected"
        );
        return Err(err);
    }

    Ok(next.run(request).await)
}

/// Best-effort client address, recorded with each registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub Option<String>);

impl FromRequestParts<AppState> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Only trust forwarded headers if explicitly configured (when behind a reverse proxy)
        if state.config.trust_proxy
            && let Some(ip) = forwarded_ip(&parts.headers)
        {
            return Ok(ClientIp(Some(ip)));
        }

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());
        Ok(ClientIp(peer))
    }
}

/// First client address from X-Forwarded-For, then X-Real-IP. Values that
/// are not IP addresses are ignored.
fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let first_hop = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|val| val.split(',').next())
        .and_then(parse_ip);
    if first_hop.is_some() {
        return first_hop;
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(parse_ip)
}

/// Accepts a bare address or `ip:port` and returns the canonical address.
fn parse_ip(raw: &str) -> Option<String> {
    let raw = raw.trim();
    raw.parse::<IpAddr>()
        .or_else(|_| raw.parse::<SocketAddr>().map(|addr| addr.ip()))
        .ok()
        .map(|ip| ip.to_string())
}
