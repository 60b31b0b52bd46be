//! Request handlers for all API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::{error, info};

use super::models::*;
use super::AppState;
use crate::error::GatewayError;
use crate::gateway::resolve_limit;
use crate::models::{TokenDetail, TrendingPoolView};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

// ============================================================================
// Health Check
// ============================================================================

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

// ============================================================================
// Token
// ============================================================================

pub async fn get_token_detail(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult<TokenDetail> {
    match state.aggregator.get_token_detail(&address).await {
        Ok(detail) => Ok(Json(detail)),
        Err(e) => {
            error!("Failed to fetch token details for {}: {}", address.trim(), e);
            Err(failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch token details.", e))
        }
    }
}

// ============================================================================
// Dextools
// ============================================================================

pub async fn get_trending(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> ApiResult<TrendingResponse> {
    let limit = resolve_limit(query.limit.as_deref());
    info!("Fetching top {} trending pools", limit);

    match state.aggregator.get_trending_pools(limit).await {
        Ok(pools) => Ok(Json(TrendingResponse {
            trending: pools.iter().map(TrendingPoolView::from).collect(),
        })),
        Err(e) => {
            error!("Failed to fetch trending pools: {}", e);
            let status = match &e {
                GatewayError::NoDataFound(_) => StatusCode::NOT_FOUND,
                GatewayError::UpstreamError { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err(failure(status, "Failed to fetch data from Dextools API", e))
        }
    }
}

pub async fn get_socials(
    State(state): State<AppState>,
    Path(contract_address): Path<String>,
) -> ApiResult<SocialsResponse> {
    info!("Fetching socials for contract address: {}", contract_address);

    match state.aggregator.get_socials(&contract_address).await {
        Ok(socials) => Ok(Json(SocialsResponse { socials })),
        Err(e) => {
            error!("Failed to fetch socials for {}: {}", contract_address, e);
            let status = match &e {
                GatewayError::NoDataFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err(failure(status, "Failed to fetch socials.", e))
        }
    }
}

pub async fn get_audit(
    State(state): State<AppState>,
    Path(contract_address): Path<String>,
) -> ApiResult<AuditResponse> {
    info!("Fetching audit for contract address: {}", contract_address);

    match state.aggregator.get_audit_report(&contract_address).await {
        Ok(audit) => Ok(Json(AuditResponse { audit })),
        Err(e) => {
            error!("Failed to fetch audit for {}: {}", contract_address, e);
            Err(failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch audit information.", e))
        }
    }
}

// `error` carries the specific cause; `details` names the failed operation.
fn failure(status: StatusCode, operation: &str, e: GatewayError) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
            details: Some(operation.to_string()),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use crate::gateway::Aggregator;
    use crate::web::server::create_app;
    use axum::{body::Body, http::Request, Router};
    use mockito::Server;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(rpc: &Server, dextools: &Server) -> Router {
        app_with_timeout(rpc, dextools, 10)
    }

    fn app_with_timeout(rpc: &Server, dextools: &Server, request_timeout_secs: u64) -> Router {
        let config = GatewayConfig {
            solana_rpc_url: rpc.url(),
            dextools_api_key: "key".to_string(),
            dextools_base_url: dextools.url(),
            dextools_chain: "solana".to_string(),
            api_host: "127.0.0.1".to_string(),
            api_port: 0,
            upstream_timeout_secs: 5,
            request_timeout_secs,
        };
        let aggregator = Aggregator::new(&config).unwrap();
        create_app(AppState::new(Arc::new(aggregator), Arc::new(config)))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let rpc = Server::new_async().await;
        let dextools = Server::new_async().await;
        let (status, body) = get(app(&rpc, &dextools), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_invalid_token_address_is_500_with_error_body() {
        let rpc = Server::new_async().await;
        let dextools = Server::new_async().await;
        let (status, body) = get(app(&rpc, &dextools), "/api/token/not-a-mint").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Invalid token address: not-a-mint");
    }

    #[tokio::test]
    async fn test_trending_propagates_upstream_status() {
        let rpc = Server::new_async().await;
        let mut dextools = Server::new_async().await;
        let _mock = dextools
            .mock("GET", "/ranking/solana/hotpools")
            .with_status(429)
            .with_body("Too Many Requests")
            .create_async()
            .await;

        let (status, body) = get(app(&rpc, &dextools), "/api/dextools/trending?limit=10").await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(body["error"].as_str().unwrap().contains("429"));
    }

    #[tokio::test]
    async fn test_trending_bad_limit_uses_default() {
        let rpc = Server::new_async().await;
        let mut dextools = Server::new_async().await;
        let data: Vec<Value> = (0..8)
            .map(|i| serde_json::json!({ "mainToken": { "name": format!("T{}", i) } }))
            .collect();
        let _mock = dextools
            .mock("GET", "/ranking/solana/hotpools")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "data": data }).to_string())
            .create_async()
            .await;

        let (status, body) = get(app(&rpc, &dextools), "/api/dextools/trending?limit=lots").await;
        assert_eq!(status, StatusCode::OK);
        let trending = body["trending"].as_array().unwrap();
        assert_eq!(trending.len(), 5);
        assert_eq!(trending[0]["name"], "T0/Unknown");
        assert_eq!(trending[0]["symbol"], "N/A/N/A");
        assert_eq!(trending[0]["price"], "N/A");
        assert_eq!(trending[0]["url"], "N/A");
    }

    #[tokio::test]
    async fn test_socials_not_found_is_404() {
        let rpc = Server::new_async().await;
        let mut dextools = Server::new_async().await;
        let _mock = dextools
            .mock("GET", "/token/solana/Mint1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"statusCode":200,"data":{}}"#)
            .create_async()
            .await;

        let (status, body) = get(app(&rpc, &dextools), "/api/dextools/socials/Mint1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No social links found.");
    }

    #[tokio::test]
    async fn test_audit_upstream_failure_is_500() {
        let rpc = Server::new_async().await;
        let mut dextools = Server::new_async().await;
        let _mock = dextools
            .mock("GET", "/token/solana/Mint1/audit")
            .with_status(403)
            .create_async()
            .await;

        let (status, body) = get(app(&rpc, &dextools), "/api/dextools/audit/Mint1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["details"], "Failed to fetch audit information.");
    }

    #[tokio::test]
    async fn test_slow_upstream_hits_request_timeout() {
        let rpc = Server::new_async().await;
        let mut dextools = Server::new_async().await;
        let _mock = dextools
            .mock("GET", "/ranking/solana/hotpools")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_chunked_body(|w| {
                use std::io::Write;
                std::thread::sleep(std::time::Duration::from_secs(3));
                w.write_all(br#"{"data":[]}"#)
            })
            .create_async()
            .await;

        let response = app_with_timeout(&rpc, &dextools, 1)
            .oneshot(
                Request::builder()
                    .uri("/api/dextools/trending")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
