//! Axum route handlers for the vault agents.
//!
//! # Routes
//!
//! - `POST /api/<method>`               — Returns a `FunctionCall` action, or
//!   400 `{"error": "..."}` when a required field is missing
//! - `GET  /api/ping`                   — Returns `{"message": "pong"}`
//! - `GET  /.well-known/ai-plugin.json` — Plugin manifest (vault service only)

use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AgentConfig;
use crate::contract::{Action, ContractMethod, Service, ValidationError};
use crate::manifest::{plugin_manifest, MANIFEST_PATH, PING_PATH};

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Endpoint table served by this instance.
    pub service: Service,
    pub config: Arc<AgentConfig>,
}

impl AppState {
    pub fn new(service: Service, config: AgentConfig) -> Self {
        Self {
            service,
            config: Arc::new(config),
        }
    }
}

/// Build the axum router with all routes of the state's service.
pub fn app_router(state: AppState) -> Router {
    let mut router = Router::new().route(PING_PATH, get(ping_handler));

    for method in state.service.methods() {
        router = router.route(
            &method.path(),
            post(move |body: Bytes| call_handler(method, body)),
        );
    }

    if state.service.serves_manifest() {
        router = router.route(MANIFEST_PATH, get(manifest_handler));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `config.port` and serve `service` until Ctrl+C or SIGTERM.
pub async fn serve(service: Service, config: AgentConfig) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr();

    if service.serves_manifest() && config.bitte.is_none() {
        tracing::warn!(
            "BITTE_CONFIG not set, manifest will advertise {}",
            config.server_url()
        );
    }

    let app = app_router(AppState::new(service, config));

    tracing::info!("{} agent starting on {}", service, bind_addr);
    tracing::info!("Endpoints:");
    for method in service.methods() {
        tracing::info!("  POST {}", method.path());
    }
    tracing::info!("  GET  {}", PING_PATH);
    if service.serves_manifest() {
        tracing::info!("  GET  {}", MANIFEST_PATH);
    }

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    tracing::info!("{} agent stopped", service);
    Ok(())
}

/// POST /api/<method> — build the unsigned call.
///
/// The body is read leniently: an empty or malformed body counts as `{}`, so
/// methods without fields always succeed.
async fn call_handler(
    method: &'static ContractMethod,
    body: Bytes,
) -> Result<Json<Action>, ValidationError> {
    let body: Value = serde_json::from_slice(&body).unwrap_or_default();
    method.function_call(&body).map(Json)
}

/// GET /api/ping — liveness probe.
async fn ping_handler() -> Json<Value> {
    Json(serde_json::json!({ "message": "pong" }))
}

/// GET /.well-known/ai-plugin.json — plugin manifest.
async fn manifest_handler(State(state): State<AppState>) -> Json<Value> {
    Json(plugin_manifest(state.service, &state.config.server_url()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BitteConfig;
    use crate::contract::FieldKind;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    fn app(service: Service) -> Router {
        app_router(AppState::new(service, AgentConfig::default()))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(body)
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, "POST", uri, Body::from(body.to_string())).await
    }

    /// A body carrying a valid value for every field of `method`.
    fn valid_body(method: &ContractMethod) -> Value {
        let mut body = serde_json::Map::new();
        for field in method.fields {
            let value = match field.kind {
                FieldKind::Number => json!(7),
                FieldKind::String => json!("alice.near"),
            };
            body.insert(field.name.to_string(), value);
        }
        Value::Object(body)
    }

    #[tokio::test]
    async fn test_claim_vault_success() {
        let (status, json) =
            post_json(app(Service::Vault), "/api/claim_vault", json!({"index": 3})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "type": "FunctionCall",
                "params": {
                    "methodName": "claim_vault",
                    "args": {"index": 3},
                    "gas": "10000000000000",
                    "deposit": "0",
                }
            })
        );
    }

    #[tokio::test]
    async fn test_claim_vault_missing_index() {
        let (status, json) = post_json(app(Service::Auction), "/api/claim_vault", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "index must be a number"}));

        let (status, json) =
            send(app(Service::Auction), "POST", "/api/claim_vault", Body::empty()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "index must be a number");
    }

    #[tokio::test]
    async fn test_claim_vault_rejects_string_index() {
        let (status, json) =
            post_json(app(Service::Vault), "/api/claim_vault", json!({"index": "3"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "index must be a number");
    }

    #[tokio::test]
    async fn test_start_or_place_bid_accepts_any_body() {
        for body in [Body::empty(), Body::from("not json"), Body::from(r#"{"bid": 10}"#)] {
            let (status, json) =
                send(app(Service::Auction), "POST", "/api/start_or_place_bid", body).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["params"]["methodName"], "start_or_place_bid");
            assert_eq!(json["params"]["args"], json!({}));
            assert_eq!(json["params"]["gas"], "30000000000000");
            assert_eq!(json["params"]["deposit"], "1");
        }
    }

    #[tokio::test]
    async fn test_every_method_builds_its_call() {
        for service in [Service::Auction, Service::Vault] {
            for method in service.methods() {
                let body = valid_body(method);
                let (status, json) = post_json(app(service), &method.path(), body.clone()).await;

                assert_eq!(status, StatusCode::OK, "{} {}", service, method.name);
                let action: Action = serde_json::from_value(json).unwrap();
                let call = action.as_function_call();
                assert_eq!(call.method_name, method.name);
                assert_eq!(Value::Object(call.args.clone()), body);
                assert_eq!(call.gas, method.gas);
                assert_eq!(call.deposit, method.deposit);
            }
        }
    }

    #[tokio::test]
    async fn test_omitting_any_field_is_rejected() {
        for service in [Service::Auction, Service::Vault] {
            for method in service.methods() {
                for field in method.fields {
                    let mut body = valid_body(method);
                    body.as_object_mut().unwrap().remove(field.name);

                    let (status, json) = post_json(app(service), &method.path(), body).await;
                    assert_eq!(status, StatusCode::BAD_REQUEST, "{}.{}", method.name, field.name);
                    assert_eq!(json, json!({"error": field.error}));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_empty_string_is_rejected_like_missing() {
        let (status, json) =
            post_json(app(Service::Auction), "/api/ft_balance_of", json!({"account_id": ""})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "account_id is required"}));

        let (status, json) = post_json(
            app(Service::Vault),
            "/api/set_treasury",
            json!({"new_treasury_id": ""}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "new_treasury_id is required"}));
    }

    #[tokio::test]
    async fn test_extra_fields_are_dropped() {
        let (status, json) = post_json(
            app(Service::Vault),
            "/api/get_vaults",
            json!({"start_index": 0, "limit": 10, "owner": "mallory.near"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["params"]["args"], json!({"start_index": 0, "limit": 10}));
    }

    #[tokio::test]
    async fn test_integral_float_arguments_are_sent_as_integers() {
        let cases = [
            ("/api/claim_vault", r#"{"index": 3.0}"#, r#"{"index":3}"#),
            ("/api/claim_vault", r#"{"index": 1e3}"#, r#"{"index":1000}"#),
            ("/api/claim_vault", r#"{"index": 2.5}"#, r#"{"index":2.5}"#),
            (
                "/api/get_vaults",
                r#"{"start_index": 0.0, "limit": 10}"#,
                r#"{"start_index":0,"limit":10}"#,
            ),
        ];

        for (uri, body, expected_args) in cases {
            let (status, json) = send(app(Service::Vault), "POST", uri, Body::from(body)).await;
            assert_eq!(status, StatusCode::OK, "{} {}", uri, body);
            assert_eq!(
                serde_json::to_string(&json["params"]["args"]).unwrap(),
                expected_args,
                "{} {}",
                uri,
                body
            );
        }
    }

    #[tokio::test]
    async fn test_error_messages() {
        let cases = [
            (Service::Auction, "/api/claim_vault", json!({}), "index must be a number"),
            (Service::Auction, "/api/ft_balance_of", json!({}), "account_id is required"),
            (Service::Vault, "/api/change_owner", json!({}), "new_owner_id is required"),
            (
                Service::Vault,
                "/api/ft_on_transfer",
                json!({"sender_id": "alice.near", "amount": "5"}),
                "sender_id, amount and msg are required",
            ),
            (
                Service::Vault,
                "/api/get_list_deposits",
                json!({"from_index": 0}),
                "from_index and limit must be numbers",
            ),
            (
                Service::Vault,
                "/api/get_vaults",
                json!({"limit": 10}),
                "start_index and limit must be numbers",
            ),
            (
                Service::Vault,
                "/api/set_countdown_period_withdraw",
                json!({"new_countdown": "60"}),
                "new_countdown must be a number",
            ),
            (Service::Vault, "/api/set_treasury", json!({}), "new_treasury_id is required"),
            (Service::Vault, "/api/new", json!({}), "ft_token_id is required"),
            (
                Service::Vault,
                "/api/new",
                json!({"ft_token_id": "token.near"}),
                "countdown_period_withdraw must be a number",
            ),
            (
                Service::Vault,
                "/api/new",
                json!({"ft_token_id": "token.near", "countdown_period_withdraw": 60}),
                "owner_id is required",
            ),
            (
                Service::Vault,
                "/api/new",
                json!({
                    "ft_token_id": "token.near",
                    "countdown_period_withdraw": 60,
                    "owner_id": "owner.near",
                }),
                "treasury_id is required",
            ),
            (
                Service::Vault,
                "/api/new",
                json!({
                    "ft_token_id": "token.near",
                    "countdown_period_withdraw": 60,
                    "owner_id": "owner.near",
                    "treasury_id": "treasury.near",
                    "treasury_fee": "5",
                }),
                "treasury_fee must be a number",
            ),
        ];

        for (service, uri, body, expected) in cases {
            let (status, json) = post_json(app(service), uri, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(json, json!({"error": expected}), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_ping() {
        for service in [Service::Auction, Service::Vault] {
            let (status, json) =
                send(app(service), "GET", "/api/ping", Body::from(r#"{"ignored": true}"#)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json, json!({"message": "pong"}));
        }
    }

    #[tokio::test]
    async fn test_manifest_uses_configured_url() {
        let config = AgentConfig {
            port: 3000,
            bitte: Some(BitteConfig {
                url: "https://vault-agent.example.com".to_string(),
            }),
        };
        let app = app_router(AppState::new(Service::Vault, config));

        let (status, json) = send(app, "GET", MANIFEST_PATH, Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["servers"][0]["url"], "https://vault-agent.example.com");
        assert!(json["paths"]["/api/set_treasury"]["post"].is_object());
    }

    #[tokio::test]
    async fn test_services_are_independent() {
        let (status, _) = send(app(Service::Auction), "GET", MANIFEST_PATH, Body::empty()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = post_json(app(Service::Vault), "/api/get_last_vault", json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = post_json(
            app(Service::Auction),
            "/api/change_owner",
            json!({"new_owner_id": "bob.near"}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_on_call_endpoint_is_not_allowed() {
        let (status, _) = send(app(Service::Vault), "GET", "/api/claim_vault", Body::empty()).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
