//! Request-level behavior of the client against purpose-built fake servers

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    http::HeaderMap,
    routing::{get, post},
};
use common::{
    config::ClientConfig,
    models::{SignInForm, UserIdentity},
    storage::MemoryStorage,
};
use hoots::{AppController, ClientError, SessionStore, View, api::ApiClient};
use serde_json::{Value, json};
use stub_api::jwt::{JwtConfig, JwtService};
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Echoes the request headers and body back as JSON
async fn echo(headers: HeaderMap, body: String) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "authorization": header("authorization"),
        "contentType": header("content-type"),
        "body": body,
    }))
}

fn api_for(addr: SocketAddr) -> ApiClient {
    let session = SessionStore::new(Arc::new(MemoryStorage::new()));
    ApiClient::new(&ClientConfig::with_base_url(format!("http://{}", addr)), session)
}

#[tokio::test]
async fn test_anonymous_request_has_no_authorization() {
    let addr = serve(Router::new().route("/echo", get(echo))).await;
    let api = api_for(addr);

    let value = assert_ok!(api.get("/echo").await);
    assert_eq!(value["authorization"], Value::Null);
    assert_eq!(value["contentType"], Value::Null);
}

#[tokio::test]
async fn test_bearer_token_and_json_body_are_attached() {
    let addr = serve(Router::new().route("/echo", post(echo))).await;
    let api = api_for(addr);
    api.session().set_token("abc.def.ghi").unwrap();

    let value = assert_ok!(api.post("/echo", &json!({"text": "hi"})).await);
    assert_eq!(value["authorization"], "Bearer abc.def.ghi");
    assert_eq!(value["contentType"], "application/json");
    assert_eq!(value["body"], r#"{"text":"hi"}"#);
}

#[tokio::test]
async fn test_error_status_still_returns_json_body() {
    let app = Router::new().route(
        "/hoots",
        get(|| async {
            (
                axum::http::StatusCode::UNAUTHORIZED,
                Json(json!({"err": "Invalid token."})),
            )
        }),
    );
    let api = api_for(serve(app).await);

    let value = assert_ok!(api.get("/hoots").await);
    assert_eq!(value["err"], "Invalid token.");
}

#[tokio::test]
async fn test_non_json_body_is_transport_error() {
    let app = Router::new().route("/hoots", get(|| async { "<html>Bad Gateway</html>" }));
    let api = api_for(serve(app).await);

    let err = assert_err!(api.get("/hoots").await);
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn test_failed_initial_load_leaves_collection_unloaded() {
    let token = JwtService::new(JwtConfig::default())
        .generate_token(&UserIdentity::new("u1", "ada"))
        .unwrap();
    let app = Router::new()
        .route(
            "/auth/signin",
            post(move || {
                let token = token.clone();
                async move { Json(json!({ "token": token })) }
            }),
        )
        .route("/hoots", get(|| async { "upstream unavailable" }));
    let addr = serve(app).await;

    let config = ClientConfig::with_base_url(format!("http://{}", addr));
    let mut controller = AppController::new(&config, Arc::new(MemoryStorage::new()));
    let form = SignInForm {
        username: "ada".to_string(),
        password: "pw".to_string(),
    };
    let user = assert_ok!(controller.sign_in(&form).await);

    assert_eq!(user.username, "ada");
    assert_eq!(controller.user(), Some(&user));
    assert_eq!(controller.view(), &View::Dashboard);
    // Not loaded, as opposed to loaded and empty
    assert!(controller.hoots().is_none());
}

#[tokio::test]
async fn test_token_without_identity_is_rejected() {
    let app = Router::new().route(
        "/auth/signin",
        post(|| async { Json(json!({ "token": "not-a-jwt" })) }),
    );
    let addr = serve(app).await;

    let config = ClientConfig::with_base_url(format!("http://{}", addr));
    let mut controller = AppController::new(&config, Arc::new(MemoryStorage::new()));
    let form = SignInForm {
        username: "ada".to_string(),
        password: "pw".to_string(),
    };
    let err = assert_err!(controller.sign_in(&form).await);

    assert!(matches!(err, ClientError::InvalidToken));
    assert!(controller.session().get_token().is_none());
    assert!(controller.user().is_none());
}

/// Requests carry no client-side timeout: a server that accepts the
/// connection and never answers leaves the call pending indefinitely.
#[tokio::test]
async fn test_unanswered_request_never_resolves() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let api = api_for(addr);
    let pending = tokio::time::timeout(Duration::from_millis(500), api.get("/hoots")).await;
    assert!(pending.is_err(), "request should still be pending");
}
