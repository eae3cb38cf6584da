//! Contract tests for the stub API over real HTTP

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use stub_api::{jwt::JwtConfig, spawn_local};

async fn sign_up(client: &Client, base: &str, username: &str) -> String {
    let body: Value = client
        .post(format!("{}/auth/signup", base))
        .json(&json!({"username": username, "password": "pw", "passwordConf": "pw"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_hoots_require_bearer_token() {
    let (addr, _server) = spawn_local(JwtConfig::default()).await.unwrap();
    let response = Client::new()
        .get(format!("http://{}/hoots", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_sign_in_with_bad_password_is_json_error() {
    let (addr, _server) = spawn_local(JwtConfig::default()).await.unwrap();
    let base = format!("http://{}", addr);
    let client = Client::new();
    sign_up(&client, &base, "ada").await;

    let response = client
        .post(format!("{}/auth/signin", base))
        .json(&json!({"username": "ada", "password": "nope"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_non_author_update_is_forbidden() {
    let (addr, _server) = spawn_local(JwtConfig::default()).await.unwrap();
    let base = format!("http://{}", addr);
    let client = Client::new();
    let ada = sign_up(&client, &base, "ada").await;
    let bob = sign_up(&client, &base, "bob").await;

    let hoot: Value = client
        .post(format!("{}/hoots", base))
        .bearer_auth(&ada)
        .json(&json!({"title": "t", "text": "x", "category": "News"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = hoot["_id"].as_str().unwrap();
    assert_eq!(hoot["author"]["username"], "ada");

    let response = client
        .put(format!("{}/hoots/{}", base, id))
        .bearer_auth(&bob)
        .json(&json!({"title": "mine", "text": "x", "category": "News"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = client
        .delete(format!("{}/hoots/{}", base, id))
        .bearer_auth(&ada)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: Value = response.json().await.unwrap();
    assert_eq!(deleted["_id"], id);
}
