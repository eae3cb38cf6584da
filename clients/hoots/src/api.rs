//! Authorized JSON request helper
//!
//! Every call is a single request/response round trip against the configured
//! base URL. The bearer token is read from the session store on each call,
//! so a sign-in or sign-out is picked up by the next request.

use common::config::ClientConfig;
use reqwest::{Client, Method};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    error::{ClientError, ClientResult},
    session::SessionStore,
};

/// HTTP client attaching the session token to every request
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// No timeout is configured: a request the server never answers never
    /// resolves.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Send a request and return the parsed JSON body, whatever the status
    ///
    /// Connection failures and non-JSON bodies are logged here and come back
    /// as [`ClientError::Transport`].
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method.clone(), &url);

        if let Some(token) = self.session.get_token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!("{} {} failed: {}", method, path, e);
            ClientError::Transport(e)
        })?;

        let status = response.status();
        let value = response.json::<Value>().await.map_err(|e| {
            error!("{} {} returned a non-JSON body ({}): {}", method, path, status, e);
            ClientError::Transport(e)
        })?;

        debug!("{} {} -> {}", method, path, status);
        Ok(value)
    }

    pub async fn get(&self, path: &str) -> ClientResult<Value> {
        self.request::<()>(Method::GET, path, None).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<Value> {
        self.request::<()>(Method::DELETE, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Value> {
        self.request(Method::PUT, path, Some(body)).await
    }
}

/// Interpret a response body as `T`
///
/// An object carrying an `error` (or `err`) message is the server reporting
/// a failure; any other body that does not fit `T` is a decode error.
pub fn parse_body<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    if let Some(message) = server_error(&value) {
        return Err(ClientError::Server(message));
    }
    Ok(serde_json::from_value(value)?)
}

fn server_error(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    ["error", "err"].iter().find_map(|key| match object.get(*key)? {
        Value::String(message) => Some(message.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    })
}
