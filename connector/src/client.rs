/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{ConnectorError, ConnectorResult};
use crate::session::SessionStore;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use strum_macros::{Display, EnumString};

pub const DEFAULT_BASE_URL: &str = match option_env!("GEARSYNC_API_URL") {
    Some(url) => url,
    None => "http://localhost:8080/api",
};

/// Whether the backend accepts admin updates, deletes and status toggles on
/// user accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UserMutations {
    #[default]
    Unsupported,
    Supported,
}

/// Shared request issuer for one backend. Attaches the session's bearer
/// token to every outgoing request.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
    session: Arc<SessionStore>,
    user_mutations: UserMutations,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            session,
            user_mutations: UserMutations::default(),
        }
    }

    pub fn with_user_mutations(mut self, user_mutations: UserMutations) -> Self {
        self.user_mutations = user_mutations;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.session.token() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        request
    }

    pub fn build(&self, method: Method, path: &str) -> ConnectorResult<reqwest::Request> {
        Ok(self.request(method, path).build()?)
    }

    pub fn build_with_body<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ConnectorResult<reqwest::Request> {
        Ok(self.request(method, path).json(body).build()?)
    }

    /// Fails with [`ConnectorError::Unsupported`] without touching the network
    /// when the backend has no user mutation endpoints.
    pub fn require_user_mutations(&self, operation: &'static str) -> ConnectorResult<()> {
        match self.user_mutations {
            UserMutations::Supported => Ok(()),
            UserMutations::Unsupported => Err(ConnectorError::Unsupported(operation)),
        }
    }

    async fn execute(&self, request: reqwest::Request) -> ConnectorResult<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(%method, %url, "sending request");

        let res = self.client.execute(request).await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "request failed");
            e
        })?;

        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

        tracing::warn!(%method, %url, %status, %message, "backend returned an error");
        Err(ConnectorError::Http { status, message })
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::Request) -> ConnectorResult<T> {
        let res = self.execute(request).await?;
        parse_body(&res.bytes().await?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ConnectorResult<T> {
        self.send(self.build(Method::GET, path)?).await
    }

    /// Like [`HttpClient::get`] but an empty or `null` body reads as an empty list.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ConnectorResult<Vec<T>> {
        let list: Option<Vec<T>> = self.get(path).await?;
        Ok(list.unwrap_or_default())
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ConnectorResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.build_with_body(Method::POST, path, body)?)
            .await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ConnectorResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.build_with_body(Method::PUT, path, body)?)
            .await
    }

    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ConnectorResult<T> {
        self.send(self.build(Method::PUT, path)?).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ConnectorResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.build_with_body(Method::PATCH, path, body)?)
            .await
    }

    /// Deletes discard whatever confirmation text the backend sends back.
    pub async fn delete(&self, path: &str) -> ConnectorResult<()> {
        self.execute(self.build(Method::DELETE, path)?).await?;
        Ok(())
    }
}

/// Backend replies are JSON, except for a few endpoints that answer with a
/// bare confirmation string. Those are read as a JSON string.
pub(crate) fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> ConnectorResult<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }

    match serde_json::from_slice::<T>(bytes) {
        Ok(parsed) => Ok(parsed),
        Err(err) => match serde_json::from_slice::<serde_json::Value>(bytes) {
            Ok(_) => Err(err.into()),
            Err(_) => {
                let text = String::from_utf8_lossy(bytes).trim().to_string();
                serde_json::from_value(serde_json::Value::String(text)).map_err(|_| err.into())
            }
        },
    }
}

fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(|message| message.as_str())
            .map(str::to_string)
            .or_else(|| Some(body.to_string())),
        Ok(serde_json::Value::String(message)) => Some(message),
        _ => Some(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn test_parse_json_body() {
        let item: Item = parse_body(br#"{"id": 4}"#).unwrap();
        assert_eq!(item, Item { id: 4 });
    }

    #[test]
    fn test_parse_plain_text_body() {
        let message: String = parse_body(b"Service added successfully").unwrap();
        assert_eq!(message, "Service added successfully");

        let err = parse_body::<Item>(b"Service added successfully").unwrap_err();
        assert!(matches!(err, ConnectorError::Decode(_)));
    }

    #[test]
    fn test_parse_empty_body() {
        let unit: () = parse_body(b"").unwrap();
        assert_eq!(unit, ());

        let list: Option<Vec<Item>> = parse_body(b"  ").unwrap();
        assert_eq!(list, None);
    }

    #[test]
    fn test_parse_wrong_shape_is_rejected() {
        let err = parse_body::<Vec<Item>>(br#"{"id": 4}"#).unwrap_err();
        assert!(matches!(err, ConnectorError::Decode(_)));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(""), None);
        assert_eq!(
            error_message("Email already registered"),
            Some("Email already registered".to_string())
        );
        assert_eq!(
            error_message(r#"{"status":400,"message":"Invalid vehicle"}"#),
            Some("Invalid vehicle".to_string())
        );
        assert_eq!(
            error_message(r#"{"error":"Forbidden"}"#),
            Some("Forbidden".to_string())
        );
    }

    #[test]
    fn test_url_join() {
        let client = HttpClient::new("http://localhost:8080/api/", Arc::new(SessionStore::in_memory()));
        assert_eq!(client.url("/customer/vehicles"), "http://localhost:8080/api/customer/vehicles");
        assert_eq!(client.url("customer/vehicles"), "http://localhost:8080/api/customer/vehicles");
    }

    #[test]
    fn test_user_mutations_short_circuit() {
        let client = HttpClient::new(DEFAULT_BASE_URL, Arc::new(SessionStore::in_memory()));
        assert!(matches!(
            client.require_user_mutations("Deleting users"),
            Err(ConnectorError::Unsupported("Deleting users"))
        ));

        let client = client.with_user_mutations(UserMutations::Supported);
        assert!(client.require_user_mutations("Deleting users").is_ok());
    }
}
