//! Default [`RequestExecutor`] backed by reqwest.
//!
//! Adds basic authentication from the profile, validates the response
//! status against the descriptor's accepted codes and normalizes the body:
//! JSON responses are parsed, everything else is wrapped as
//! `{"response": "<text>"}`.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::ZosmfProfile;
use crate::error::{Result, ZosmfErrorBody, ZoweError};
use crate::request::{HttpMethod, RequestDescriptor, RequestExecutor};

/// HTTP request handler for one z/OSMF profile.
pub struct HttpRequestHandler {
    client: reqwest::Client,
    user: String,
    password: String,
}

impl HttpRequestHandler {
    /// Build a handler with a client configured from the profile's TLS policy.
    pub fn new(profile: &ZosmfProfile) -> Result<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!profile.reject_unauthorized)
            .build()?;
        Ok(Self::with_client(client, profile))
    }

    /// Use a preconfigured reqwest client with the profile's credentials.
    pub fn with_client(client: reqwest::Client, profile: &ZosmfProfile) -> Self {
        Self {
            client,
            user: profile.user.clone(),
            password: profile.password.clone(),
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

/// Turn a successful response body into the payload returned to callers.
pub fn normalize_response(content_type: Option<&str>, body: String) -> Result<Value> {
    if is_json_content_type(content_type) && !body.trim().is_empty() {
        Ok(serde_json::from_str(&body)?)
    } else {
        Ok(json!({ "response": body }))
    }
}

#[async_trait]
impl RequestExecutor for HttpRequestHandler {
    async fn perform_request(&self, request: RequestDescriptor) -> Result<Value> {
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            params = request.params.len(),
            "Sending z/OSMF request"
        );

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);
        if !self.user.is_empty() {
            builder = builder.basic_auth(&self.user, Some(&self.password));
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(ref body) = request.json {
            builder = builder.json(body);
        } else if let Some(ref data) = request.data {
            builder = builder.body(data.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().await?;

        if !request.accepts(status) {
            let message = ZosmfErrorBody::parse(&text)
                .map(|body| body.message)
                .unwrap_or(text);
            tracing::warn!(
                method = %request.method,
                url = %request.url,
                status,
                expected = ?request.expected_codes,
                message = %message,
                "Unexpected z/OSMF status"
            );
            return Err(ZoweError::UnexpectedStatus {
                expected: request.expected_codes,
                received: status,
                message,
            });
        }

        tracing::debug!(status, url = %request.url, "z/OSMF request succeeded");
        normalize_response(content_type.as_deref(), text)
    }
}
