//! Request descriptors and the executor seam that sends them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, ZoweError};

/// `Content-Type` header name as used in request descriptors.
pub const CONTENT_TYPE: &str = "Content-Type";

/// CSRF header z/OSMF requires on every modifying request.
pub const CSRF_HEADER: &str = "X-CSRF-ZOSMF-HEADER";

/// HTTP verbs accepted by the z/OSMF REST services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Upper-case verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ZoweError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(ZoweError::InvalidRequestMethod {
                method: s.to_string(),
            }),
        }
    }
}

/// One HTTP request to z/OSMF, built per call and consumed by a [`RequestExecutor`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Absolute request URL.
    pub url: String,
    /// Request headers.
    pub headers: BTreeMap<String, String>,
    /// Query string parameters, in order.
    pub params: Vec<(String, String)>,
    /// JSON request body.
    pub json: Option<Value>,
    /// Raw text request body.
    pub data: Option<String>,
    /// Status codes that count as success.
    pub expected_codes: Vec<u16>,
}

impl RequestDescriptor {
    /// Status codes accepted when a caller does not override them.
    pub const DEFAULT_EXPECTED_CODES: [u16; 1] = [200];

    /// Create a descriptor with no headers, params or body.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            params: Vec::new(),
            json: None,
            data: None,
            expected_codes: Self::DEFAULT_EXPECTED_CODES.to_vec(),
        }
    }

    /// Set (or replace) a header.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Append a query parameter.
    pub fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.push((name.into(), value.into()));
    }

    /// Header value by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Whether `status` is one of the accepted codes.
    pub fn accepts(&self, status: u16) -> bool {
        self.expected_codes.contains(&status)
    }
}

/// Sends request descriptors and returns the normalized response payload.
///
/// A JSON response is returned as parsed; any other response is wrapped as
/// `{"response": "<body text>"}`. A status outside
/// [`RequestDescriptor::expected_codes`] is reported as
/// [`ZoweError::UnexpectedStatus`].
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute one request.
    async fn perform_request(&self, request: RequestDescriptor) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("DELETE".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert_eq!(HttpMethod::Put.to_string(), "PUT");

        let err = "PATCH".parse::<HttpMethod>().unwrap_err();
        assert!(matches!(err, ZoweError::InvalidRequestMethod { ref method } if method == "PATCH"));
    }

    #[test]
    fn test_descriptor_defaults() {
        let mut req = RequestDescriptor::new(HttpMethod::Get, "https://host/zosmf/restfiles/ds");
        assert_eq!(req.expected_codes, vec![200]);
        assert!(req.accepts(200));
        assert!(!req.accepts(201));
        assert!(req.json.is_none() && req.data.is_none());

        req.set_header(CONTENT_TYPE, "application/json");
        req.set_header(CONTENT_TYPE, "text/plain");
        assert_eq!(req.header(CONTENT_TYPE), Some("text/plain"));
        assert_eq!(req.headers.len(), 1);

        req.add_param("dslevel", "IBMUSER.*");
        assert_eq!(req.params, vec![("dslevel".to_string(), "IBMUSER.*".to_string())]);
    }
}
