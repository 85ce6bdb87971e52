//! Base for z/OSMF service clients — endpoint prefix, default headers and
//! the injected request executor.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::ZosmfProfile;
use crate::error::Result;
use crate::handler::HttpRequestHandler;
use crate::request::{HttpMethod, RequestDescriptor, RequestExecutor, CONTENT_TYPE, CSRF_HEADER};

/// Shared plumbing for one z/OSMF REST service (e.g. `/zosmf/restfiles/`).
#[derive(Clone)]
pub struct SdkApi {
    request_endpoint: String,
    default_headers: BTreeMap<String, String>,
    executor: Arc<dyn RequestExecutor>,
}

impl fmt::Debug for SdkApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkApi")
            .field("request_endpoint", &self.request_endpoint)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl SdkApi {
    /// Create an API base for `default_url` on the profile's host, sending
    /// requests through `executor`.
    pub fn new(
        profile: &ZosmfProfile,
        default_url: &str,
        executor: Arc<dyn RequestExecutor>,
    ) -> Result<Self> {
        profile.validate()?;

        let mut default_headers = BTreeMap::new();
        default_headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        default_headers.insert(CSRF_HEADER.to_string(), String::new());

        Ok(Self {
            request_endpoint: format!("{}{}", profile.base_url(), default_url),
            default_headers,
            executor,
        })
    }

    /// Create an API base that sends requests with an [`HttpRequestHandler`]
    /// built from the profile.
    pub fn from_profile(profile: &ZosmfProfile, default_url: &str) -> Result<Self> {
        let handler = HttpRequestHandler::new(profile)?;
        Self::new(profile, default_url, Arc::new(handler))
    }

    /// Endpoint prefix every request URL starts with.
    pub fn request_endpoint(&self) -> &str {
        &self.request_endpoint
    }

    /// Fresh descriptor seeded with the endpoint URL and default headers.
    pub fn create_custom_request_arguments(&self, method: HttpMethod) -> RequestDescriptor {
        let mut request = RequestDescriptor::new(method, self.request_endpoint.clone());
        request.headers = self.default_headers.clone();
        request
    }

    /// Hand a descriptor to the executor.
    pub async fn perform(&self, request: RequestDescriptor) -> Result<Value> {
        self.executor.perform_request(request).await
    }
}
