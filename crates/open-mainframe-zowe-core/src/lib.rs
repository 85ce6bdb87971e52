//! # Zowe client core
//!
//! Shared plumbing for OpenMainframe's z/OSMF REST clients: connection
//! profiles, request descriptors, the [`RequestExecutor`] seam and its
//! default reqwest-backed implementation.
//!
//! ## Features
//!
//! - **Profiles** — TOML files plus `ZOWE_OPT_*` environment overrides
//! - **Request descriptors** — method, URL, headers, query, JSON or text body, accepted codes
//! - **HTTP handler** — basic auth, TLS verification toggle, status validation,
//!   response normalization
//! - **SdkApi** — per-service endpoint prefix and default headers
//!
//! ## Example
//!
//! ```rust,no_run
//! use open_mainframe_zowe_core::{HttpMethod, SdkApi, ZosmfProfile};
//!
//! # async fn example() -> open_mainframe_zowe_core::Result<()> {
//! let profile = ZosmfProfile::new("mainframe.example.com", "IBMUSER", "SYS1");
//! let api = SdkApi::from_profile(&profile, "/zosmf/restfiles/")?;
//! let mut request = api.create_custom_request_arguments(HttpMethod::Get);
//! request.url.push_str("ds");
//! request.add_param("dslevel", "IBMUSER.*");
//! let listing = api.perform(request).await?;
//! # let _ = listing;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handler;
pub mod request;
pub mod sdk_api;

pub use config::{Protocol, ZosmfProfile};
pub use error::{Result, ZosmfErrorBody, ZoweError};
pub use handler::HttpRequestHandler;
pub use request::{HttpMethod, RequestDescriptor, RequestExecutor};
pub use sdk_api::SdkApi;
