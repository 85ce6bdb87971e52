//! Client for the z/OSMF Files REST services (`/zosmf/restfiles/`).
//!
//! Each method builds one request and hands it to the [`SdkApi`] executor:
//! - `GET    fs?path=PATH` — list USS files
//! - `GET    fs/PATH` — read a USS file
//! - `GET    ds?dslevel=PATTERN` — list datasets
//! - `GET    ds/DSN/member` — list PDS members
//! - `GET    ds/DSN` — read dataset content
//! - `PUT    ds/DSN` — write dataset content
//! - `DELETE ds/[-(VOLUME)/]DSN` — delete a dataset
//! - `POST   ds/DSN` — allocate a dataset

use std::path::Path;
use std::sync::Arc;

use open_mainframe_zowe_core::request::CONTENT_TYPE;
use open_mainframe_zowe_core::{
    HttpMethod, RequestExecutor, Result, SdkApi, ZosmfProfile, ZoweError,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;
use tokio::io::AsyncWriteExt;

use crate::types::{AllocationOptions, MemberListItem};

/// URL prefix of the z/OSMF Files REST services.
pub const FILES_ENDPOINT: &str = "/zosmf/restfiles/";

/// Characters that would end or corrupt a URL path segment. `#` is a
/// national character in dataset and member names.
const IDENTIFIER: &AsciiSet = &CONTROLS.add(b'#').add(b'?').add(b'%');

/// Escape a dataset name or USS path for embedding in a request path.
fn encode_identifier(identifier: &str) -> String {
    utf8_percent_encode(identifier, IDENTIFIER).to_string()
}

/// Dataset and USS file operations against one z/OSMF system.
#[derive(Debug, Clone)]
pub struct Files {
    api: SdkApi,
}

impl Files {
    /// Wrap an [`SdkApi`] built for [`FILES_ENDPOINT`].
    pub fn new(api: SdkApi) -> Self {
        Self { api }
    }

    /// Connect with the default HTTP request handler.
    pub fn from_profile(profile: &ZosmfProfile) -> Result<Self> {
        Ok(Self::new(SdkApi::from_profile(profile, FILES_ENDPOINT)?))
    }

    /// Send every request through `executor`.
    pub fn with_executor(
        profile: &ZosmfProfile,
        executor: Arc<dyn RequestExecutor>,
    ) -> Result<Self> {
        Ok(Self::new(SdkApi::new(profile, FILES_ENDPOINT, executor)?))
    }

    /// Underlying API base.
    pub fn api(&self) -> &SdkApi {
        &self.api
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}{}", self.api.request_endpoint(), suffix)
    }

    /// List USS files under `path`.
    pub async fn list_files(&self, path: &str) -> Result<Value> {
        tracing::debug!(path, "Listing USS files");
        let mut request = self.api.create_custom_request_arguments(HttpMethod::Get);
        request.url = self.url("fs");
        request.add_param("path", path);
        self.api.perform(request).await
    }

    /// Read a USS file; `filepath_name` must be absolute.
    pub async fn get_file_content(&self, filepath_name: &str) -> Result<Value> {
        tracing::debug!(path = filepath_name, "Reading USS file");
        let mut request = self.api.create_custom_request_arguments(HttpMethod::Get);
        request.url = self.url(&format!("fs{}", encode_identifier(filepath_name)));
        self.api.perform(request).await
    }

    /// List datasets matching `name_pattern` (e.g. `IBMUSER.*`).
    pub async fn list_dsn(&self, name_pattern: &str) -> Result<Value> {
        tracing::debug!(pattern = name_pattern, "Listing datasets");
        let mut request = self.api.create_custom_request_arguments(HttpMethod::Get);
        request.url = self.url("ds");
        request.add_param("dslevel", name_pattern);
        self.api.perform(request).await
    }

    /// List the members of a PDS/PDSE.
    ///
    /// Returns the `items` array of the response; a response without one is
    /// an error.
    pub async fn list_dsn_members(&self, dataset_name: &str) -> Result<Vec<MemberListItem>> {
        tracing::debug!(dsn = dataset_name, "Listing PDS members");
        let mut request = self.api.create_custom_request_arguments(HttpMethod::Get);
        request.url = self.url(&format!("ds/{}/member", encode_identifier(dataset_name)));
        let mut response = self.api.perform(request).await?;
        let items = response
            .get_mut("items")
            .map(Value::take)
            .ok_or_else(|| ZoweError::missing_field("items"))?;
        Ok(serde_json::from_value(items)?)
    }

    /// Read the content of a dataset or member (`DSN(MEMBER)`).
    pub async fn get_dsn_content(&self, dataset_name: &str) -> Result<Value> {
        tracing::debug!(dsn = dataset_name, "Reading dataset");
        let mut request = self.api.create_custom_request_arguments(HttpMethod::Get);
        request.url = self.url(&format!("ds/{}", encode_identifier(dataset_name)));
        self.api.perform(request).await
    }

    /// Replace the content of an existing dataset with `data`.
    pub async fn write_to_dsn(&self, dataset_name: &str, data: &str) -> Result<Value> {
        tracing::debug!(dsn = dataset_name, bytes = data.len(), "Writing dataset");
        let mut request = self.api.create_custom_request_arguments(HttpMethod::Put);
        request.url = self.url(&format!("ds/{}", encode_identifier(dataset_name)));
        request.data = Some(data.to_string());
        request.set_header(CONTENT_TYPE, "text/plain");
        request.expected_codes = vec![204, 201];
        self.api.perform(request).await
    }

    /// Save a dataset's content to `output_file`, overwriting it.
    pub async fn download_dsn(&self, dataset_name: &str, output_file: impl AsRef<Path>) -> Result<()> {
        let output_file = output_file.as_ref();
        let response = self.get_dsn_content(dataset_name).await?;
        let content = response
            .get("response")
            .and_then(Value::as_str)
            .ok_or_else(|| ZoweError::missing_field("response"))?;

        let mut out = tokio::fs::File::create(output_file).await?;
        out.write_all(content.as_bytes()).await?;
        out.flush().await?;

        tracing::info!(
            dsn = dataset_name,
            path = %output_file.display(),
            bytes = content.len(),
            "Dataset downloaded"
        );
        Ok(())
    }

    /// Write the text of a local file into a dataset.
    ///
    /// Fails with [`ZoweError::FileNotFound`] without sending anything when
    /// `input_file` is not an existing regular file.
    pub async fn upload_file_to_dsn(
        &self,
        input_file: impl AsRef<Path>,
        dataset_name: &str,
    ) -> Result<Value> {
        let input_file = input_file.as_ref();
        let is_file = tokio::fs::metadata(input_file)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(ZoweError::FileNotFound {
                path: input_file.display().to_string(),
            });
        }

        let contents = tokio::fs::read_to_string(input_file).await?;
        tracing::info!(
            dsn = dataset_name,
            path = %input_file.display(),
            bytes = contents.len(),
            "Uploading file to dataset"
        );
        self.write_to_dsn(dataset_name, &contents).await
    }

    /// Delete a sequential or partitioned dataset, optionally on a specific volume.
    pub async fn delete_dsn(&self, dataset_name: &str, volume: Option<&str>) -> Result<Value> {
        tracing::debug!(dsn = dataset_name, volume = ?volume, "Deleting dataset");
        let target = match volume {
            Some(volume) => format!(
                "/-({})/{}",
                encode_identifier(volume),
                encode_identifier(dataset_name)
            ),
            None => format!("/{}", encode_identifier(dataset_name)),
        };
        let mut request = self.api.create_custom_request_arguments(HttpMethod::Delete);
        request.url = self.url(&format!("ds{target}"));
        request.expected_codes = vec![204];
        self.api.perform(request).await
    }

    /// Allocate a sequential or partitioned dataset.
    ///
    /// Only options that are set go into the JSON body; the dataset name is
    /// carried in the URL.
    pub async fn allocate_dsn(
        &self,
        dataset_name: &str,
        options: &AllocationOptions,
    ) -> Result<Value> {
        tracing::debug!(dsn = dataset_name, ?options, "Allocating dataset");
        let mut request = self.api.create_custom_request_arguments(HttpMethod::Post);
        request.url = self.url(&format!("ds/{}", encode_identifier(dataset_name)));
        request.json = Some(options.to_payload()?);
        request.set_header(CONTENT_TYPE, "application/json");
        request.expected_codes = vec![201];
        self.api.perform(request).await
    }
}
