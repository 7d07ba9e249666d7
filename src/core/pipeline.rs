use crate::core::codec::{decode_base64, inflate_payload};
use crate::core::document::{document_name, render_document};
use crate::core::link::LinkDeriver;
use crate::core::table::{read_rows, TableOptions};
use crate::domain::model::{FetchEnvelope, InputRow, OutputRecord};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::{Result, RowError, RowResult};
use crate::utils::validation::validate_output_name;
use reqwest::Client;

pub const CONFIG_FIELD: &str = "config_file";

/// Turns share-link rows into config documents, one row at a time.
pub struct SharePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
    links: LinkDeriver,
}

impl<S: Storage, C: ConfigProvider> SharePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let links = LinkDeriver::new(config.viewer_prefix(), config.api_prefix());

        Ok(Self {
            storage,
            config,
            client: builder.build()?,
            links,
        })
    }

    async fn fetch_envelope(&self, url: &str) -> RowResult<FetchEnvelope> {
        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RowError::fetch_failed(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(RowError::fetch_failed(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }

        response
            .json::<FetchEnvelope>()
            .await
            .map_err(|e| RowError::fetch_failed(format!("malformed envelope from {}: {}", url, e)))
    }
}

/// Decodes and inflates the envelope payload into JSON text.
pub fn unpack_payload(encoded: &str) -> RowResult<String> {
    let bytes = decode_base64(encoded)
        .map_err(|e| RowError::decompression_failed(format!("payload is not base64: {}", e)))?;
    tracing::debug!("Decoded {} compressed bytes", bytes.len());

    inflate_payload(&bytes)
        .into_result()
        .map_err(RowError::decompression_failed)
}

/// Parses inflated text and pulls out the config field, untouched.
pub fn extract_config(text: &str) -> RowResult<serde_json::Value> {
    let parsed: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| RowError::malformed_json(format!("payload is not valid JSON: {}", e)))?;

    match parsed {
        serde_json::Value::Object(mut fields) => fields
            .remove(CONFIG_FIELD)
            .ok_or_else(|| RowError::malformed_json(format!("payload has no '{}' field", CONFIG_FIELD))),
        other => Err(RowError::malformed_json(format!(
            "payload is a JSON {} rather than an object",
            json_type(&other)
        ))),
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SharePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<InputRow>> {
        let options = TableOptions {
            delimiter: self.config.delimiter(),
            has_headers: self.config.has_headers(),
        };
        read_rows(self.config.input_path(), options).await
    }

    async fn transform(&self, row: &InputRow) -> RowResult<OutputRecord> {
        let url = self.links.resolve(row.viewer_link.as_deref())?;
        validate_output_name(row.output_name.as_deref().unwrap_or_default())?;

        let envelope = self.fetch_envelope(&url).await?;
        let text = unpack_payload(&envelope.data)?;
        let config = extract_config(&text)?;

        Ok(OutputRecord {
            author: row.author.clone(),
            description: row.description.clone(),
            config,
        })
    }

    async fn load(&self, row: &InputRow, record: &OutputRecord) -> RowResult<String> {
        let name = row.output_name.as_deref().unwrap_or_default();
        validate_output_name(name)?;

        let document = render_document(record)
            .map_err(|e| RowError::write_failed(format!("could not render {}: {}", name, e)))?;
        let file_name = document_name(name);

        tracing::debug!("Writing {} ({} bytes)", file_name, document.len());
        self.storage
            .write_file(&file_name, document.as_bytes())
            .await
            .map_err(|e| RowError::write_failed(format!("could not write {}: {}", file_name, e)))?;

        Ok(self.storage.location(&file_name))
    }
}
