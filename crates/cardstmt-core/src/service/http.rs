//! HTTP client for the parsing service.

use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::error::{CardstmtError, ServiceError};
use crate::models::candidate::FilePayload;
use crate::models::config::ServiceConfig;
use crate::models::record::ExtractedRecord;

use super::{ParseService, interpret_response};

/// Name of the multipart part the service reads the document from.
pub const FILE_FIELD: &str = "file";

/// Uploads documents as `multipart/form-data` with a single file part.
#[derive(Debug, Clone)]
pub struct HttpParseService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpParseService {
    /// Create a client for the configured endpoint.
    pub fn new(config: &ServiceConfig) -> Result<Self, CardstmtError> {
        let client = with_timeout(reqwest::Client::builder(), config)
            .build()
            .map_err(|e| CardstmtError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn form_for<P: FilePayload>(&self, file: &P) -> Result<Form, ServiceError> {
        let content = file
            .read()
            .await
            .map_err(|e| ServiceError::Read(e.to_string()))?;
        debug!("Read {} bytes from {}", content.len(), file.name());

        let mut part = Part::bytes(content).file_name(file.name().to_string());
        if !file.media_type().is_empty() {
            part = part
                .mime_str(file.media_type())
                .map_err(|e| ServiceError::Read(e.to_string()))?;
        }

        Ok(Form::new().part(FILE_FIELD, part))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn with_timeout(builder: reqwest::ClientBuilder, config: &ServiceConfig) -> reqwest::ClientBuilder {
    match config.timeout() {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    }
}

// The fetch API has no client-wide timeout.
#[cfg(target_arch = "wasm32")]
fn with_timeout(builder: reqwest::ClientBuilder, _config: &ServiceConfig) -> reqwest::ClientBuilder {
    builder
}

impl ParseService for HttpParseService {
    async fn parse<P: FilePayload>(&self, file: &P) -> Result<ExtractedRecord, ServiceError> {
        let form = self.form_for(file).await?;

        info!("Uploading {} to {}", file.name(), self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        debug!("Service answered {} with {} bytes", status, body.len());

        interpret_response(status, &body)
    }
}
