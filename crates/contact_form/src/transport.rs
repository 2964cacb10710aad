use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::form::{Field, FormFields};
use thiserror::Error;
use tracing::info;
use url::Url;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("form endpoint unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("form endpoint rejected submission with status {status}")]
    Rejected { status: u16 },
}

/// Delivers one validated form to the external endpoint.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(&self, fields: &FormFields) -> Result<(), SubmissionError>;
}

/// Endpoint-side parameter names the three fields are posted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormKeys {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Default for FormKeys {
    fn default() -> Self {
        Self {
            name: Field::Name.as_str().to_string(),
            email: Field::Email.as_str().to_string(),
            message: Field::Message.as_str().to_string(),
        }
    }
}

impl FormKeys {
    pub fn key(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }
}

pub struct FormPostTransport {
    http: Client,
    endpoint: Url,
    keys: FormKeys,
}

impl FormPostTransport {
    pub fn new(endpoint: Url, keys: FormKeys, timeout: Duration) -> Result<Self, SubmissionError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SubmissionError::Client)?;
        Ok(Self {
            http,
            endpoint,
            keys,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn encode<'a>(&'a self, fields: &'a FormFields) -> Vec<(&'a str, &'a str)> {
        Field::ALL
            .into_iter()
            .map(|field| (self.keys.key(field), fields.get(field)))
            .collect()
    }
}

#[async_trait]
impl SubmissionTransport for FormPostTransport {
    async fn submit(&self, fields: &FormFields) -> Result<(), SubmissionError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .form(&self.encode(fields))
            .send()
            .await
            .map_err(SubmissionError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
            });
        }

        info!(
            endpoint = %self.endpoint,
            status = status.as_u16(),
            "contact: form accepted by endpoint"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
