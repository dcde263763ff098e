// src/logging/client.rs - Client for the remote structured log endpoint
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::LogApiConfig;
use crate::errors::AppError;

/// Originating stack reported with every event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStack {
    Frontend,
    Backend,
}

/// Severity of a reported event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Application area an event is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogPackage {
    Api,
    Component,
    Hook,
    Page,
    State,
    Style,
}

// Wire format expected by the log endpoint
#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    stack: LogStack,
    level: LogLevel,
    package: LogPackage,
    message: &'a str,
}

/// Acknowledgement returned by the log endpoint
#[derive(Debug, Deserialize)]
pub struct LogResponse {
    #[serde(rename = "logID")]
    pub log_id: String,
    pub message: String,
}

// One-shot POST client: no retry, no batching. Failures never reach the
// caller; they are reported on the local logger only.
pub struct LogClient {
    http: Client,
    endpoint: Option<String>,
    token: Option<String>,
}

impl LogClient {
    pub fn new(config: &LogApiConfig) -> Self {
        if config.url.is_none() {
            debug!("LOG_API_URL not set, remote logging disabled");
        }

        Self {
            http: Client::new(),
            endpoint: config.url.clone(),
            token: config.token.clone(),
        }
    }

    /// Whether a log endpoint is configured
    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Posts one structured event to the log endpoint. Returns the endpoint's
    /// acknowledgement, or `None` when the client is disabled or the call
    /// failed in any way.
    pub async fn log(
        &self,
        stack: LogStack,
        level: LogLevel,
        package: LogPackage,
        message: &str,
    ) -> Option<LogResponse> {
        let endpoint = self.endpoint.as_deref()?;

        let entry = LogEntry {
            stack,
            level,
            package,
            message,
        };

        match self.send(endpoint, &entry).await {
            Ok(response) => {
                debug!("Log entry accepted: {}", response.log_id);
                Some(response)
            }
            Err(e) => {
                error!("Error sending log: {}", e);
                None
            }
        }
    }

    async fn send(&self, endpoint: &str, entry: &LogEntry<'_>) -> Result<LogResponse, AppError> {
        let mut request = self.http.post(endpoint).json(entry);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Logger(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Logger(format!(
                "Logging failed: {} {}",
                status, body
            )));
        }

        response
            .json::<LogResponse>()
            .await
            .map_err(|e| AppError::Logger(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_log_entry_wire_format() {
        let entry = LogEntry {
            stack: LogStack::Frontend,
            level: LogLevel::Warn,
            package: LogPackage::Component,
            message: "Validation failed on URL Shortener form submit.",
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "stack": "frontend",
                "level": "warn",
                "package": "component",
                "message": "Validation failed on URL Shortener form submit.",
            })
        );
    }

    #[test]
    fn test_log_response_reads_log_id_field() {
        let response: LogResponse = serde_json::from_value(json!({
            "logID": "0192-abc",
            "message": "log created successfully",
        }))
        .unwrap();

        assert_eq!(response.log_id, "0192-abc");
        assert_eq!(response.message, "log created successfully");
    }

    #[tokio::test]
    async fn test_disabled_client_is_a_no_op() {
        let client = LogClient::new(&LogApiConfig {
            url: None,
            token: None,
        });

        assert!(!client.is_enabled());

        let ack = client
            .log(
                LogStack::Frontend,
                LogLevel::Info,
                LogPackage::Component,
                "ignored",
            )
            .await;
        assert!(ack.is_none());
    }
}
