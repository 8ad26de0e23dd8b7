//! Request helper: one authenticated call to the API, with response
//! classification and bounded retry on timeout.
//!
//! ## Retry Strategy
//!
//! Only connect/read timeouts are retried. The wait grows linearly with the
//! attempt number (`retry_backoff × attempt`): with the default 5 s unit and
//! three attempts the sequence is 5 s → 10 s, then the call gives up.
//! Connection failures, 5xx responses and every other transport error are
//! terminal on the first occurrence.
//!
//! ## Classification
//!
//! 4xx responses are *returned*, not raised: the caller gets the status and
//! whatever JSON the service sent (except for 401, whose body is dropped) and
//! decides what to do with it. [`ApiResponse::error`] maps them onto the typed
//! errors when the caller wants to surface one. 5xx responses escalate to
//! [`AnyPdfError::ServerError`].

use crate::config::ClientConfig;
use crate::error::AnyPdfError;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// A file attached to a multipart request.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Multipart field name.
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// A PDF under the `file` field, as every upload endpoint expects.
    pub fn pdf(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: "file".to_string(),
            file_name: file_name.into(),
            mime: "application/pdf".to_string(),
            bytes,
        }
    }
}

/// Optional request payload: one file, text form fields, query parameters.
///
/// When a file is present the form fields travel in the same multipart body;
/// otherwise they are sent url-encoded.
#[derive(Debug, Clone, Default)]
pub struct Payload {
    pub file: Option<UploadFile>,
    pub form: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl Payload {
    pub fn with_file(mut self, file: UploadFile) -> Self {
        self.file = Some(file);
        self
    }

    pub fn with_form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Multipart forms are single-use, so a fresh one is built per attempt.
    fn multipart(&self) -> Result<Option<Form>, reqwest::Error> {
        let Some(file) = &self.file else {
            return Ok(None);
        };
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime)?;
        let mut form = Form::new().part(file.field.clone(), part);
        for (k, v) in &self.form {
            form = form.text(k.clone(), v.clone());
        }
        Ok(Some(form))
    }
}

/// A response the helper hands back to its caller: 2xx/3xx, or a 4xx it
/// classified but did not raise.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body; `None` when the body was not JSON, was `null`, or the
    /// status was 401.
    pub body: Option<Value>,
    /// Raw response text, kept for diagnostics only.
    pub raw: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// String field of the JSON body, if present and non-empty.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// The service's `message` field, or the start of the raw text.
    pub fn message(&self) -> String {
        match self.body.as_ref().and_then(|b| b.get("message")) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None if self.body.is_some() => "None".to_string(),
            Some(other) => other.to_string(),
            None => excerpt(&self.raw, 100),
        }
    }

    /// Body rendered for an error message.
    pub fn detail(&self) -> String {
        self.body
            .as_ref()
            .map_or_else(|| "No response data".to_string(), Value::to_string)
    }

    /// Typed error for a 4xx response, `None` for anything else.
    pub fn error(&self) -> Option<AnyPdfError> {
        match self.status {
            401 => Some(AnyPdfError::Unauthorized),
            403 => Some(AnyPdfError::Forbidden {
                message: self.message(),
            }),
            429 => Some(AnyPdfError::RateLimited {
                message: self.message(),
            }),
            400..=499 => Some(AnyPdfError::ClientError {
                status: self.status,
                message: self.message(),
            }),
            _ => None,
        }
    }
}

/// Wait before retrying after timed-out attempt number `attempt` (1-based).
pub fn retry_delay(unit: Duration, attempt: u32) -> Duration {
    unit * attempt
}

/// Authenticated client for the API endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AnyPdfError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()
            .map_err(|e| AnyPdfError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Perform one logical call, retrying timed-out attempts.
    ///
    /// `Ok` carries every response with a status below 500. `Err` stands for
    /// "no usable response": timeouts after the last attempt, connection
    /// failures, 5xx, and other transport errors.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        payload: &Payload,
    ) -> Result<ApiResponse, AnyPdfError> {
        let url = self.config.endpoint_url(endpoint);
        let max_attempts = self.config.max_attempts;
        let mut attempt = 1;

        loop {
            info!(
                "Sending {} request to {} (Attempt {}/{})",
                method, url, attempt, max_attempts
            );
            log_payload(payload);

            match self.send_once(method.clone(), &url, payload).await {
                Ok((status, text)) => return classify(&url, status, text),
                Err(e) if e.is_timeout() => {
                    error!("Request timed out: {}", e);
                    if attempt < max_attempts {
                        let wait = retry_delay(self.config.retry_backoff, attempt);
                        info!("Retrying in {} seconds...", wait.as_secs_f64());
                        sleep(wait).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(AnyPdfError::Timeout {
                        url,
                        attempts: attempt,
                    });
                }
                Err(e) if e.is_connect() => {
                    error!("Connection error occurred: {}", e);
                    return Err(AnyPdfError::Transport {
                        url,
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    error!("An unexpected error occurred with the request: {}", e);
                    return Err(AnyPdfError::Transport {
                        url,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    /// One HTTP exchange, body included, so read timeouts on the body count
    /// as timeouts of the attempt.
    async fn send_once(
        &self,
        method: Method,
        url: &str,
        payload: &Payload,
    ) -> Result<(u16, String), reqwest::Error> {
        let mut builder = self
            .http
            .request(method, url)
            .header("X-RapidAPI-Key", &self.config.api_key)
            .header("X-RapidAPI-Host", &self.config.rapidapi_host);

        if !payload.query.is_empty() {
            builder = builder.query(&payload.query);
        }
        builder = match payload.multipart()? {
            Some(form) => builder.multipart(form),
            None if !payload.form.is_empty() => builder.form(&payload.form),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        info!("Response Status Code: {}", status);
        let text = response.text().await?;
        Ok((status, text))
    }
}

fn log_payload(payload: &Payload) {
    if !payload.form.is_empty() {
        debug!("Form data: {:?}", payload.form);
    }
    if let Some(file) = &payload.file {
        debug!("Files: [({:?}, {:?})]", file.field, file.file_name);
    }
    if !payload.query.is_empty() {
        debug!("URL Parameters: {:?}", payload.query);
    }
}

/// Map a received response onto the helper's contract.
fn classify(url: &str, status: u16, raw: String) -> Result<ApiResponse, AnyPdfError> {
    let body = match serde_json::from_str::<Value>(&raw) {
        Ok(v) => {
            debug!("Response JSON: {}", v);
            Some(v).filter(|v| !v.is_null())
        }
        Err(_) => {
            warn!("Response was not JSON. Response Text: {}...", excerpt(&raw, 200));
            None
        }
    };
    let response = ApiResponse { status, body, raw };

    match status {
        401 => {
            error!("ERROR: Unauthorized (401). Your RapidAPI Key is invalid or missing.");
            Ok(ApiResponse {
                body: None,
                ..response
            })
        }
        403 => {
            error!(
                "ERROR: Forbidden (403). You might not have access to this tier/endpoint, or your quota is exceeded. Message: {}",
                response.message()
            );
            Ok(response)
        }
        429 => {
            error!(
                "ERROR: Too Many Requests (429). You have exceeded your rate limit. Message: {}",
                response.message()
            );
            Ok(response)
        }
        400..=499 => {
            error!(
                "ERROR: Client Error ({}). Message: {}",
                status,
                response.message()
            );
            Ok(response)
        }
        500..=599 => {
            error!("HTTP Server Error occurred: {} for url: {}", status, url);
            Err(AnyPdfError::ServerError {
                url: url.to_string(),
                status,
            })
        }
        _ => Ok(response),
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
