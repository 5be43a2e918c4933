//! HTTP retry helpers for transient errors.
//!
//! Connection failures, timeouts, HTTP 429 and 5xx are retried with
//! exponential backoff. Other 4xx statuses are permanent. A body that is
//! cut off mid-read or does not parse as JSON triggers a full re-fetch,
//! since large `GeoJSON` responses are occasionally truncated.

use std::time::Duration;

use crate::SourceError;

/// Maximum retry attempts for transient HTTP errors (2s, 4s, 8s, 16s, 32s).
const MAX_RETRIES: u32 = 5;

/// Maximum full re-fetches when the body cannot be decoded.
const MAX_BODY_RETRIES: u32 = 2;

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 500;

/// Sends the request built by `build_request` and parses the body as JSON.
///
/// The closure is called on every attempt because a
/// [`reqwest::RequestBuilder`] is consumed by `.send()`.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails after all retries, the
/// server returns a non-retryable status, or the body still cannot be read
/// or parsed after all re-fetches.
#[allow(clippy::future_not_send)]
pub async fn send_json<F>(build_request: F) -> Result<serde_json::Value, SourceError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut body_attempt = 0;

    loop {
        let response = send_inner(&build_request, MAX_RETRIES).await?;
        let url = response.url().to_string();
        let status = response.status();

        let failure = match response.text().await {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(value) => return Ok(value),
                Err(error) => BodyFailure::Parse { error, text },
            },
            Err(error) => BodyFailure::Read(error),
        };

        if body_attempt >= MAX_BODY_RETRIES {
            log::error!(
                "Unusable body after {MAX_BODY_RETRIES} retries, giving up.\n  \
                 url: {url}\n  \
                 {failure}"
            );
            return Err(failure.into());
        }

        body_attempt += 1;
        let delay = Duration::from_secs(1u64 << body_attempt);
        log::warn!(
            "Unusable body (body retry {body_attempt}/{MAX_BODY_RETRIES}), \
             re-fetching in {delay:?}...\n  \
             url: {url}\n  \
             status: {status}\n  \
             {failure}"
        );
        tokio::time::sleep(delay).await;
    }
}

/// Why a successful response's body could not be used.
enum BodyFailure {
    /// The connection dropped or the body was cut short.
    Read(reqwest::Error),
    /// The body arrived but is not JSON.
    Parse {
        error: serde_json::Error,
        text: String,
    },
}

impl std::fmt::Display for BodyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(error) => write!(f, "read error: {error}"),
            Self::Parse { error, text } => write!(
                f,
                "received: {} bytes\n  parse error: {error}\n  body preview: {}",
                text.len(),
                preview(text)
            ),
        }
    }
}

impl From<BodyFailure> for SourceError {
    fn from(failure: BodyFailure) -> Self {
        match failure {
            BodyFailure::Read(error) => Self::Http(error),
            BodyFailure::Parse { error, .. } => Self::Json(error),
        }
    }
}

/// Core retry loop. Returns the first 2xx/3xx response.
#[allow(clippy::future_not_send)]
async fn send_inner<F>(build_request: &F, max_retries: u32) -> Result<reqwest::Response, SourceError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            let delay = Duration::from_secs(1u64 << attempt);
            log::warn!("  retry {attempt}/{max_retries} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        match build_request().send().await {
            Err(e) if is_transient(&e) && attempt < max_retries => {
                log::warn!("  transient error: {e}");
            }
            Err(e) => return Err(SourceError::Http(e)),
            Ok(response) => {
                let status = response.status();
                if !is_retryable_status(status) && !status.is_client_error() {
                    return Ok(response);
                }
                if is_retryable_status(status) && attempt < max_retries {
                    log::warn!("  HTTP {status}");
                } else {
                    return Err(SourceError::Status {
                        url: response.url().to_string(),
                        status,
                    });
                }
            }
        }

        attempt += 1;
    }
}

/// 429 and 5xx are worth retrying; everything else is final.
fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_decode() || e.is_request()
}

fn preview(text: &str) -> &str {
    if text.len() <= BODY_PREVIEW_LEN {
        return text;
    }
    let mut end = BODY_PREVIEW_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
