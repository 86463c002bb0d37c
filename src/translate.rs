//! Remote translation orchestrator.
//!
//! Talks to a MyMemory-style endpoint (`GET ?q=<text>&langpair=<src>|<dst>`)
//! and fills in every target language for one source string. Requests are
//! dispatched in concurrent batches; a failing language never aborts the
//! operation, its result falls back to the source text.

use std::collections::HashMap;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use serde::Deserialize;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::lang::{self, CustomLanguage, LanguageInfo};
use crate::retry::{with_retry_if, RetryConfig};

/// Requests dispatched concurrently per batch.
pub const BATCH_SIZE: usize = 10;

/// Pause between batches to avoid bursting the remote endpoint.
const BATCH_DELAY: Duration = Duration::from_millis(150);

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("translation API rejected the request: {0}")]
    Api(String),
}

impl TranslateError {
    /// Transient failures are worth retrying; deterministic rejections
    /// (client errors, API-level failures) are not.
    fn is_retryable(&self) -> bool {
        match self {
            TranslateError::Http(_) => true,
            TranslateError::Status(status) => {
                *status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            TranslateError::Api(_) => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(rename = "responseStatus")]
    response_status: i64,
    #[serde(rename = "responseData", default)]
    response_data: Option<ApiResponseData>,
    #[serde(rename = "responseDetails", default)]
    response_details: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponseData {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Inputs for one [`Translator::translate_all`] call.
pub struct TranslateOptions<'a> {
    /// Language the text is authored in
    pub source_language: &'a str,
    /// Languages to produce (the source language is skipped if present)
    pub target_languages: &'a [String],
    /// Registry overrides used to resolve API locale codes
    pub custom_languages: Option<&'a HashMap<String, CustomLanguage>>,
}

pub struct Translator {
    client: reqwest::Client,
    api_url: String,
    retry: RetryConfig,
}

impl Translator {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            retry: RetryConfig::translation_request(),
        }
    }

    /// Override the per-request retry policy (tests use
    /// [`RetryConfig::no_retry`]).
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Translate one string between two resolved languages.
    ///
    /// Success requires a 2xx HTTP status and a body with
    /// `responseStatus == 200`; anything else is an error. Transient
    /// failures are retried per the configured policy.
    pub async fn translate_text(
        &self,
        text: &str,
        source: &LanguageInfo,
        target: &LanguageInfo,
    ) -> Result<String, TranslateError> {
        let langpair = format!("{}|{}", source.api_code, target.api_code);

        with_retry_if(
            &self.retry,
            &format!("Translation to {}", target.code),
            || async {
                let response = self
                    .client
                    .get(&self.api_url)
                    .query(&[("q", text), ("langpair", langpair.as_str())])
                    .send()
                    .await?;

                if !response.status().is_success() {
                    return Err(TranslateError::Status(response.status()));
                }

                let body: ApiResponse = response.json().await?;
                if body.response_status != 200 {
                    return Err(TranslateError::Api(body.response_details.unwrap_or_else(
                        || format!("response status {}", body.response_status),
                    )));
                }

                body.response_data
                    .map(|data| data.translated_text)
                    .ok_or_else(|| TranslateError::Api("response carried no translation".into()))
            },
            TranslateError::is_retryable,
        )
        .await
    }

    /// Fill in every target language for one source string.
    ///
    /// The result always contains the source language mapped to
    /// `source_text`. Remaining targets are dispatched in batches of
    /// [`BATCH_SIZE`] concurrent requests with a short pause between
    /// batches. A language whose request fails falls back to the source
    /// text; the failure is logged, never raised.
    ///
    /// `on_progress(lang, completed, total)` fires after every completed
    /// request (success or fallback); `completed` increases monotonically
    /// across the whole call. Completion order within a batch is
    /// unspecified.
    pub async fn translate_all<F>(
        &self,
        source_text: &str,
        opts: &TranslateOptions<'_>,
        mut on_progress: F,
    ) -> HashMap<String, String>
    where
        F: FnMut(&str, usize, usize),
    {
        let mut result = HashMap::new();
        result.insert(opts.source_language.to_string(), source_text.to_string());

        let targets: Vec<&String> = opts
            .target_languages
            .iter()
            .filter(|code| code.as_str() != opts.source_language)
            .collect();
        if targets.is_empty() {
            return result;
        }

        let total = targets.len();
        let source_info = lang::resolve(opts.source_language, opts.custom_languages);
        let mut completed = 0usize;

        for (batch_idx, batch) in targets.chunks(BATCH_SIZE).enumerate() {
            if batch_idx > 0 {
                sleep(BATCH_DELAY).await;
            }
            debug!(
                "Dispatching translation batch {} ({} languages)",
                batch_idx + 1,
                batch.len()
            );

            let source_info = &source_info;
            let mut inflight: FuturesUnordered<_> = batch
                .iter()
                .map(|code| {
                    let target_info = lang::resolve(code.as_str(), opts.custom_languages);
                    async move {
                        let outcome = self
                            .translate_text(source_text, source_info, &target_info)
                            .await;
                        ((*code).clone(), outcome)
                    }
                })
                .collect();

            while let Some((code, outcome)) = inflight.next().await {
                completed += 1;
                let text = match outcome {
                    Ok(text) => text,
                    Err(err) => {
                        warn!("Falling back to source text for {}: {}", code, err);
                        source_text.to_string()
                    }
                };
                result.insert(code.clone(), text);
                on_progress(&code, completed, total);
            }
        }

        result
    }
}
