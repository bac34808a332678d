//! Jina-compatible remote rerank endpoint.
//!
//! One batched POST per call. Any failure degrades that call only; the next
//! call tries the endpoint again.

use std::time::Duration;

use quarry_core::config::RerankConfig;
use quarry_core::errors::RerankError;
use serde::{Deserialize, Serialize};

use crate::strategy::RerankerStrategy;

#[derive(Serialize)]
struct RerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    top_n: usize,
    documents: &'a [&'a str],
}

#[derive(Deserialize)]
struct RerankResponse {
    results: Vec<RerankResult>,
}

#[derive(Deserialize)]
struct RerankResult {
    index: usize,
    relevance_score: f64,
}

/// Reranker that delegates scoring to an HTTP rerank service.
#[derive(Debug)]
pub struct RemoteApiReranker {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
    client: Option<reqwest::blocking::Client>,
}

impl RemoteApiReranker {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| tracing::warn!(error = %e, "rerank http client unavailable"))
            .ok();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout,
            client,
        }
    }

    /// Build from config, reading the API key from `config.api_key_env`.
    pub fn from_config(config: &RerankConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env).ok();
        if api_key.is_none() {
            tracing::warn!(
                env_var = %config.api_key_env,
                "rerank API key not set; remote reranking will degrade"
            );
        }
        Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn send(&self, query: &str, documents: &[&str]) -> Result<RerankResponse, RerankError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| RerankError::Unavailable {
            reason: "no API key configured".to_string(),
        })?;
        let client = self.client.as_ref().ok_or_else(|| RerankError::Unavailable {
            reason: "http client unavailable".to_string(),
        })?;

        let request = RerankRequest {
            model: &self.model,
            query,
            top_n: documents.len(),
            documents,
        };

        let response = client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RerankError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<RerankResponse>()
            .map_err(|e| RerankError::MalformedResponse {
                reason: e.to_string(),
            })
    }

    fn transport_error(&self, e: reqwest::Error) -> RerankError {
        if e.is_timeout() {
            RerankError::Timeout {
                elapsed_ms: self.timeout.as_millis() as u64,
            }
        } else {
            RerankError::Transport {
                reason: e.to_string(),
            }
        }
    }
}

/// Place each `(index, score)` pair back at its input position.
///
/// Every position must be scored exactly once.
fn scores_by_index(results: Vec<RerankResult>, expected: usize) -> Result<Vec<f64>, RerankError> {
    let mut scores: Vec<Option<f64>> = vec![None; expected];
    for result in results {
        let slot = scores
            .get_mut(result.index)
            .ok_or_else(|| RerankError::MalformedResponse {
                reason: format!("index {} out of range for {expected} documents", result.index),
            })?;
        if slot.replace(result.relevance_score).is_some() {
            return Err(RerankError::MalformedResponse {
                reason: format!("index {} scored twice", result.index),
            });
        }
    }

    let scored = scores.iter().filter(|s| s.is_some()).count();
    scores
        .into_iter()
        .collect::<Option<Vec<f64>>>()
        .ok_or(RerankError::ScoreCountMismatch {
            expected,
            actual: scored,
        })
}

impl RerankerStrategy for RemoteApiReranker {
    fn name(&self) -> &str {
        "remote_api"
    }

    fn score(&self, query: &str, documents: &[&str]) -> Result<Vec<f64>, RerankError> {
        let response = self.send(query, documents)?;
        scores_by_index(response.results, documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(index: usize, relevance_score: f64) -> RerankResult {
        RerankResult {
            index,
            relevance_score,
        }
    }

    #[test]
    fn results_are_reordered_by_index() {
        let scores = scores_by_index(vec![result(2, 0.9), result(0, 0.1), result(1, 0.5)], 3).unwrap();
        assert_eq!(scores, vec![0.1, 0.5, 0.9]);
    }

    #[test]
    fn out_of_range_index_is_malformed() {
        let err = scores_by_index(vec![result(3, 0.9)], 3).unwrap_err();
        assert!(matches!(err, RerankError::MalformedResponse { .. }));
    }

    #[test]
    fn missing_index_is_a_count_mismatch() {
        let err = scores_by_index(vec![result(0, 0.9)], 2).unwrap_err();
        assert!(matches!(
            err,
            RerankError::ScoreCountMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn duplicate_index_is_malformed() {
        let err = scores_by_index(vec![result(0, 0.9), result(0, 0.2)], 2).unwrap_err();
        assert!(matches!(err, RerankError::MalformedResponse { .. }));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let reranker = RemoteApiReranker::new(
            "http://127.0.0.1:9/rerank",
            "m",
            Some("  ".to_string()),
            Duration::from_millis(100),
        );
        assert!(matches!(
            reranker.score("q", &["a"]),
            Err(RerankError::Unavailable { .. })
        ));
    }
}
