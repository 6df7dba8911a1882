//! # Solver HTTP Client
//!
//! Bridge to the external knot solver.
//!
//! One call, three outcomes:
//! - a decoded `SolveResponse`
//! - `SolverUnavailable` for transport failures and refused requests
//! - `MalformedResponse` for a 200 reply that cannot be decoded
//!
//! There is no retry; callers decide whether to submit again. Callers must
//! also keep at most one request in flight per design.

use crate::config::SolverConfig;
use kumihimo_core::solver::{SOLVE_PATH, TRANSPORT_FAILURE_MESSAGE};
use kumihimo_core::{KumihimoError, SolveRequest, SolveResponse, interpret_reply};

/// HTTP client for the solver service.
#[derive(Debug, Clone)]
pub struct SolverClient {
    http: reqwest::Client,
    base_url: String,
}

impl SolverClient {
    /// Create a client from solver settings.
    pub fn new(config: &SolverConfig) -> Result<Self, KumihimoError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| KumihimoError::ConfigError(format!("HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The solver base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the request to `{base_url}/generate-knot`.
    pub async fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, KumihimoError> {
        let url = format!("{}{}", self.base_url, SOLVE_PATH);
        tracing::debug!(
            "Submitting {} rows over {} strands to {}",
            request.target_pattern.len(),
            request.start_state.len(),
            url
        );

        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Self::transport_failure(&url, &e))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| Self::transport_failure(&url, &e))?;

        let result = interpret_reply(status, &body);
        if let Err(ref e) = result {
            tracing::warn!("Solver at {} answered {}: {}", url, status, e);
        }
        result
    }

    /// GET `{base_url}/health`; true when the solver answers 2xx.
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.http.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::debug!("Solver health check failed: {}", e);
                false
            }
        }
    }

    fn transport_failure(url: &str, e: &reqwest::Error) -> KumihimoError {
        tracing::warn!("Solver request to {} failed: {}", url, e);
        KumihimoError::SolverUnavailable(TRANSPORT_FAILURE_MESSAGE.to_string())
    }
}
