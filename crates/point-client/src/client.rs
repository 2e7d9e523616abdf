//! Point service HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{AmountRequest, ApiErrorResponse, HistoryResponse, PointResponse};

/// Point service API client.
#[derive(Debug, Clone)]
pub struct PointClient {
    client: Client,
    base_url: String,
}

impl PointClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the point service (e.g., `"http://point-service:8080"`)
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Get a user's current balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_point(&self, user_id: i64) -> Result<PointResponse, ClientError> {
        let url = format!("{}/point/{user_id}", self.base_url);

        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Get a user's history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_histories(&self, user_id: i64) -> Result<Vec<HistoryResponse>, ClientError> {
        let url = format!("{}/point/{user_id}/histories", self.base_url);

        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Charge points to a user.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::BalanceCeilingExceeded` if the charge would pass
    /// the ceiling, or another error if the request fails.
    pub async fn charge(&self, user_id: i64, amount: i64) -> Result<PointResponse, ClientError> {
        self.patch_amount(user_id, "charge", amount).await
    }

    /// Use points from a user.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InsufficientBalance` if the balance is too low,
    /// or another error if the request fails.
    pub async fn use_points(
        &self,
        user_id: i64,
        amount: i64,
    ) -> Result<PointResponse, ClientError> {
        self.patch_amount(user_id, "use", amount).await
    }

    async fn patch_amount(
        &self,
        user_id: i64,
        action: &str,
        amount: i64,
    ) -> Result<PointResponse, ClientError> {
        let url = format!("{}/point/{user_id}/{action}", self.base_url);
        tracing::debug!(user_id, action, amount, "Sending point request");

        let response = self
            .client
            .patch(&url)
            .json(&AmountRequest { amount })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let body = api_error.error;

                // Map specific error codes to typed errors
                match body.code.as_str() {
                    "invalid_identity" => Err(ClientError::InvalidIdentity {
                        message: body.message,
                    }),
                    "invalid_amount" => Err(ClientError::InvalidAmount {
                        message: body.message,
                    }),
                    "balance_ceiling_exceeded" => Err(ClientError::BalanceCeilingExceeded {
                        balance: body.detail_i64("balance"),
                        amount: body.detail_i64("amount"),
                        max: body.detail_i64("max"),
                    }),
                    "insufficient_balance" => Err(ClientError::InsufficientBalance {
                        balance: body.detail_i64("balance"),
                        required: body.detail_i64("required"),
                    }),
                    _ => Err(ClientError::Api {
                        code: body.code,
                        message: body.message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}
