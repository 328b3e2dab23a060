use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::config::ApiConfig;
use crate::wizard::SignupForm;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("server rejected the request: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout
        } else {
            ServiceError::Network(err.to_string())
        }
    }
}

/// The two network effects the wizard triggers at step boundaries.
/// The controller treats each as an opaque, at-most-once-per-invocation effect.
#[async_trait]
pub trait SignupService: Send + Sync {
    async fn send_verification_code(&self, email: &str) -> Result<(), ServiceError>;
    async fn complete_registration(&self, form: &SignupForm) -> Result<(), ServiceError>;
}

/// Simulates the platform with a fixed delay and no real traffic.
pub struct DemoService {
    delay: Duration,
}

impl DemoService {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(1000),
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for DemoService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignupService for DemoService {
    async fn send_verification_code(&self, email: &str) -> Result<(), ServiceError> {
        debug!("demo: pretending to send verification code to {email}");
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    async fn complete_registration(&self, form: &SignupForm) -> Result<(), ServiceError> {
        debug!("demo: pretending to register {}", form.email);
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Talks to the platform's auth endpoints.
pub struct ApiService {
    client: reqwest::Client,
    base_url: String,
}

impl ApiService {
    pub fn new(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn check(response: reqwest::Response) -> Result<(), ServiceError> {
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ServiceError::Rejected(format!("{status}: {body}")))
        }
    }
}

#[async_trait]
impl SignupService for ApiService {
    async fn send_verification_code(&self, email: &str) -> Result<(), ServiceError> {
        let url = format!("{}/api/auth/verification", self.base_url);
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;
        Self::check(response).await
    }

    async fn complete_registration(&self, form: &SignupForm) -> Result<(), ServiceError> {
        let url = format!("{}/api/auth/register", self.base_url);
        let response = self.client.post(url).json(form).send().await?;
        Self::check(response).await
    }
}

/// Create the appropriate service based on demo mode.
pub fn create_service(demo: bool, config: &ApiConfig) -> Arc<dyn SignupService> {
    if demo {
        Arc::new(DemoService::new())
    } else {
        Arc::new(ApiService::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_service_resolves() {
        let service = DemoService::with_delay(Duration::from_millis(1));
        assert!(service.send_verification_code("a@b.c").await.is_ok());
        assert!(
            service
                .complete_registration(&SignupForm::default())
                .await
                .is_ok()
        );
    }
}
