//! Authentication endpoint client.

use std::sync::Arc;

use reqwest::Method;
use serde_json::json;

use crate::clients::{validate_email, validate_non_empty};
use crate::error_handling::ValidationError;
use crate::executor::{ApiResponse, Executor, RequestDescriptor};

/// Client for the register/login/logout endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    executor: Arc<Executor>,
}

impl AuthClient {
    /// Creates an auth client over a shared executor.
    pub fn new(executor: Arc<Executor>) -> Self {
        Self { executor }
    }

    /// Registers a new account.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse, ValidationError> {
        validate_email(email)?;
        validate_non_empty("password", password)?;
        let descriptor = RequestDescriptor::new(Method::POST, "register")
            .json(json!({"email": email, "password": password}));
        Ok(self.executor.execute(descriptor).await)
    }

    /// Registers with only partial credentials, for negative tests.
    ///
    /// Skips local validation on purpose: the point is to observe the
    /// remote's 400 response, which the envelope reports uniformly.
    pub async fn register_incomplete(&self, email: Option<&str>) -> ApiResponse {
        let mut body = json!({});
        if let Some(email) = email {
            body["email"] = json!(email);
        }
        let descriptor = RequestDescriptor::new(Method::POST, "register").json(body);
        self.executor.execute(descriptor).await
    }

    /// Logs in and returns the envelope carrying the token.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse, ValidationError> {
        validate_email(email)?;
        validate_non_empty("password", password)?;
        let descriptor = RequestDescriptor::new(Method::POST, "login")
            .json(json!({"email": email, "password": password}));
        Ok(self.executor.execute(descriptor).await)
    }

    /// Logs out, sending the bearer token when supplied.
    pub async fn logout(&self, token: Option<&str>) -> ApiResponse {
        let mut descriptor = RequestDescriptor::new(Method::POST, "logout");
        if let Some(token) = token {
            descriptor = descriptor.header("Authorization", format!("Bearer {token}"));
        }
        self.executor.execute(descriptor).await
    }
}
