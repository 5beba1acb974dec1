//! Users endpoint client.

use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Map, Value};

use crate::clients::{validate_id, validate_non_empty, validate_page, validate_per_page};
use crate::error_handling::ValidationError;
use crate::executor::{ApiResponse, Executor, RequestDescriptor};

const ENDPOINT: &str = "users";

/// Client for the users resource.
///
/// Holds a reference to the shared executor; all retry, timing, and logging
/// behavior comes from there.
#[derive(Debug, Clone)]
pub struct UsersClient {
    executor: Arc<Executor>,
}

impl UsersClient {
    /// Creates a users client over a shared executor.
    pub fn new(executor: Arc<Executor>) -> Self {
        Self { executor }
    }

    /// Lists users, optionally paginated.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for `page < 1` or `per_page` outside
    /// `1..=100`, without making a network call.
    pub async fn list(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<ApiResponse, ValidationError> {
        let mut descriptor = RequestDescriptor::new(Method::GET, ENDPOINT);
        if let Some(page) = page {
            validate_page(page)?;
            descriptor = descriptor.query("page", page);
        }
        if let Some(per_page) = per_page {
            validate_per_page(per_page)?;
            descriptor = descriptor.query("per_page", per_page);
        }
        Ok(self.executor.execute(descriptor).await)
    }

    /// Lists users with a server-side artificial delay, for timing tests.
    pub async fn list_delayed(&self, delay_seconds: u32) -> Result<ApiResponse, ValidationError> {
        let descriptor =
            RequestDescriptor::new(Method::GET, ENDPOINT).query("delay", delay_seconds);
        Ok(self.executor.execute(descriptor).await)
    }

    /// Fetches a single user by id.
    pub async fn get(&self, user_id: u64) -> Result<ApiResponse, ValidationError> {
        validate_id("user_id", user_id)?;
        let descriptor = RequestDescriptor::new(Method::GET, format!("{ENDPOINT}/{user_id}"));
        Ok(self.executor.execute(descriptor).await)
    }

    /// Creates a user from a name and job title.
    pub async fn create(&self, name: &str, job: &str) -> Result<ApiResponse, ValidationError> {
        validate_non_empty("name", name)?;
        validate_non_empty("job", job)?;
        let descriptor = RequestDescriptor::new(Method::POST, ENDPOINT)
            .json(json!({"name": name, "job": job}));
        Ok(self.executor.execute(descriptor).await)
    }

    /// Replaces a user's fields with PUT.
    ///
    /// Only the supplied fields travel in the body, matching the remote's
    /// lenient full-update semantics.
    pub async fn update(
        &self,
        user_id: u64,
        name: Option<&str>,
        job: Option<&str>,
    ) -> Result<ApiResponse, ValidationError> {
        validate_id("user_id", user_id)?;
        let mut body = Map::new();
        if let Some(name) = name {
            validate_non_empty("name", name)?;
            body.insert("name".to_string(), json!(name));
        }
        if let Some(job) = job {
            validate_non_empty("job", job)?;
            body.insert("job".to_string(), json!(job));
        }
        let descriptor = RequestDescriptor::new(Method::PUT, format!("{ENDPOINT}/{user_id}"))
            .json(Value::Object(body));
        Ok(self.executor.execute(descriptor).await)
    }

    /// Partially updates a user with PATCH.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when `fields` is not a JSON object.
    pub async fn patch(
        &self,
        user_id: u64,
        fields: Value,
    ) -> Result<ApiResponse, ValidationError> {
        validate_id("user_id", user_id)?;
        if !fields.is_object() {
            return Err(ValidationError::new("fields", "must be a JSON object"));
        }
        let descriptor =
            RequestDescriptor::new(Method::PATCH, format!("{ENDPOINT}/{user_id}")).json(fields);
        Ok(self.executor.execute(descriptor).await)
    }

    /// Deletes a user by id.
    pub async fn delete(&self, user_id: u64) -> Result<ApiResponse, ValidationError> {
        validate_id("user_id", user_id)?;
        let descriptor = RequestDescriptor::new(Method::DELETE, format!("{ENDPOINT}/{user_id}"));
        Ok(self.executor.execute(descriptor).await)
    }
}
