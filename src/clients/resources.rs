//! Resources endpoint client.

use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Value};

use crate::clients::{validate_id, validate_non_empty, validate_page, validate_per_page};
use crate::error_handling::ValidationError;
use crate::executor::{ApiResponse, Executor, RequestDescriptor};

// The remote exposes resources under "unknown"
const ENDPOINT: &str = "unknown";

/// Client for the resources endpoints.
#[derive(Debug, Clone)]
pub struct ResourcesClient {
    executor: Arc<Executor>,
}

impl ResourcesClient {
    /// Creates a resources client over a shared executor.
    pub fn new(executor: Arc<Executor>) -> Self {
        Self { executor }
    }

    /// Lists resources, optionally paginated.
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

    /// Fetches a single resource by id.
    pub async fn get(&self, resource_id: u64) -> Result<ApiResponse, ValidationError> {
        validate_id("resource_id", resource_id)?;
        let descriptor = RequestDescriptor::new(Method::GET, format!("{ENDPOINT}/{resource_id}"));
        Ok(self.executor.execute(descriptor).await)
    }

    /// Creates a resource.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a blank name, a year outside
    /// 1900..=2100, or a color that is not a `#RRGGBB` hex value.
    pub async fn create(
        &self,
        name: &str,
        year: u32,
        color: &str,
        pantone_value: &str,
    ) -> Result<ApiResponse, ValidationError> {
        validate_non_empty("name", name)?;
        validate_year(year)?;
        validate_color(color)?;
        validate_non_empty("pantone_value", pantone_value)?;
        let descriptor = RequestDescriptor::new(Method::POST, ENDPOINT).json(json!({
            "name": name,
            "year": year,
            "color": color,
            "pantone_value": pantone_value,
        }));
        Ok(self.executor.execute(descriptor).await)
    }

    /// Replaces resource fields with PUT.
    pub async fn update(
        &self,
        resource_id: u64,
        fields: Value,
    ) -> Result<ApiResponse, ValidationError> {
        validate_id("resource_id", resource_id)?;
        if !fields.is_object() {
            return Err(ValidationError::new("fields", "must be a JSON object"));
        }
        let descriptor =
            RequestDescriptor::new(Method::PUT, format!("{ENDPOINT}/{resource_id}")).json(fields);
        Ok(self.executor.execute(descriptor).await)
    }

    /// Deletes a resource by id.
    pub async fn delete(&self, resource_id: u64) -> Result<ApiResponse, ValidationError> {
        validate_id("resource_id", resource_id)?;
        let descriptor =
            RequestDescriptor::new(Method::DELETE, format!("{ENDPOINT}/{resource_id}"));
        Ok(self.executor.execute(descriptor).await)
    }
}

/// Validates a plausible catalog year.
fn validate_year(year: u32) -> Result<(), ValidationError> {
    if !(1900..=2100).contains(&year) {
        return Err(ValidationError::new(
            "year",
            format!("must be in 1900..=2100 (got {year})"),
        ));
    }
    Ok(())
}

/// Validates a `#RRGGBB` hex color value.
fn validate_color(color: &str) -> Result<(), ValidationError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(ValidationError::new(
            "color",
            format!("must be a #RRGGBB hex value (got {color:?})"),
        ));
    }
    Ok(())
}
