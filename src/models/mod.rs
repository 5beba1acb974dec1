//! Response schema models.
//!
//! Serde models for the remote API's response shapes, with structural
//! checks layered on top. These are the schema-validation collaborators:
//! they consume a response envelope's body and either confirm it matches
//! the expected structure or report the mismatch as a [`SchemaError`],
//! never a panic.
//!
//! # Example
//!
//! ```no_run
//! use api_harness::models::{self, UsersListResponse};
//! # fn check(body: &serde_json::Value) -> Result<(), api_harness::models::SchemaError> {
//! let page: UsersListResponse = models::parse(body)?;
//! assert!(page.data.iter().all(|u| u.id > 0));
//! # Ok(())
//! # }
//! ```

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// A structural mismatch between a response body and its expected schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The body does not deserialize into the expected shape.
    #[error("Structural mismatch: {0}")]
    Shape(#[from] serde_json::Error),

    /// The body deserialized but violated a field constraint.
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// A model that can verify its own field constraints after deserialization.
pub trait Validate {
    /// Checks field-level constraints, returning the first violation.
    fn validate(&self) -> Result<(), SchemaError>;
}

/// Deserializes and validates an envelope body against a model.
pub fn parse<T: DeserializeOwned + Validate>(body: &Value) -> Result<T, SchemaError> {
    let model: T = serde_json::from_value(body.clone())?;
    model.validate()?;
    Ok(model)
}

fn constraint(message: impl Into<String>) -> SchemaError {
    SchemaError::Constraint(message.into())
}

/// Support banner attached to every list/detail response.
#[derive(Debug, Clone, Deserialize)]
pub struct Support {
    /// Link to the support page.
    pub url: String,
    /// Support blurb.
    pub text: String,
}

/// A user record.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Positive numeric identifier.
    pub id: u64,
    /// Contact email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Avatar image URL.
    pub avatar: String,
}

impl Validate for User {
    fn validate(&self) -> Result<(), SchemaError> {
        if self.id == 0 {
            return Err(constraint("user id must be positive"));
        }
        if !self.email.contains('@') {
            return Err(constraint(format!("malformed email {:?}", self.email)));
        }
        Ok(())
    }
}

/// Pagination fields shared by the list responses.
fn validate_pagination(
    page: u64,
    per_page: u64,
    total_pages: u64,
) -> Result<(), SchemaError> {
    if page == 0 {
        return Err(constraint("page must be >= 1"));
    }
    if per_page == 0 {
        return Err(constraint("per_page must be >= 1"));
    }
    let _ = total_pages;
    Ok(())
}

/// A page of users.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersListResponse {
    /// 1-based page number.
    pub page: u64,
    /// Page size.
    pub per_page: u64,
    /// Total records.
    pub total: u64,
    /// Total pages at this page size.
    pub total_pages: u64,
    /// The page of user records.
    pub data: Vec<User>,
    /// Support banner.
    pub support: Support,
}

impl Validate for UsersListResponse {
    fn validate(&self) -> Result<(), SchemaError> {
        validate_pagination(self.page, self.per_page, self.total_pages)?;
        for user in &self.data {
            user.validate()?;
        }
        Ok(())
    }
}

/// A single-user detail response.
#[derive(Debug, Clone, Deserialize)]
pub struct SingleUserResponse {
    /// The user record.
    pub data: User,
    /// Support banner.
    pub support: Support,
}

impl Validate for SingleUserResponse {
    fn validate(&self) -> Result<(), SchemaError> {
        self.data.validate()
    }
}

/// Response to a user-creation request.
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreateResponse {
    /// Echoed name.
    pub name: String,
    /// Echoed job title.
    pub job: String,
    /// Server-assigned identifier (stringly typed by the remote).
    pub id: String,
    /// ISO 8601 creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Validate for UserCreateResponse {
    fn validate(&self) -> Result<(), SchemaError> {
        if self.id.trim().is_empty() {
            return Err(constraint("created user id must not be empty"));
        }
        Ok(())
    }
}

/// Response to a user update (PUT or PATCH).
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdateResponse {
    /// Echoed name, when sent.
    pub name: Option<String>,
    /// Echoed job title, when sent.
    pub job: Option<String>,
    /// ISO 8601 update timestamp.
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl Validate for UserUpdateResponse {
    fn validate(&self) -> Result<(), SchemaError> {
        if self.updated_at.trim().is_empty() {
            return Err(constraint("updatedAt must not be empty"));
        }
        Ok(())
    }
}

/// A catalog resource record.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    /// Positive numeric identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Catalog year.
    pub year: u32,
    /// `#RRGGBB` color value.
    pub color: String,
    /// Pantone catalog code.
    pub pantone_value: String,
}

impl Validate for Resource {
    fn validate(&self) -> Result<(), SchemaError> {
        if self.id == 0 {
            return Err(constraint("resource id must be positive"));
        }
        if !(1900..=2100).contains(&self.year) {
            return Err(constraint(format!("year {} out of range", self.year)));
        }
        let hex = self.color.len() == 7
            && self.color.starts_with('#')
            && self.color[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !hex {
            return Err(constraint(format!("color {:?} is not #RRGGBB", self.color)));
        }
        Ok(())
    }
}

/// A page of resources.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourcesListResponse {
    /// 1-based page number.
    pub page: u64,
    /// Page size.
    pub per_page: u64,
    /// Total records.
    pub total: u64,
    /// Total pages at this page size.
    pub total_pages: u64,
    /// The page of resource records.
    pub data: Vec<Resource>,
    /// Support banner.
    pub support: Support,
}

impl Validate for ResourcesListResponse {
    fn validate(&self) -> Result<(), SchemaError> {
        validate_pagination(self.page, self.per_page, self.total_pages)?;
        for resource in &self.data {
            resource.validate()?;
        }
        Ok(())
    }
}

/// A single-resource detail response.
#[derive(Debug, Clone, Deserialize)]
pub struct SingleResourceResponse {
    /// The resource record.
    pub data: Resource,
    /// Support banner.
    pub support: Support,
}

impl Validate for SingleResourceResponse {
    fn validate(&self) -> Result<(), SchemaError> {
        self.data.validate()
    }
}

/// Response to a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The bearer token.
    pub token: String,
}

impl Validate for TokenResponse {
    fn validate(&self) -> Result<(), SchemaError> {
        if self.token.trim().is_empty() {
            return Err(constraint("token must not be empty"));
        }
        Ok(())
    }
}

/// Response to a successful registration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    /// Identifier of the new account.
    pub id: u64,
    /// The bearer token.
    pub token: String,
}

impl Validate for RegisterResponse {
    fn validate(&self) -> Result<(), SchemaError> {
        if self.token.trim().is_empty() {
            return Err(constraint("token must not be empty"));
        }
        Ok(())
    }
}
