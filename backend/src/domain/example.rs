//! Example record and its create/update inputs.
//!
//! ## Invariants
//! - [`ExampleId`] values are produced only by a store's allocation counter
//!   and are never reassigned.
//! - `created_at <= updated_at` for every [`Example`].
//! - [`ExampleName`] holds 1 to [`ExampleName::MAX_CHARS`] characters.
//! - [`Price`] is finite and strictly positive.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};

/// Prefix shared by every generated example identifier.
pub const EXAMPLE_ID_PREFIX: &str = "example-";

/// Validation failures for example fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExampleValidationError {
    /// The name was empty.
    #[error("name is required")]
    EmptyName,
    /// The name exceeded the maximum length.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Maximum accepted number of characters.
        max: usize,
    },
    /// The price was zero, negative, or not a finite number.
    #[error("price must be a positive number")]
    NonPositivePrice,
}

/// Store-assigned identifier such as `example-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExampleId(String);

impl ExampleId {
    /// Build the identifier for allocation number `sequence`.
    ///
    /// # Examples
    /// ```
    /// use starter_api::domain::ExampleId;
    ///
    /// assert_eq!(ExampleId::from_sequence(7).as_str(), "example-7");
    /// ```
    #[must_use]
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("{EXAMPLE_ID_PREFIX}{sequence}"))
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ExampleId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for ExampleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Display name of an example, 1 to 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExampleName(String);

impl ExampleName {
    /// Longest accepted name, counted in characters.
    pub const MAX_CHARS: usize = 100;

    /// Validate and wrap a name.
    ///
    /// # Errors
    /// Returns [`ExampleValidationError::EmptyName`] or
    /// [`ExampleValidationError::NameTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, ExampleValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ExampleValidationError::EmptyName);
        }
        if value.chars().count() > Self::MAX_CHARS {
            return Err(ExampleValidationError::NameTooLong {
                max: Self::MAX_CHARS,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the name text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExampleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strictly positive, finite price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(f64);

impl Price {
    /// Validate and wrap a price.
    ///
    /// # Errors
    /// Returns [`ExampleValidationError::NonPositivePrice`] for zero, negative,
    /// NaN, or infinite values.
    pub fn new(value: f64) -> Result<Self, ExampleValidationError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ExampleValidationError::NonPositivePrice)
        }
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Validated input for creating an example.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleDraft {
    /// Required display name.
    pub name: ExampleName,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional price.
    pub price: Option<Price>,
    /// Ordered tags; empty when the client supplied none.
    pub tags: Vec<String>,
}

impl ExampleDraft {
    /// Draft with only a name.
    #[must_use]
    pub const fn named(name: ExampleName) -> Self {
        Self {
            name,
            description: None,
            price: None,
            tags: Vec::new(),
        }
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExamplePatch {
    /// Replacement name.
    pub name: Option<ExampleName>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement price.
    pub price: Option<Price>,
    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
}

impl ExamplePatch {
    /// Whether the patch carries no field values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.tags.is_none()
    }
}

/// An example record held by a store.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    id: ExampleId,
    name: ExampleName,
    description: Option<String>,
    price: Option<Price>,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Example {
    /// Materialise a draft under a freshly allocated identifier.
    #[must_use]
    pub fn new(id: ExampleId, draft: ExampleDraft, now: DateTime<Utc>) -> Self {
        let ExampleDraft {
            name,
            description,
            price,
            tags,
        } = draft;
        Self {
            id,
            name,
            description,
            price,
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the supplied patch fields and refresh `updated_at`.
    ///
    /// `updated_at` is refreshed even when the patch is empty. A clock reading
    /// earlier than `created_at` is clamped so the timestamps never invert.
    pub fn apply(&mut self, patch: ExamplePatch, now: DateTime<Utc>) {
        let ExamplePatch {
            name,
            description,
            price,
            tags,
        } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = Some(description);
        }
        if let Some(price) = price {
            self.price = Some(price);
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
        self.updated_at = now.max(self.created_at);
    }

    /// Store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> &ExampleId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &ExampleName {
        &self.name
    }

    /// Optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Optional price.
    #[must_use]
    pub const fn price(&self) -> Option<Price> {
        self.price
    }

    /// Ordered tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the most recent update (equal to creation until then).
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Confirmation returned after a successful delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionConfirmation {
    /// Human-readable confirmation referencing the deleted id.
    pub message: String,
}

impl DeletionConfirmation {
    /// Confirmation for the removal of `id`.
    #[must_use]
    pub fn for_id(id: &str) -> Self {
        Self {
            message: format!("Example with ID {id} has been deleted"),
        }
    }
}
