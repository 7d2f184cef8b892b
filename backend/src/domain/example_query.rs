//! Search and ordering rules for listing examples.
//!
//! Listing starts from a snapshot of the store, keeps records whose name or
//! description contains the search text (case-insensitively), then orders them
//! by one of a closed set of sort keys.
//!
//! Records missing the sort field compare equal to everything. Under a stable
//! sort this makes them fixed barriers: they keep their position and records
//! that do have the field are only reordered among the neighbours between two
//! barriers.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::Example;

/// Unrecognised sort key or sort order text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported value: {0}")]
pub struct UnknownSortValue(pub String);

/// Direction of an ordering request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortOrder {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    const fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownSortValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(UnknownSortValue(other.to_owned())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record fields a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleSortKey {
    /// Store-assigned identifier, compared as text.
    Id,
    /// Display name.
    Name,
    /// Description; absent on some records.
    Description,
    /// Price; absent on some records.
    Price,
    /// Creation timestamp.
    CreatedAt,
    /// Last update timestamp.
    UpdatedAt,
}

impl ExampleSortKey {
    /// Every recognised key, in documentation order.
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::Name,
        Self::Description,
        Self::Price,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Price => "price",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Compare two records on this key; `None` when either lacks the field.
    #[must_use]
    pub fn compare(self, a: &Example, b: &Example) -> Option<Ordering> {
        match self {
            Self::Id => Some(a.id().cmp(b.id())),
            Self::Name => Some(a.name().cmp(b.name())),
            Self::Description => a.description().zip(b.description()).map(|(x, y)| x.cmp(y)),
            Self::Price => a.price().zip(b.price()).map(|(x, y)| x.cmp(&y)),
            Self::CreatedAt => Some(a.created_at().cmp(&b.created_at())),
            Self::UpdatedAt => Some(a.updated_at().cmp(&b.updated_at())),
        }
    }

    fn is_present(self, example: &Example) -> bool {
        match self {
            Self::Description => example.description().is_some(),
            Self::Price => example.price().is_some(),
            Self::Id | Self::Name | Self::CreatedAt | Self::UpdatedAt => true,
        }
    }
}

impl FromStr for ExampleSortKey {
    type Err = UnknownSortValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSortValue(s.to_owned()))
    }
}

impl fmt::Display for ExampleSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleSort {
    /// Field to order by.
    pub key: ExampleSortKey,
    /// Direction.
    pub order: SortOrder,
}

/// Listing filter: optional search text and optional ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleQuery {
    /// Case-insensitive substring matched against name or description.
    pub search: Option<String>,
    /// Ordering to apply after filtering.
    pub sort: Option<ExampleSort>,
}

impl ExampleQuery {
    /// Query ordering by `key` in `order`.
    #[must_use]
    pub const fn sorted_by(key: ExampleSortKey, order: SortOrder) -> Self {
        Self {
            search: None,
            sort: Some(ExampleSort { key, order }),
        }
    }

    /// Add search text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Whether `example` satisfies the search filter.
    ///
    /// An empty search string matches everything. A record without a
    /// description can only match on its name.
    #[must_use]
    pub fn matches(&self, example: &Example) -> bool {
        let Some(needle) = self.search.as_deref().filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = needle.to_lowercase();
        contains_folded(example.name().as_str(), &needle)
            || example
                .description()
                .is_some_and(|description| contains_folded(description, &needle))
    }

    /// Filter then order a snapshot of records.
    #[must_use]
    pub fn apply(&self, snapshot: Vec<Example>) -> Vec<Example> {
        let mut results: Vec<Example> = snapshot
            .into_iter()
            .filter(|example| self.matches(example))
            .collect();
        if let Some(sort) = self.sort {
            sort_with_barriers(&mut results, sort);
        }
        results
    }
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

/// Stable sort where records lacking the key stay in place.
fn sort_with_barriers(examples: &mut [Example], sort: ExampleSort) {
    let ExampleSort { key, order } = sort;
    for segment in examples.split_mut(|example| !key.is_present(example)) {
        segment.sort_by(|a, b| order.orient(key.compare(a, b).unwrap_or(Ordering::Equal)));
    }
}
