//! Page/limit pagination primitives shared by list endpoints.
//!
//! List handlers receive a [`PageRequest`] from the transport layer, fetch the
//! complete ordered result set from the domain, and slice it with
//! [`PageRequest::paginate`]. The resulting [`Paginated`] envelope carries the
//! requested window together with [`PaginationMeta`] describing the whole
//! result set.
//!
//! # Examples
//! ```
//! use pagination::PageRequest;
//!
//! let request = PageRequest::new(3, 10).expect("valid request");
//! let page = request.paginate((1..=25).collect::<Vec<u32>>());
//! assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
//! assert_eq!(page.pagination.total_pages, 3);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page number used when a client omits `page`.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when a client omits `limit`.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Validation failures raised by [`PageRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Pages are 1-based; zero is rejected.
    #[error("page must be at least 1 (got {page})")]
    PageOutOfRange {
        /// Rejected page number.
        page: u32,
    },
    /// The page size falls outside `1..=max`.
    #[error("limit must be between 1 and {max} (got {limit})")]
    LimitOutOfRange {
        /// Rejected page size.
        limit: u32,
        /// Largest accepted page size.
        max: u32,
    },
}

/// Validated 1-based page window.
///
/// ## Invariants
/// - `page >= 1`.
/// - `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Validate and construct a page window.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `page` is zero or `limit` is outside
    /// `1..=MAX_LIMIT`.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange { page });
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PageRequestError::LimitOutOfRange {
                limit,
                max: MAX_LIMIT,
            });
        }
        Ok(Self { page, limit })
    }

    /// Requested 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items preceding the requested page.
    #[must_use]
    pub fn offset(&self) -> usize {
        to_usize(self.page.saturating_sub(1)).saturating_mul(to_usize(self.limit))
    }

    /// Slice the full ordered result set down to the requested window.
    ///
    /// Pages past the end of the result set yield an empty `items` sequence;
    /// the metadata still reports the real totals.
    #[must_use]
    pub fn paginate<T>(&self, items: Vec<T>) -> Paginated<T> {
        let total = items.len();
        let window = items
            .into_iter()
            .skip(self.offset())
            .take(to_usize(self.limit))
            .collect();
        Paginated {
            items: window,
            pagination: PaginationMeta {
                limit: self.limit,
                page: self.page,
                total,
                total_pages: total_pages(total, self.limit),
            },
        }
    }
}

/// Number of pages needed to show `total` items at `limit` per page.
///
/// A zero `limit` cannot be expressed through [`PageRequest`]; it is treated
/// as a single unbounded page here.
///
/// # Examples
/// ```
/// assert_eq!(pagination::total_pages(25, 10), 3);
/// assert_eq!(pagination::total_pages(0, 10), 0);
/// ```
#[must_use]
pub fn total_pages(total: usize, limit: u32) -> usize {
    match to_usize(limit) {
        0 => usize::from(total > 0),
        per_page => total.div_ceil(per_page),
    }
}

fn to_usize(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Pagination metadata describing the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Page size used for the request.
    pub limit: u32,
    /// 1-based page number returned.
    pub page: u32,
    /// Total number of items across every page.
    pub total: usize,
    /// Number of pages needed to show every item.
    pub total_pages: usize,
}

/// A single page of items plus metadata about the full result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Items on the requested page, in result-set order.
    pub items: Vec<T>,
    /// Metadata describing the full result set.
    pub pagination: PaginationMeta,
}

impl<T> Paginated<T> {
    /// Convert each item while keeping the pagination metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Unit coverage for page windows and metadata arithmetic.

    use super::*;
    use rstest::rstest;

    fn numbers(count: u32) -> Vec<u32> {
        (1..=count).collect()
    }

    #[rstest]
    #[case(0, 10, PageRequestError::PageOutOfRange { page: 0 })]
    #[case(1, 0, PageRequestError::LimitOutOfRange { limit: 0, max: MAX_LIMIT })]
    #[case(1, 101, PageRequestError::LimitOutOfRange { limit: 101, max: MAX_LIMIT })]
    fn new_rejects_out_of_range_values(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected: PageRequestError,
    ) {
        assert_eq!(PageRequest::new(page, limit), Err(expected));
    }

    #[rstest]
    fn default_request_is_first_page_of_ten() {
        let request = PageRequest::default();
        assert_eq!(request.page(), DEFAULT_PAGE);
        assert_eq!(request.limit(), DEFAULT_LIMIT);
        assert_eq!(request.offset(), 0);
    }

    #[rstest]
    #[case(1, 10)]
    #[case(2, 10)]
    #[case(3, 5)]
    #[case(4, 0)]
    fn paginate_slices_twenty_five_items(#[case] page: u32, #[case] expected_len: usize) {
        let request = PageRequest::new(page, 10).expect("valid request");
        let result = request.paginate(numbers(25));

        assert_eq!(result.items.len(), expected_len);
        assert_eq!(result.pagination.total, 25);
        assert_eq!(result.pagination.total_pages, 3);
        assert_eq!(result.pagination.page, page);
        assert_eq!(result.pagination.limit, 10);
    }

    #[rstest]
    fn paginate_keeps_result_order() {
        let request = PageRequest::new(2, 3).expect("valid request");
        let result = request.paginate(numbers(7));
        assert_eq!(result.items, vec![4, 5, 6]);
    }

    #[rstest]
    fn empty_result_set_has_no_pages() {
        let result = PageRequest::default().paginate(Vec::<u32>::new());
        assert!(result.items.is_empty());
        assert_eq!(result.pagination.total, 0);
        assert_eq!(result.pagination.total_pages, 0);
    }

    #[rstest]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(1, 100, 1)]
    #[case(3, 0, 1)]
    fn total_pages_rounds_up(#[case] total: usize, #[case] limit: u32, #[case] expected: usize) {
        assert_eq!(total_pages(total, limit), expected);
    }

    #[rstest]
    fn metadata_serialises_in_camel_case() {
        let result = PageRequest::default().paginate(numbers(1));
        let value = serde_json::to_value(result.pagination).expect("serialise metadata");
        assert_eq!(value["totalPages"], 1);
        assert_eq!(value["total"], 1);
    }

    #[rstest]
    fn map_preserves_metadata() {
        let result = PageRequest::default().paginate(numbers(2));
        let mapped = result.clone().map(|n| n.to_string());
        assert_eq!(mapped.items, vec!["1".to_owned(), "2".to_owned()]);
        assert_eq!(mapped.pagination, result.pagination);
    }
}
