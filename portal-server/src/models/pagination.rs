//! Offset/limit pagination

use serde::Deserialize;

use super::ValidationError;

/// Maximum rows per page
pub const MAX_LIMIT: i64 = 100;

/// Default rows per page
pub const DEFAULT_LIMIT: i64 = 100;

/// Validated pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    skip: i64,
    limit: i64,
}

impl Pagination {
    /// Create a pagination window.
    ///
    /// - Negative `skip` or `limit` is rejected
    /// - `limit` is clamped to [`MAX_LIMIT`]
    pub fn new(skip: i64, limit: i64) -> Result<Self, ValidationError> {
        if skip < 0 {
            return Err(ValidationError::Negative { field: "skip" });
        }
        if limit < 0 {
            return Err(ValidationError::Negative { field: "limit" });
        }

        Ok(Self {
            skip,
            limit: limit.min(MAX_LIMIT),
        })
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        self.skip
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Query parameters for pagination
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = ValidationError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        Self::new(
            params.skip.unwrap_or(0),
            params.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}
