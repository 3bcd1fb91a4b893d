//! Fixed-size, 1-indexed pagination.
//!
//! Page size is a configured constant; the caller only chooses the page
//! number. `offset = per_page * (page - 1)`.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// 1-indexed page number. Defaults to the first page.
    pub page: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn offset(&self, per_page: i64) -> i64 {
        per_page * (self.page() - 1)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_to_first() {
        let params = PaginationParams { page: None };
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(10), 0);
    }

    #[test]
    fn test_offset_is_one_indexed() {
        let params = PaginationParams { page: Some(3) };
        assert_eq!(params.offset(10), 20);
        assert_eq!(params.offset(25), 50);
    }

    #[test]
    fn test_page_clamps_below_one() {
        let params = PaginationParams { page: Some(0) };
        assert_eq!(params.page(), 1);
        let params = PaginationParams { page: Some(-4) };
        assert_eq!(params.offset(10), 0);
    }

    #[test]
    fn test_meta_total_pages_rounds_up() {
        assert_eq!(PaginationMeta::new(1, 10, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 10, 10).total_pages, 1);
        assert_eq!(PaginationMeta::new(1, 10, 11).total_pages, 2);
        assert_eq!(PaginationMeta::new(2, 10, 95).total_pages, 10);
    }
}
