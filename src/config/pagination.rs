use std::env;

/// Fixed page size for every list endpoint. Callers pick a page number;
/// they never pick a size.
#[derive(Clone, Copy, Debug)]
pub struct PaginationConfig {
    pub per_page: i64,
}

impl PaginationConfig {
    pub fn from_env() -> Self {
        Self {
            per_page: env::var("PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(10),
        }
    }
}
