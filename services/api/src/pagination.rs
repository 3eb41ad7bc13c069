//! Page parameters and the paginated response envelope

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw `page` / `size` query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Check bounds and turn the parameters into a page request
    pub fn resolve(self) -> ApiResult<PageRequest> {
        if self.page < 1 {
            return Err(ApiError::Validation(
                "page must be greater than or equal to 1".to_string(),
            ));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.size) {
            return Err(ApiError::Validation(format!(
                "size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if (self.page - 1).checked_mul(self.size).is_none() {
            return Err(ApiError::Validation(format!(
                "page {} is out of range",
                self.page
            )));
        }

        Ok(PageRequest {
            page: self.page,
            size: self.size,
        })
    }
}

/// Validated page request
///
/// `offset()` is guaranteed not to overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    pub fn limit(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.size
    }
}

/// One page of results
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            size: request.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_fifty() {
        let request = PageParams::default().resolve().unwrap();
        assert_eq!(request, PageRequest { page: 1, size: 50 });
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), 50);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let request = PageParams { page: 3, size: 20 }.resolve().unwrap();
        assert_eq!(request.offset(), 40);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            PageParams { page: 0, size: 10 }.resolve(),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            PageParams { page: 1, size: 0 }.resolve(),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            PageParams { page: 1, size: 101 }.resolve(),
            Err(ApiError::Validation(_))
        ));
        assert!(PageParams { page: 1, size: 100 }.resolve().is_ok());
    }

    #[test]
    fn rejects_pages_whose_offset_overflows() {
        let huge = PageParams {
            page: i64::MAX,
            size: MAX_PAGE_SIZE,
        };
        assert!(matches!(huge.resolve(), Err(ApiError::Validation(_))));

        let last = i64::MAX / MAX_PAGE_SIZE + 1;
        let request = PageParams {
            page: last,
            size: MAX_PAGE_SIZE,
        }
        .resolve()
        .unwrap();
        assert_eq!(request.offset(), (last - 1) * MAX_PAGE_SIZE);
    }

    #[test]
    fn envelope_serializes_items_and_counts() {
        let page = Page::new(vec![1, 2], 7, PageRequest { page: 2, size: 2 });
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"items": [1, 2], "total": 7, "page": 2, "size": 2})
        );
    }
}
