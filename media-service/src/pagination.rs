/// Page/limit windowing over aggregated result sets
///
/// Pagination operates on the output of a pipeline (post-join,
/// post-derive), not on raw stored rows: the page boundary is computed
/// after all joins have resolved.
use serde::Serialize;

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;

/// Caller-supplied pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: usize,
    pub limit: usize,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageParams {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Parse raw query input. Absent, non-numeric or non-positive
    /// values fall back to the defaults instead of failing the request.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(DEFAULT_LIMIT);
        Self { page, limit }
    }
}

/// One page of an aggregated result set
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Window a fully aggregated result set. Out-of-range pages return
    /// an empty item list with accurate totals.
    pub fn from_items(items: Vec<T>, params: PageParams) -> Self {
        let total_items = items.len();
        let total_pages = total_items.div_ceil(params.limit);
        let offset = (params.page - 1).saturating_mul(params.limit);

        let items: Vec<T> = items
            .into_iter()
            .skip(offset)
            .take(params.limit)
            .collect();

        Self {
            items,
            page: params.page,
            limit: params.limit,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_params_absent() {
        let params = PageParams::from_raw(None, None);
        assert_eq!(params, PageParams::new(1, 10));
    }

    #[test]
    fn non_numeric_input_falls_back_to_defaults() {
        let params = PageParams::from_raw(Some("abc"), Some("-3"));
        assert_eq!(params, PageParams::new(1, 10));
    }

    #[test]
    fn zero_is_not_a_valid_page_or_limit() {
        let params = PageParams::from_raw(Some("0"), Some("0"));
        assert_eq!(params, PageParams::new(1, 10));
    }

    #[test]
    fn middle_page_windows_the_aggregated_set() {
        let items: Vec<i32> = (1..=12).collect();
        let page = Page::from_items(items, PageParams::new(2, 5));
        assert_eq!(page.items, vec![6, 7, 8, 9, 10]);
        assert_eq!(page.total_items, 12);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn out_of_range_page_is_empty_with_accurate_totals() {
        let items: Vec<i32> = (1..=12).collect();
        let page = Page::from_items(items, PageParams::new(10, 5));
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 12);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn empty_result_set_has_zero_pages() {
        let page = Page::<i32>::from_items(Vec::new(), PageParams::default());
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
