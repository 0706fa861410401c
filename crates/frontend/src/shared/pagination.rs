//! Page windowing and list filter state for server-paginated tables.

use contracts::shared::pagination::{Paginated, PaginationState};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

/// Page buttons to render for `current` out of `total` pages.
///
/// Always shows the first and last page plus the neighbours of `current`;
/// each run of hidden pages becomes one `Ellipsis`. Empty when there is
/// nothing to paginate. `current` must already be clamped (see [`clamp_page`]).
pub fn page_window(current: u32, total: u32) -> Vec<PageMarker> {
    if total <= 1 {
        return Vec::new();
    }

    let mut window = Vec::new();
    let mut last_shown = 0u32;
    for page in 1..=total {
        let near_current = page + 1 >= current && page <= current + 1;
        if page == 1 || page == total || near_current {
            if last_shown != 0 && page > last_shown + 1 {
                window.push(PageMarker::Ellipsis);
            }
            window.push(PageMarker::Page(page));
            last_shown = page;
        }
    }
    window
}

pub fn clamp_page(page: u32, total: u32) -> u32 {
    page.clamp(1, total.max(1))
}

pub const PAGE_KEY: &str = "page";
pub const LIMIT_KEY: &str = "limit";

/// Query filters of a list screen plus its paging position.
///
/// Changing any filter other than `page`/`limit` sends the user back to the
/// first page; changing `limit` does too, since the old page may not exist.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    filters: BTreeMap<String, String>,
    pub pagination: PaginationState,
}

impl FilterState {
    pub fn new(limit: u32) -> Self {
        Self {
            filters: BTreeMap::new(),
            pagination: PaginationState::new(1, limit, 0),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            PAGE_KEY | LIMIT_KEY => None,
            _ => self.filters.get(key).map(String::as_str),
        }
    }

    /// Sets a filter; empty values remove it.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match key {
            PAGE_KEY => {
                if let Ok(page) = value.parse::<u32>() {
                    self.set_page(page);
                }
            }
            LIMIT_KEY => {
                if let Ok(limit) = value.parse::<u32>() {
                    self.set_limit(limit);
                }
            }
            _ => {
                let value = value.trim().to_string();
                let changed = if value.is_empty() {
                    self.filters.remove(key).is_some()
                } else {
                    self.filters.insert(key.to_string(), value.clone()).as_ref() != Some(&value)
                };
                if changed {
                    self.pagination.page = 1;
                }
            }
        }
    }

    pub fn clear(&mut self) {
        if !self.filters.is_empty() {
            self.filters.clear();
            self.pagination.page = 1;
        }
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn set_page(&mut self, page: u32) {
        self.pagination.page = if self.pagination.pages == 0 {
            page.max(1)
        } else {
            clamp_page(page, self.pagination.pages)
        };
    }

    pub fn set_limit(&mut self, limit: u32) {
        if limit > 0 && limit != self.pagination.limit {
            self.pagination.limit = limit;
            self.pagination.page = 1;
        }
    }

    /// Query-string pairs, filters first, then `page` and `limit`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        pairs.push((PAGE_KEY.to_string(), self.pagination.page.to_string()));
        pairs.push((LIMIT_KEY.to_string(), self.pagination.limit.to_string()));
        pairs
    }

    /// Adopt the server's pagination and return the items.
    ///
    /// If the current page fell off the end (rows deleted elsewhere), the
    /// page is clamped and `needs_refetch` is reported.
    pub fn apply_response<T>(&mut self, response: Paginated<T>) -> (Vec<T>, bool) {
        let requested = self.pagination.page;
        let server = response.pagination.normalized();
        let page = if server.pages == 0 {
            1
        } else {
            clamp_page(requested, server.pages)
        };
        self.pagination = PaginationState { page, ..server };
        let needs_refetch = server.pages > 0 && requested > server.pages;
        (response.items, needs_refetch)
    }
}

#[cfg(test)]
mod tests {
    use super::PageMarker::{Ellipsis, Page};
    use super::*;

    fn numbers(window: &[PageMarker]) -> Vec<u32> {
        window
            .iter()
            .filter_map(|m| match m {
                Page(n) => Some(*n),
                Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn test_window_middle_page() {
        assert_eq!(
            page_window(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_window_edges() {
        assert!(page_window(1, 1).is_empty());
        assert!(page_window(1, 0).is_empty());
        assert_eq!(page_window(1, 2), vec![Page(1), Page(2)]);
        assert_eq!(page_window(1, 5), vec![Page(1), Page(2), Ellipsis, Page(5)]);
        assert_eq!(page_window(10, 10), vec![Page(1), Ellipsis, Page(9), Page(10)]);
        // A gap of exactly one page still collapses.
        assert_eq!(page_window(4, 5), vec![Page(1), Ellipsis, Page(3), Page(4), Page(5)]);
    }

    #[test]
    fn test_window_properties_hold_for_all_inputs() {
        for total in 2..=40u32 {
            for current in 1..=total {
                let window = page_window(current, total);
                let pages = numbers(&window);
                assert_eq!(pages.first(), Some(&1));
                assert_eq!(pages.last(), Some(&total));
                assert!(pages.contains(&current));

                for pair in window.windows(2) {
                    match (pair[0], pair[1]) {
                        (Page(a), Page(b)) => assert_eq!(b, a + 1, "{current}/{total}"),
                        (Ellipsis, Ellipsis) => panic!("double ellipsis at {current}/{total}"),
                        _ => {}
                    }
                }
                for pair in pages.windows(2) {
                    assert!(pair[0] < pair[1]);
                }
                assert_eq!(page_window(current, total), window);
            }
        }
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(9, 5), 5);
        assert_eq!(clamp_page(3, 0), 1);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = FilterState::new(25);
        state.pagination = PaginationState::new(3, 25, 200);

        state.set("page", "4");
        assert_eq!(state.pagination.page, 4);

        state.set("role", "admin");
        assert_eq!(state.pagination.page, 1);
        assert_eq!(state.get("role"), Some("admin"));

        state.set_page(2);
        state.set("role", "admin");
        assert_eq!(state.pagination.page, 2, "same value is not a change");

        state.set("role", "");
        assert_eq!(state.pagination.page, 1);
        assert!(!state.has_filters());
    }

    #[test]
    fn test_query_pairs_include_paging() {
        let mut state = FilterState::new(10);
        state.set("search", " alice ");
        state.set("limit", "50");
        assert_eq!(
            state.query_pairs(),
            vec![
                ("search".to_string(), "alice".to_string()),
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn test_apply_response_clamps_stale_page() {
        let mut state = FilterState::new(10);
        state.pagination.page = 4;
        let response = Paginated {
            items: Vec::<u32>::new(),
            pagination: PaginationState {
                page: 4,
                limit: 10,
                total: 25,
                pages: 0,
            },
        };
        let (_, refetch) = state.apply_response(response);
        assert!(refetch);
        assert_eq!(state.pagination.pages, 3);
        assert_eq!(state.pagination.page, 3);
    }
}
