use serde::{Deserialize, Serialize};

/// Pagination block returned with every list response.
///
/// `pages == ceil(total / limit)`; an empty result has zero pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

impl PaginationState {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        Self {
            page: page.max(1),
            limit,
            total,
            pages: Self::pages_for(total, limit),
        }
    }

    pub fn pages_for(total: u64, limit: u32) -> u32 {
        if limit == 0 {
            return 0;
        }
        total.div_ceil(limit as u64) as u32
    }

    /// Recompute `pages` from `total` and `limit`, ignoring whatever the server sent.
    pub fn normalized(self) -> Self {
        Self::new(self.page, self.limit, self.total)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    /// 1-based inclusive range of rows on the current page, `None` when empty.
    pub fn visible_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 || self.limit == 0 {
            return None;
        }
        let start = (self.page as u64 - 1) * self.limit as u64 + 1;
        if start > self.total {
            return None;
        }
        let end = (start + self.limit as u64 - 1).min(self.total);
        Some((start, end))
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(1, 25, 0)
    }
}

/// Single envelope for every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_is_ceiling() {
        assert_eq!(PaginationState::pages_for(0, 10), 0);
        assert_eq!(PaginationState::pages_for(1, 10), 1);
        assert_eq!(PaginationState::pages_for(10, 10), 1);
        assert_eq!(PaginationState::pages_for(11, 10), 2);
        assert_eq!(PaginationState::pages_for(95, 25), 4);
        assert_eq!(PaginationState::pages_for(5, 0), 0);
    }

    #[test]
    fn test_normalized_fixes_server_pages() {
        let state = PaginationState {
            page: 2,
            limit: 10,
            total: 31,
            pages: 7,
        };
        assert_eq!(state.normalized().pages, 4);
    }

    #[test]
    fn test_visible_range() {
        let state = PaginationState::new(3, 10, 25);
        assert_eq!(state.visible_range(), Some((21, 25)));
        assert!(state.has_prev());
        assert!(!state.has_next());

        assert_eq!(PaginationState::new(1, 10, 0).visible_range(), None);
    }

    #[test]
    fn test_envelope_deserializes() {
        let body = r#"{"items":[1,2,3],"pagination":{"page":1,"limit":3,"total":7,"pages":3}}"#;
        let page: Paginated<u32> = serde_json::from_str(body).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.pagination.pages, 3);
    }
}
