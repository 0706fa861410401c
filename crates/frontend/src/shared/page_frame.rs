//! PageFrame: root wrapper for every section page.
//!
//! Sets two metadata attributes on the root element:
//!   - `id`                 `"{section}--{category}"`, e.g. `"a002_member--list"`
//!   - `data-page-category` one of [`PageCategory`]
//!
//! Usage:
//! ```rust,ignore
//! view! {
//!     <PageFrame page_id="a004_coupon--list" category=PageCategory::List>
//!         <div class="page__header">...</div>
//!         <div class="page__content">...</div>
//!     </PageFrame>
//! }
//! ```

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCategory {
    /// Table with filters and pagination.
    List,
    /// Create/edit form for one record.
    Detail,
    /// Stat cards plus lists.
    Dashboard,
    /// Multi-step flow.
    Wizard,
    /// Login, access denied, empty states.
    System,
}

impl PageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageCategory::List => "list",
            PageCategory::Detail => "detail",
            PageCategory::Dashboard => "dashboard",
            PageCategory::Wizard => "wizard",
            PageCategory::System => "system",
        }
    }

    fn base_class(&self) -> &'static str {
        match self {
            PageCategory::List | PageCategory::System => "page",
            PageCategory::Detail => "page page--detail",
            PageCategory::Dashboard => "page page--dashboard",
            PageCategory::Wizard => "page page--wizard",
        }
    }
}

/// Validate that a page id matches the `{section}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((a, b)) if !a.is_empty() && !b.is_empty())
}

#[component]
pub fn PageFrame(
    /// HTML id in format `{section}--{category}`.
    page_id: &'static str,
    category: PageCategory,
    /// Additional CSS classes appended after the base class.
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(page_id), "bad page id {page_id}");

    let full_class = if class.is_empty() {
        category.base_class().to_string()
    } else {
        format!("{} {class}", category.base_class())
    };

    view! {
        <div id=page_id class=full_class data-page-category=category.as_str()>
            {children()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a002_member--list"));
        assert!(!is_valid_page_id("a002_member"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a002_member--"));
    }
}
