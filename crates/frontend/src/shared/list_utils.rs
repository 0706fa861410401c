//! Column sorting for tables.
use leptos::prelude::*;
use std::cmp::Ordering;

/// Types that can be ordered by a named column
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Sort in place by a column; stable, so equal rows keep server order
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub ascending: bool,
}

impl SortState {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            ascending: true,
        }
    }

    /// Same column flips direction; a new column starts ascending.
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.ascending = !self.ascending;
        } else {
            self.field = field.to_string();
            self.ascending = true;
        }
    }

    pub fn indicator(&self, field: &str) -> &'static str {
        match (self.field == field, self.ascending) {
            (false, _) => "",
            (true, true) => " ▲",
            (true, false) => " ▼",
        }
    }
}

/// Clickable column header bound to a `SortState` signal
#[component]
pub fn SortHeader(
    label: &'static str,
    field: &'static str,
    sort: RwSignal<SortState>,
) -> impl IntoView {
    view! {
        <span class="sortable-header" on:click=move |_| sort.update(|s| s.toggle(field))>
            {label}
            {move || sort.with(|s| s.indicator(field))}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row(&'static str, u32);

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => self.0.cmp(other.0),
                "n" => self.1.cmp(&other.1),
                _ => Ordering::Equal,
            }
        }
    }

    #[test]
    fn test_sort_both_directions() {
        let mut rows = vec![Row("b", 1), Row("a", 2), Row("c", 0)];
        sort_list(&mut rows, "name", true);
        assert_eq!(rows[0], Row("a", 2));
        sort_list(&mut rows, "n", false);
        assert_eq!(rows[0], Row("a", 2));
        assert_eq!(rows[2], Row("c", 0));
    }

    #[test]
    fn test_toggle_flips_then_resets() {
        let mut s = SortState::new("email");
        s.toggle("email");
        assert!(!s.ascending);
        assert_eq!(s.indicator("email"), " ▼");
        s.toggle("role");
        assert!(s.ascending);
        assert_eq!(s.indicator("email"), "");
    }
}
