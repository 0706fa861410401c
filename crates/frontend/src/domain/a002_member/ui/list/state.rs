use contracts::domain::a002_member::aggregate::{MemberDto, MemberRole, MemberStatus};
use contracts::shared::api::ApiError;
use leptos::prelude::*;
use std::cmp::Ordering;

use crate::shared::config::DEFAULT_PAGE_SIZE;
use crate::shared::date_utils::format_date;
use crate::shared::list_utils::{sort_list, SortState, Sortable};
use crate::shared::pagination::FilterState;

pub const SEARCH: &str = "search";
pub const ROLE: &str = "role";
pub const STATUS: &str = "status";

#[derive(Clone, Debug)]
pub struct MembersListState {
    pub items: Vec<MemberDto>,
    pub filters: FilterState,
    pub sort: SortState,
    pub is_loaded: bool,
}

impl Default for MembersListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filters: FilterState::new(DEFAULT_PAGE_SIZE),
            sort: SortState::new("name"),
            is_loaded: false,
        }
    }
}

impl MembersListState {
    /// Rows of the current page in the chosen column order.
    pub fn sorted_items(&self) -> Vec<MemberDto> {
        let mut items = self.items.clone();
        sort_list(&mut items, &self.sort.field, self.sort.ascending);
        items
    }
}

/// Display values of one table row, owned so each cell can take its own.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRow {
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    pub status: MemberStatus,
    pub joined: String,
    pub is_owner: bool,
}

impl From<&MemberDto> for MemberRow {
    fn from(m: &MemberDto) -> Self {
        Self {
            name: m.display_name().to_string(),
            email: m.email.clone(),
            role: m.role,
            status: m.status,
            joined: m
                .joined_at
                .as_deref()
                .map(format_date)
                .unwrap_or_else(|| "—".to_string()),
            is_owner: m.role == MemberRole::Owner,
        }
    }
}

pub fn create_state() -> RwSignal<MembersListState> {
    RwSignal::new(MembersListState::default())
}

impl Sortable for MemberDto {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "email" => self.email.to_lowercase().cmp(&other.email.to_lowercase()),
            "role" => self.role.cmp(&other.role),
            "status" => self.status.cmp(&other.status),
            "joined_at" => self.joined_at.cmp(&other.joined_at),
            _ => self
                .display_name()
                .to_lowercase()
                .cmp(&other.display_name().to_lowercase()),
        }
    }
}

/// Member actions are role-gated server-side; say so plainly instead of a generic 403.
pub fn member_error_message(error: &ApiError) -> String {
    if error.is_access_denied() {
        "Only organization owners and admins can manage members".to_string()
    } else {
        error.user_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::api::{ErrorKind, ROLE_ACCESS_DENIED};

    fn member(id: &str, name: &str, role: MemberRole) -> MemberDto {
        MemberDto {
            id: id.into(),
            email: format!("{}@team.io", id),
            full_name: Some(name.into()),
            role,
            status: MemberStatus::Active,
            joined_at: None,
            last_active_at: None,
        }
    }

    #[test]
    fn test_sorted_by_role_then_name() {
        let mut state = MembersListState::default();
        state.items = vec![
            member("b", "Bea", MemberRole::Staff),
            member("a", "anna", MemberRole::Owner),
        ];
        assert_eq!(state.sorted_items()[0].id, "a");

        state.sort.toggle("role");
        assert_eq!(state.sorted_items()[0].role, MemberRole::Owner);
        state.sort.toggle("role");
        assert_eq!(state.sorted_items()[0].role, MemberRole::Staff);
    }

    #[test]
    fn test_row_values() {
        let mut owner = member("o1", "Olga", MemberRole::Owner);
        owner.joined_at = Some("2030-03-05T10:00:00Z".into());
        let row = MemberRow::from(&owner);
        assert_eq!(row.name, "Olga");
        assert_eq!(row.email, "o1@team.io");
        assert_eq!(row.joined, "05.03.2030");
        assert!(row.is_owner);

        let mut invited = member("s1", "", MemberRole::Staff);
        invited.full_name = None;
        let row = MemberRow::from(&invited);
        assert_eq!(row.name, "s1@team.io");
        assert_eq!(row.joined, "—");
        assert!(!row.is_owner);
    }

    #[test]
    fn test_role_denied_message() {
        let err = ApiError::from_status(
            403,
            r#"{"success":false,"error":{"code":"ROLE_ACCESS_DENIED","message":"forbidden"}}"#,
        );
        assert_eq!(err.kind, ErrorKind::AccessDenied);
        assert_eq!(err.code.as_deref(), Some(ROLE_ACCESS_DENIED));
        assert_eq!(
            member_error_message(&err),
            "Only organization owners and admins can manage members"
        );
        assert_eq!(member_error_message(&ApiError::network("down")), "Network error: down");
    }
}
