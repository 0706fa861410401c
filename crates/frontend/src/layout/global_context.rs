use contracts::domain::a001_organization::aggregate::OrganizationSummary;
use contracts::domain::common::EventSummary;
use leptos::prelude::*;

use crate::system::auth::storage;

/// Sidebar sections; the key doubles as the center registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Onboarding,
    Members,
    Announcements,
    Coupons,
    Timeline,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Onboarding,
        Section::Members,
        Section::Announcements,
        Section::Coupons,
        Section::Timeline,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Section::Onboarding => "a001_organization",
            Section::Members => "a002_member",
            Section::Announcements => "a003_announcement",
            Section::Coupons => "a004_coupon",
            Section::Timeline => "a005_registration_timeline",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Onboarding => "Onboarding",
            Section::Members => "Members",
            Section::Announcements => "Announcements",
            Section::Coupons => "Coupons",
            Section::Timeline => "Registration timeline",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Section::Onboarding => "building",
            Section::Members => "users",
            Section::Announcements => "megaphone",
            Section::Coupons => "tag",
            Section::Timeline => "calendar",
        }
    }

    /// Event-scoped sections show a hint until an event is picked.
    pub fn needs_event(&self) -> bool {
        matches!(
            self,
            Section::Announcements | Section::Coupons | Section::Timeline
        )
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// Keep a remembered id if it is still offered, else fall back to the first option.
pub fn pick_selection<'a, I>(remembered: Option<&str>, available: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut first = None;
    for id in available {
        if Some(id) == remembered {
            return Some(id.to_string());
        }
        if first.is_none() {
            first = Some(id.to_string());
        }
    }
    first
}

/// Application-wide state shared through context: which organization and
/// event the admin is working on, and which section is open.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub organizations: RwSignal<Vec<OrganizationSummary>>,
    pub events: RwSignal<Vec<EventSummary>>,
    current_org_id: RwSignal<Option<String>>,
    current_event_id: RwSignal<Option<String>>,
    pub active: RwSignal<Section>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        let (org_id, event_id) = storage::get_selection();
        Self {
            organizations: RwSignal::new(Vec::new()),
            events: RwSignal::new(Vec::new()),
            current_org_id: RwSignal::new(org_id),
            current_event_id: RwSignal::new(event_id),
            active: RwSignal::new(Section::Onboarding),
            left_open: RwSignal::new(true),
        }
    }

    pub fn current_org_id(&self) -> Option<String> {
        self.current_org_id.get()
    }

    pub fn current_org_id_untracked(&self) -> Option<String> {
        self.current_org_id.get_untracked()
    }

    pub fn current_org(&self) -> Option<OrganizationSummary> {
        let id = self.current_org_id.get()?;
        self.organizations
            .with(|orgs| orgs.iter().find(|o| o.id == id).cloned())
    }

    /// Switching organization drops the event selection.
    pub fn set_current_org(&self, id: Option<String>) {
        if self.current_org_id.get_untracked() == id {
            return;
        }
        log::info!("current organization: {:?}", id);
        self.current_org_id.set(id);
        self.events.set(Vec::new());
        self.current_event_id.set(None);
        self.persist();
    }

    pub fn current_event_id(&self) -> Option<String> {
        self.current_event_id.get()
    }

    pub fn current_event(&self) -> Option<EventSummary> {
        let id = self.current_event_id.get()?;
        self.events
            .with(|events| events.iter().find(|e| e.id == id).cloned())
    }

    pub fn set_current_event(&self, id: Option<String>) {
        if self.current_event_id.get_untracked() == id {
            return;
        }
        log::info!("current event: {:?}", id);
        self.current_event_id.set(id);
        self.persist();
    }

    /// Install the organizations list, keeping the remembered choice if possible.
    pub fn set_organizations(&self, orgs: Vec<OrganizationSummary>) {
        let remembered = self.current_org_id.get_untracked();
        let pick = pick_selection(remembered.as_deref(), orgs.iter().map(|o| o.id.as_str()));
        self.organizations.set(orgs);
        if pick != remembered {
            self.current_org_id.set(pick);
            self.current_event_id.set(None);
            self.persist();
        }
    }

    pub fn set_events(&self, events: Vec<EventSummary>) {
        let remembered = self.current_event_id.get_untracked();
        let pick = pick_selection(remembered.as_deref(), events.iter().map(|e| e.id.as_str()));
        self.events.set(events);
        self.set_current_event(pick);
    }

    pub fn activate(&self, section: Section) {
        self.active.set(section);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }

    fn persist(&self) {
        storage::save_selection(
            self.current_org_id.get_untracked().as_deref(),
            self.current_event_id.get_untracked().as_deref(),
        );
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_selection_prefers_remembered() {
        let ids = ["a", "b", "c"];
        assert_eq!(pick_selection(Some("b"), ids), Some("b".to_string()));
        assert_eq!(pick_selection(Some("zz"), ids), Some("a".to_string()));
        assert_eq!(pick_selection(None, ids), Some("a".to_string()));
        assert_eq!(pick_selection(Some("a"), []), None);
    }

    #[test]
    fn test_section_keys_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_key(section.key()), Some(section));
        }
        assert!(Section::Coupons.needs_event());
        assert!(!Section::Members.needs_event());
    }
}
