//! Section content registry: the one place that maps a [`Section`] to its view.

use crate::domain::a001_organization::ui::wizard::OnboardingWizard;
use crate::domain::a002_member::ui::list::MembersPage;
use crate::domain::a003_announcement::ui::dashboard::AnnouncementDashboard;
use crate::domain::a004_coupon::ui::list::CouponsList;
use crate::domain::a005_registration_timeline::ui::details::TimelinePage;
use crate::layout::global_context::{use_global_context, Section};
use crate::shared::icons::icon;
use leptos::prelude::*;

fn pick_event_hint(section: Section) -> AnyView {
    view! {
        <div class="empty-state">
            {icon("calendar")}
            <p>{format!("{} belongs to an event. Pick one in the header.", section.label())}</p>
        </div>
    }
    .into_any()
}

pub fn render_section(section: Section, event_id: Option<String>) -> AnyView {
    match (section, event_id) {
        (Section::Onboarding, _) => view! { <OnboardingWizard /> }.into_any(),
        (Section::Members, _) => view! { <MembersPage /> }.into_any(),
        (Section::Announcements, Some(event_id)) => {
            view! { <AnnouncementDashboard event_id=event_id /> }.into_any()
        }
        (Section::Coupons, Some(event_id)) => view! { <CouponsList event_id=event_id /> }.into_any(),
        (Section::Timeline, Some(event_id)) => view! { <TimelinePage event_id=event_id /> }.into_any(),
        (section, None) => pick_event_hint(section),
    }
}

/// Active section, remounted whenever the section, organization or event changes.
#[component]
pub fn SectionContent() -> impl IntoView {
    let ctx = use_global_context();
    let key = Memo::new(move |_| (ctx.active.get(), ctx.current_org_id(), ctx.current_event_id()));

    move || {
        let (section, _org, event_id) = key.get();
        log::debug!("render section {}", section.key());
        render_section(section, event_id)
    }
}
