mod state;

use contracts::domain::a004_coupon::aggregate::CouponDto;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::CouponForm;
use crate::domain::a004_coupon::api;
use crate::shared::components::PaginationControls;
use crate::shared::config::TOGGLE_DEBOUNCE_MS;
use crate::shared::icons::icon;
use crate::shared::list_utils::SortHeader;
use crate::shared::notify::{use_notifier, Notifier};
use crate::shared::page_frame::{PageCategory, PageFrame};
use state::{create_state, CouponRow, KeyedDebounce, ToggleTracker, ACTIVE, SEARCH};

pub use state::CouponsListState;

/// Everything the toggle request needs once the debounce fires.
#[derive(Clone, Copy)]
struct ToggleSender {
    event_id: StoredValue<String>,
    state: RwSignal<CouponsListState>,
    tracker: RwSignal<ToggleTracker>,
    notifier: Notifier,
}

impl ToggleSender {
    fn send(self, id: String) {
        let event = self.event_id.get_value();
        spawn_local(async move {
            match api::toggle_coupon(&event, &id).await {
                Ok(coupon) => {
                    let Some(settled) = self.tracker.try_update(|t| t.confirm(&id, coupon.active)) else {
                        return;
                    };
                    let shown = CouponDto {
                        active: settled.shown,
                        ..coupon
                    };
                    self.state.update(|s| s.replace(shown));
                    if settled.resend {
                        self.send(id);
                    }
                }
                Err(e) => {
                    if let Some(Some(confirmed)) = self.tracker.try_update(|t| t.rollback(&id)) {
                        self.state.update(|s| s.set_active(&id, confirmed));
                    }
                    self.notifier.error(&e);
                }
            }
        });
    }
}

#[component]
pub fn CouponsList(event_id: String) -> impl IntoView {
    let event_id = StoredValue::new(event_id);
    let state = create_state();
    let notifier = use_notifier();
    let (loading, set_loading) = signal(false);
    // None: closed, Some(None): create, Some(Some(c)): edit
    let editing: RwSignal<Option<Option<CouponDto>>> = RwSignal::new(None);
    let sort = RwSignal::new(state.with_untracked(|s| s.sort.clone()));
    let tracker = RwSignal::new(ToggleTracker::default());
    let debounce = StoredValue::new_local(KeyedDebounce::new());
    let sender = ToggleSender {
        event_id,
        state,
        tracker,
        notifier,
    };

    on_cleanup(move || {
        debounce.try_update_value(|d| d.cancel_all());
    });

    let load_data = move || {
        set_loading.set(true);
        let event = event_id.get_value();
        let filters = state.with_untracked(|s| s.filters.clone());
        spawn_local(async move {
            match api::fetch_coupons(&event, &filters).await {
                Ok(page) => {
                    let mut refetch = false;
                    state.update(|s| {
                        let (items, stale) = s.filters.apply_response(page);
                        s.items = items;
                        s.is_loaded = true;
                        refetch = stale;
                    });
                    if refetch {
                        let filters = state.with_untracked(|s| s.filters.clone());
                        if let Ok(page) = api::fetch_coupons(&event, &filters).await {
                            state.update(|s| s.items = s.filters.apply_response(page).0);
                        }
                    }
                }
                Err(e) => notifier.error(&e),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data();
        }
    });

    Effect::new(move |_| {
        let current = sort.get();
        state.update(|s| s.sort = current);
    });

    let toggle = move |coupon: &CouponDto| {
        let id = coupon.id.clone();
        let Some(shown) = tracker.try_update(|t| t.flip(&id, coupon.active)) else {
            return;
        };
        state.update(|s| s.set_active(&id, shown));
        debounce.update_value(|d| {
            let key = id.clone();
            d.schedule(&key, TOGGLE_DEBOUNCE_MS, move || {
                if tracker.try_update(|t| t.due(&id)) == Some(true) {
                    sender.send(id);
                }
            });
        });
    };

    let search = RwSignal::new(String::new());
    let active_filter = RwSignal::new(String::new());

    let apply_filters = move || {
        state.update(|s| {
            s.filters.set(SEARCH, search.get_untracked().trim().to_uppercase());
            s.filters.set(ACTIVE, active_filter.get_untracked());
        });
        load_data();
    };

    Effect::new(move |prev: Option<String>| {
        let current = active_filter.get();
        if prev.is_some_and(|p| p != current) {
            apply_filters();
        }
        current
    });

    let go_to_page = move |page: u32| {
        state.update(|s| s.filters.set_page(page));
        load_data();
    };

    let change_page_size = move |size: u32| {
        state.update(|s| s.filters.set_limit(size));
        load_data();
    };

    let delete_coupon = move |coupon: CouponDto| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("Delete coupon {}?", coupon.code))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let event = event_id.get_value();
        spawn_local(async move {
            match api::delete_coupon(&event, &coupon.id).await {
                Ok(()) => {
                    notifier.success(format!("Coupon {} deleted", coupon.code));
                    load_data();
                }
                Err(e) => notifier.error(&e),
            }
        });
    };

    view! {
        <PageFrame page_id="a004_coupon--list" category=PageCategory::List>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Coupons"</h1>
                    <Badge>
                        {move || state.with(|s| s.filters.pagination.total.to_string())}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| editing.set(Some(None))>
                        {icon("plus")}
                        " New coupon"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <div
                                style="flex: 1; max-width: 260px;"
                                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                    if ev.key() == "Enter" {
                                        apply_filters();
                                    }
                                }
                            >
                                <Input value=search placeholder="Code..." />
                            </div>
                            <Select value=active_filter>
                                <option value="">"All coupons"</option>
                                <option value="true">"Active"</option>
                                <option value="false">"Inactive"</option>
                            </Select>
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| apply_filters()>
                                "Search"
                            </Button>
                        </Flex>
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=140.0>
                                    <SortHeader label="Code" field="code" sort=sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=90.0>
                                    <SortHeader label="Discount" field="amount" sort=sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=90.0>
                                    <SortHeader label="Used" field="used" sort=sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=130.0>"Valid from"</TableHeaderCell>
                                <TableHeaderCell min_width=130.0>
                                    <SortHeader label="Valid until" field="valid_until" sort=sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"State"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>
                                    <SortHeader label="Active" field="active" sort=sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=90.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || state.with(|s| s.sorted_items())
                                key=|c| (c.id.clone(), c.active, c.used_count, c.code.clone())
                                children=move |coupon| {
                                    let id = coupon.id.clone();
                                    let for_toggle = coupon.clone();
                                    let for_edit = coupon.clone();
                                    let for_delete = coupon.clone();
                                    let pending = move || tracker.with(|t| t.is_pending(&id));
                                    let row = CouponRow::from(&coupon);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <code class="coupon__code">{row.code}</code>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{row.discount}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{row.usage}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{row.valid_from}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{row.valid_until}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{row.availability}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <label class="switch" class:switch--pending=pending>
                                                    <input
                                                        type="checkbox"
                                                        prop:checked=row.active
                                                        on:change=move |_| toggle(&for_toggle)
                                                    />
                                                    <span class="switch__slider"></span>
                                                </label>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| editing.set(Some(Some(for_edit.clone())))
                                                    attr:title="Edit"
                                                >
                                                    {icon("edit")}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| delete_coupon(for_delete.clone())
                                                    attr:title="Delete"
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <PaginationControls
                    state=Signal::derive(move || state.with(|s| s.filters.pagination))
                    on_page_change=Callback::new(go_to_page)
                    on_page_size_change=Callback::new(change_page_size)
                />

                {move || editing.get().map(|coupon| view! {
                    <CouponForm
                        event_id=event_id.get_value()
                        coupon=coupon
                        on_close=move || editing.set(None)
                        on_saved=move || {
                            editing.set(None);
                            load_data();
                        }
                    />
                })}
            </div>
        </PageFrame>
    }
}
