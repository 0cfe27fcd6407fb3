//! 教师面板
//!
//! 学年统计卡片 + 可排序的企业表格；点击企业打开详情弹窗，可查看联系并拉黑。

use leptos::prelude::*;
use leptos::task::spawn_local;
use stagetrack::NavTicket;
use stagetrack::shared::{Contact, Enterprise};
use stagetrack::views::dashboard::TeacherDashboardData;
use stagetrack::views::enterprises::{
    SortKey, SortOrder, SortState, by_student_last_name, sort_enterprises, student_count,
    year_options,
};
use stagetrack::views::feedback::{UserAction, failure_message};

use crate::auth::use_auth;
use crate::components::feedback::{AlertList, Alerts, Flash, Loader};
use crate::components::modal::Modal;
use crate::web::router::{still_current, use_router};

const MSG_BLACKLISTED: &str = "Entreprise blacklistée";
const MSG_BLACKLIST_REASON: &str = "Veuillez indiquer une raison";

const COLUMNS: [(SortKey, &str); 5] = [
    (SortKey::TradeName, "Nom"),
    (SortKey::Designation, "Appellation"),
    (SortKey::PostalCode, "Code postal"),
    (SortKey::NumberStudents, "Nombre d'étudiants"),
    (SortKey::IsBlacklisted, "Blacklistée"),
];

/// 当前打开的企业及其联系
#[derive(Debug, Clone)]
struct EnterpriseDetail {
    enterprise: Enterprise,
    contacts: Vec<Contact>,
}

#[component]
pub fn TeacherDashboardPage(ticket: NavTicket) -> impl IntoView {
    let auth = use_auth();
    let alerts = Alerts::new();
    let data = RwSignal::new(None::<TeacherDashboardData>);
    let year = RwSignal::new(String::new());
    let sort = RwSignal::new(SortState::default());

    {
        let ticket = ticket.clone();
        spawn_local(async move {
            let result = TeacherDashboardData::load(&auth.api()).await;
            if !still_current(&ticket, "teacher dashboard") {
                return;
            }
            match result {
                Ok(loaded) => {
                    year.set(loaded.default_year());
                    data.set(Some(loaded));
                }
                Err(e) => alerts.error(failure_message(UserAction::LoadPage, &e)),
            }
        });
    }

    let ticket = StoredValue::new_local(ticket);
    let detail = RwSignal::new(None::<EnterpriseDetail>);
    let modal_open = RwSignal::new(false);

    let open_enterprise = move |enterprise: Enterprise| {
        let ticket = ticket.get_value();
        spawn_local(async move {
            let result = auth
                .api()
                .enterprise_contacts(enterprise.id_enterprise)
                .await;
            if !still_current(&ticket, "enterprise contacts") {
                return;
            }
            match result {
                Ok(mut contacts) => {
                    contacts.sort_by(by_student_last_name);
                    detail.set(Some(EnterpriseDetail {
                        enterprise,
                        contacts,
                    }));
                    modal_open.set(true);
                }
                Err(e) => alerts.error(failure_message(UserAction::LoadPage, &e)),
            }
        });
    };

    let rows = move || {
        let (key, order) = sort.with(|s| s.active());
        let year = year.get();
        data.with(|d| {
            d.as_ref()
                .map(|d| {
                    let mut list = d.enterprises.clone();
                    sort_enterprises(&mut list, key, order, &d.enterprise_stats, &year);
                    list.into_iter()
                        .map(|e| {
                            let count = student_count(&d.enterprise_stats, e.id_enterprise, &year);
                            (e, count)
                        })
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    let summary = move || {
        data.with(|d| {
            d.as_ref()
                .map(|d| d.year_summary(&year.get()))
                .unwrap_or_default()
        })
    };

    let arrow = move |key: SortKey| {
        let (active, order) = sort.with(|s| s.active());
        match (active == key, order) {
            (false, _) => "",
            (true, SortOrder::Asc) => " ▲",
            (true, SortOrder::Desc) => " ▼",
        }
    };

    let modal_title = Signal::derive(move || {
        detail.with(|d| {
            d.as_ref()
                .map(|d| d.enterprise.display_name())
                .unwrap_or_default()
        })
    });

    view! {
        <div class="space-y-6">
            <AlertList alerts=alerts />
            <Show when=move || data.with(|d| d.is_some()) fallback=|| view! { <Loader /> }>
                <div class="flex flex-wrap items-center gap-4">
                    <select
                        class="select select-bordered"
                        on:change=move |ev| year.set(event_target_value(&ev))
                    >
                        {move || {
                            data.with(|d| {
                                d.as_ref()
                                    .map(|d| year_options(&d.stage_stats))
                                    .unwrap_or_default()
                            })
                                .into_iter()
                                .map(|(value, label)| {
                                    let selected = value == year.get_untracked();
                                    view! {
                                        <option value=value selected=selected>
                                            {label}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                    <div class="stats shadow">
                        <div class="stat">
                            <div class="stat-title">"Avec stage"</div>
                            <div class="stat-value text-success">{move || summary().with_stage}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"Sans stage"</div>
                            <div class="stat-value text-warning">{move || summary().without_stage}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"Total"</div>
                            <div class="stat-value">{move || summary().total()}</div>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    {COLUMNS
                                        .iter()
                                        .map(|&(key, label)| {
                                            view! {
                                                <th
                                                    class="cursor-pointer select-none"
                                                    on:click=move |_| {
                                                        sort.update(|s| {
                                                            s.click(key);
                                                        })
                                                    }
                                                >
                                                    {label}
                                                    {move || arrow(key)}
                                                </th>
                                            }
                                        })
                                        .collect_view()}
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    rows()
                                        .into_iter()
                                        .map(|(enterprise, count)| {
                                            let row_class = if enterprise.is_blacklisted {
                                                "hover cursor-pointer text-error"
                                            } else {
                                                "hover cursor-pointer"
                                            };
                                            let opened = enterprise.clone();
                                            view! {
                                                <tr
                                                    class=row_class
                                                    on:click=move |_| open_enterprise(opened.clone())
                                                >
                                                    <td>{enterprise.trade_name}</td>
                                                    <td>{enterprise.designation.unwrap_or_default()}</td>
                                                    <td>{enterprise.postal_code}</td>
                                                    <td>{count}</td>
                                                    <td>{if enterprise.is_blacklisted { "Oui" } else { "Non" }}</td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>
                    </div>
                </div>
            </Show>
        </div>

        <Modal open=modal_open title=modal_title>
            {move || {
                detail
                    .get()
                    .map(|d| view! { <EnterpriseDetailView detail=d ticket=ticket.get_value() /> })
            }}
        </Modal>
    }
}

#[component]
fn EnterpriseDetailView(detail: EnterpriseDetail, ticket: NavTicket) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let alerts = Alerts::new();
    let flash = use_context::<Flash>();
    let ticket = StoredValue::new_local(ticket);
    let reason = RwSignal::new(String::new());

    let EnterpriseDetail {
        enterprise,
        contacts,
    } = detail;
    let blacklisted = enterprise.is_blacklisted;
    let blacklisted_reason = enterprise.blacklisted_reason.clone().unwrap_or_default();
    let address = enterprise.address();
    let target = StoredValue::new(enterprise);

    let on_blacklist = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = reason.get().trim().to_string();
        if text.is_empty() {
            alerts.error(MSG_BLACKLIST_REASON);
            return;
        }
        let enterprise = target.get_value();
        let ticket = ticket.get_value();
        spawn_local(async move {
            let result = auth.api().blacklist_enterprise(&enterprise, &text).await;
            if !still_current(&ticket, "blacklist") {
                return;
            }
            match result {
                Ok(()) => {
                    if let Some(flash) = flash {
                        flash.success(MSG_BLACKLISTED);
                    }
                    router.reload(&ticket);
                }
                Err(e) => alerts.error(failure_message(UserAction::Blacklist, &e)),
            }
        });
    };

    view! {
        <p class="text-sm text-base-content/70 mb-2">{address}</p>
        <AlertList alerts=alerts />
        {if contacts.is_empty() {
            view! { <p>"Aucun contact pour cette entreprise"</p> }.into_any()
        } else {
            view! {
                <table class="table table-sm w-full">
                    <thead>
                        <tr>
                            <th>"Étudiant"</th>
                            <th>"État"</th>
                            <th>"Année académique"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {contacts
                            .into_iter()
                            .map(|c| {
                                view! {
                                    <tr>
                                        <td>{c.user_dto.map(|u| u.full_name()).unwrap_or_default()}</td>
                                        <td>{c.contact_status.label()}</td>
                                        <td>{c.school_year.unwrap_or_default()}</td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            }
                .into_any()
        }}
        {if blacklisted {
            view! {
                <div class="alert alert-error mt-4">
                    <span>"Blacklistée : " {blacklisted_reason}</span>
                </div>
            }
                .into_any()
        } else {
            view! {
                <form class="mt-4 flex gap-2" on:submit=on_blacklist>
                    <input
                        type="text"
                        placeholder="Raison"
                        class="input input-bordered flex-1"
                        on:input=move |ev| reason.set(event_target_value(&ev))
                        prop:value=reason
                    />
                    <button class="btn btn-error">"Blacklister"</button>
                </form>
            }
                .into_any()
        }}
    }
}
