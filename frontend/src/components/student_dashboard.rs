//! 学生面板
//!
//! - 实习卡片（可修改实习主题）
//! - 联系状态统计与联系表格（状态变更、接受后创建实习）
//! - 企业列表（筛选、联系、新建企业）

mod accept_dialog;
mod contacts_table;
mod enterprise_form;

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use stagetrack::shared::{Contact, Enterprise};
use stagetrack::views::contacts::{can_contact, status_summary};
use stagetrack::views::dashboard::StudentDashboardData;
use stagetrack::views::enterprises::matches_filter;
use stagetrack::views::feedback::{UserAction, failure_message};
use stagetrack::{ApiResult, NavTicket};

use crate::auth::use_auth;
use crate::components::feedback::{AlertList, Alerts, Flash, Loader};
use crate::web::router::{RouterService, still_current, use_router};

use accept_dialog::AcceptDialog;
use contacts_table::ContactsTable;
use enterprise_form::CreateEnterpriseDialog;

const MSG_PROJECT_REQUIRED: &str = "Veuillez indiquer un sujet";

/// 面板内各子组件共享的句柄
#[derive(Clone, Copy)]
pub(super) struct DashboardCtx {
    data: RwSignal<Option<StudentDashboardData>>,
    ticket: StoredValue<NavTicket, LocalStorage>,
    alerts: Alerts,
    router: RouterService,
    flash: Option<Flash>,
}

impl DashboardCtx {
    /// 执行一次变更：成功后重新挂载面板，失败时在面板顶部提示
    fn mutate<F>(self, what: &'static str, action: UserAction, success: Option<&'static str>, fut: F)
    where
        F: Future<Output = ApiResult<()>> + 'static,
    {
        let ticket = self.ticket.get_value();
        spawn_local(async move {
            let result = fut.await;
            if !still_current(&ticket, what) {
                return;
            }
            match result {
                Ok(()) => {
                    if let (Some(flash), Some(message)) = (self.flash, success) {
                        flash.success(message);
                    }
                    self.router.reload(&ticket);
                }
                Err(e) => self.alerts.error(failure_message(action, &e)),
            }
        });
    }

    fn with_data<R: Default>(&self, f: impl FnOnce(&StudentDashboardData) -> R) -> R {
        self.data.with(|d| d.as_ref().map(f).unwrap_or_default())
    }
}

#[component]
pub fn StudentDashboardPage(ticket: NavTicket) -> impl IntoView {
    let auth = use_auth();
    let alerts = Alerts::new();
    let data = RwSignal::new(None::<StudentDashboardData>);

    {
        let ticket = ticket.clone();
        spawn_local(async move {
            let result = StudentDashboardData::load(&auth.api()).await;
            if !still_current(&ticket, "student dashboard") {
                return;
            }
            match result {
                Ok(loaded) => data.set(Some(loaded)),
                Err(e) => alerts.error(failure_message(UserAction::LoadPage, &e)),
            }
        });
    }

    let ctx = DashboardCtx {
        data,
        ticket: StoredValue::new_local(ticket),
        alerts,
        router: use_router(),
        flash: use_context::<Flash>(),
    };
    let accepting = RwSignal::new(None::<Contact>);

    view! {
        <div class="space-y-6">
            <AlertList alerts=alerts />
            <Show when=move || data.with(|d| d.is_some()) fallback=|| view! { <Loader /> }>
                <StageCard ctx=ctx />
                <StatusSummary ctx=ctx />
                <ContactsTable ctx=ctx accepting=accepting />
                <EnterpriseList ctx=ctx />
            </Show>
        </div>
        <AcceptDialog ctx=ctx accepting=accepting />
    }
}

/// 实习卡片；没有实习时不显示
#[component]
fn StageCard(ctx: DashboardCtx) -> impl IntoView {
    let auth = use_auth();
    let project = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = project.get().trim().to_string();
        if text.is_empty() {
            ctx.alerts.error(MSG_PROJECT_REQUIRED);
            return;
        }
        let Some(stage) = ctx.with_data(|d| d.stage.clone()) else {
            return;
        };
        let api = auth.api();
        ctx.mutate(
            "change project",
            UserAction::ChangeProject,
            Some("Sujet modifié"),
            async move { api.change_internship_project(&stage, &text).await },
        );
    };

    move || {
        ctx.with_data(|d| {
            let stage = d.stage.clone()?;
            let enterprise = d
                .stage_enterprise
                .as_ref()
                .map(|e| e.display_name())
                .unwrap_or_default();
            let supervisor = d
                .supervisor()
                .map(|r| format!("{} {}", r.last_name, r.first_name))
                .unwrap_or_default();
            Some(view! {
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">"Mon stage"</h2>
                        <dl class="grid grid-cols-1 md:grid-cols-2 gap-2">
                            <div><dt class="font-semibold">"Entreprise"</dt><dd>{enterprise}</dd></div>
                            <div><dt class="font-semibold">"Responsable"</dt><dd>{supervisor}</dd></div>
                            <div>
                                <dt class="font-semibold">"Sujet"</dt>
                                <dd>{stage.internship_project.unwrap_or_default()}</dd>
                            </div>
                            <div>
                                <dt class="font-semibold">"Date de signature"</dt>
                                <dd>{stage.signature_date.unwrap_or_default()}</dd>
                            </div>
                        </dl>
                        <form class="flex gap-2 mt-4" on:submit=on_submit>
                            <input
                                type="text"
                                placeholder="Nouveau sujet"
                                class="input input-bordered flex-1"
                                on:input=move |ev| project.set(event_target_value(&ev))
                                prop:value=project
                            />
                            <button class="btn btn-primary">"Modifier le sujet"</button>
                        </form>
                    </div>
                </div>
            })
        })
    }
}

#[component]
fn StatusSummary(ctx: DashboardCtx) -> impl IntoView {
    let rows = move || ctx.with_data(|d| status_summary(&d.contacts));

    view! {
        <div class="stats stats-vertical md:stats-horizontal shadow w-full">
            {move || {
                rows()
                    .into_iter()
                    .map(|(status, count)| {
                        view! {
                            <div class="stat">
                                <div class="stat-title">{status.label()}</div>
                                <div class="stat-value text-2xl">{count}</div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

/// 企业列表：筛选 + 联系按钮
#[component]
fn EnterpriseList(ctx: DashboardCtx) -> impl IntoView {
    let auth = use_auth();
    let term = RwSignal::new(String::new());
    let creating = RwSignal::new(false);

    let contact = move |enterprise: &Enterprise| {
        let api = auth.api();
        let id = enterprise.id_enterprise;
        ctx.mutate(
            "add contact",
            UserAction::AddContact,
            Some("Entreprise contactée"),
            async move { api.add_contact(id).await },
        );
    };

    let rows = move || {
        let term = term.get();
        ctx.with_data(|d| {
            d.enterprises
                .iter()
                .filter(|e| matches_filter(e, &term))
                .map(|e| (e.clone(), can_contact(e, &d.contacts.contacts)))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex flex-wrap justify-between items-center gap-4">
                    <h2 class="card-title">"Entreprises"</h2>
                    <div class="flex gap-2">
                        <input
                            type="search"
                            placeholder="Filtrer"
                            class="input input-bordered input-sm"
                            on:input=move |ev| term.set(event_target_value(&ev))
                            prop:value=term
                        />
                        <button class="btn btn-sm btn-secondary" on:click=move |_| creating.set(true)>
                            "Ajouter une entreprise"
                        </button>
                    </div>
                </div>
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Entreprise"</th>
                                <th>"Adresse"</th>
                                <th>"Téléphone"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                rows()
                                    .into_iter()
                                    .map(|(enterprise, contactable)| {
                                        let target = enterprise.clone();
                                        let phone = enterprise.phone_number.clone().unwrap_or_default();
                                        view! {
                                            <tr>
                                                <td>{enterprise.display_name()}</td>
                                                <td>{enterprise.address()}</td>
                                                <td>{phone}</td>
                                                <td>
                                                    {contactable
                                                        .then(|| {
                                                            view! {
                                                                <button
                                                                    class="btn btn-primary btn-xs"
                                                                    on:click=move |_| contact(&target)
                                                                >
                                                                    "Contacter"
                                                                </button>
                                                            }
                                                        })}
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
        <CreateEnterpriseDialog ctx=ctx open=creating />
    }
}
