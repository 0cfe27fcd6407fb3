use chrono::{Local, NaiveDate};
use leptos::prelude::*;
use stagetrack::shared::Contact;
use stagetrack::views::contacts::{AcceptForm, responsibles_for_enterprise};
use stagetrack::views::dashboard::accept_contact;
use stagetrack::views::feedback::UserAction;

use super::DashboardCtx;
use crate::auth::use_auth;
use crate::components::modal::Modal;

/// 接受联系：选择负责人、填写主题和签约日期
#[component]
pub(super) fn AcceptDialog(ctx: DashboardCtx, accepting: RwSignal<Option<Contact>>) -> impl IntoView {
    let auth = use_auth();
    let open = RwSignal::new(false);
    let responsible_id = RwSignal::new(None::<i32>);
    let project = RwSignal::new(String::new());
    let signature_date = RwSignal::new(today());

    // 每次打开都从空表单开始
    Effect::new(move |_| {
        if accepting.with(|c| c.is_some()) {
            let form = AcceptForm::new(today());
            responsible_id.set(form.responsible_id);
            project.set(form.project);
            signature_date.set(form.signature_date);
            open.set(true);
        }
    });
    Effect::new(move |_| {
        if !open.get() {
            accepting.set(None);
        }
    });

    let title = Signal::derive(move || {
        accepting.with(|c| {
            c.as_ref()
                .and_then(|c| c.enterprise_dto.as_ref())
                .map(|e| format!("Accepter : {}", e.display_name()))
                .unwrap_or_else(|| "Accepter".to_string())
        })
    });

    let responsibles = move || {
        let Some(id_enterprise) = accepting.with(|c| c.as_ref().map(|c| c.enterprise)) else {
            return Vec::new();
        };
        ctx.with_data(|d| {
            responsibles_for_enterprise(&d.responsibles, id_enterprise)
                .into_iter()
                .map(|r| (r.id, format!("{} {}", r.last_name, r.first_name)))
                .collect::<Vec<_>>()
        })
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(contact) = accepting.get_untracked() else {
            return;
        };
        let form = AcceptForm {
            responsible_id: responsible_id.get_untracked(),
            project: project.get_untracked(),
            signature_date: signature_date.get_untracked(),
        };
        let request = match form.to_request(&contact) {
            Ok(request) => request,
            Err(msg) => {
                ctx.alerts.error(msg);
                return;
            }
        };
        open.set(false);
        let api = auth.api();
        ctx.mutate(
            "accept contact",
            UserAction::CreateStage,
            Some("Stage enregistré"),
            async move { accept_contact(&api, &contact, &request).await },
        );
    };

    view! {
        <Modal open=open title=title>
            <form class="space-y-4" on:submit=on_submit>
                <div class="form-control">
                    <label class="label" for="responsible">
                        <span class="label-text">"Responsable de stage"</span>
                    </label>
                    <select
                        id="responsible"
                        class="select select-bordered"
                        on:change=move |ev| responsible_id.set(event_target_value(&ev).parse().ok())
                    >
                        <option value="" selected=move || responsible_id.get().is_none()>
                            "Choisir un responsable"
                        </option>
                        {move || {
                            responsibles()
                                .into_iter()
                                .map(|(id, name)| {
                                    view! { <option value=id.to_string()>{name}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </div>
                <div class="form-control">
                    <label class="label" for="project">
                        <span class="label-text">"Sujet du stage"</span>
                    </label>
                    <input
                        id="project"
                        type="text"
                        class="input input-bordered"
                        on:input=move |ev| project.set(event_target_value(&ev))
                        prop:value=project
                    />
                </div>
                <div class="form-control">
                    <label class="label" for="signatureDate">
                        <span class="label-text">"Date de signature"</span>
                    </label>
                    <input
                        id="signatureDate"
                        type="date"
                        class="input input-bordered"
                        prop:value=move || signature_date.get().to_string()
                        on:change=move |ev| {
                            if let Ok(date) = event_target_value(&ev).parse::<NaiveDate>() {
                                signature_date.set(date);
                            }
                        }
                    />
                </div>
                <button class="btn btn-primary w-full">"Confirmer"</button>
            </form>
        </Modal>
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
