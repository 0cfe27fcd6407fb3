use leptos::prelude::*;
use leptos::task::spawn_local;
use stagetrack::NavTicket;
use stagetrack::shared::protocol::CreateResponsibleRequest;
use stagetrack::shared::{Enterprise, ResponsibleStage};
use stagetrack::views::contacts::sort_responsibles;
use stagetrack::views::feedback::{UserAction, failure_message};
use stagetrack::views::registration::MSG_MISSING_FIELDS;

use crate::auth::use_auth;
use crate::components::feedback::{AlertList, Alerts, Flash, Loader};
use crate::web::router::{still_current, use_router};

#[derive(Debug, Clone, Default)]
struct PageData {
    responsibles: Vec<ResponsibleStage>,
    enterprises: Vec<Enterprise>,
}

/// 实习负责人列表（教师）
#[component]
pub fn ResponsiblePage(ticket: NavTicket) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let alerts = Alerts::new();
    let flash = use_context::<Flash>();
    let data = RwSignal::new(None::<PageData>);

    {
        let ticket = ticket.clone();
        spawn_local(async move {
            let api = auth.api();
            let result = load_page(&api).await;
            if !still_current(&ticket, "responsibles") {
                return;
            }
            match result {
                Ok(loaded) => data.set(Some(loaded)),
                Err(e) => alerts.error(failure_message(UserAction::LoadPage, &e)),
            }
        });
    }

    let ticket = StoredValue::new_local(ticket);
    let last_name = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let phone_number = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let enterprise = RwSignal::new(None::<i32>);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id_enterprise) = enterprise.get() else {
            alerts.error(MSG_MISSING_FIELDS);
            return;
        };
        let request = CreateResponsibleRequest {
            last_name: last_name.get().trim().to_string(),
            first_name: first_name.get().trim().to_string(),
            phone_number: phone_number.get().trim().to_string(),
            email: email.get().trim().to_string(),
            enterprise: id_enterprise,
        };
        if request.last_name.is_empty() || request.first_name.is_empty() || request.phone_number.is_empty() {
            alerts.error(MSG_MISSING_FIELDS);
            return;
        }

        let ticket = ticket.get_value();
        spawn_local(async move {
            let result = auth.api().create_responsible(&request).await;
            if !still_current(&ticket, "create responsible") {
                return;
            }
            match result {
                Ok(()) => {
                    if let Some(flash) = flash {
                        flash.success("Responsable ajouté");
                    }
                    router.reload(&ticket);
                }
                Err(e) => alerts.error(failure_message(UserAction::CreateResponsible, &e)),
            }
        });
    };

    let enterprise_name = move |id: i32| {
        data.with(|d| {
            d.as_ref()
                .and_then(|d| d.enterprises.iter().find(|e| e.id_enterprise == id))
                .map(|e| e.display_name())
                .unwrap_or_default()
        })
    };

    let input = move |placeholder: &'static str, value: RwSignal<String>| {
        view! {
            <input
                type="text"
                placeholder=placeholder
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=value
                class="input input-bordered w-full"
            />
        }
    };

    view! {
        <div class="space-y-6">
            <AlertList alerts=alerts />
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <h2 class="card-title p-6 pb-2">"Responsables de stage"</h2>
                    <Show when=move || data.with(|d| d.is_some()) fallback=|| view! { <Loader /> }>
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Nom"</th>
                                        <th>"Prénom"</th>
                                        <th>"Téléphone"</th>
                                        <th>"Email"</th>
                                        <th>"Entreprise"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || data.with(|d| d.as_ref().map(|d| d.responsibles.clone()).unwrap_or_default())
                                        key=|r| r.id
                                        children=move |r| {
                                            view! {
                                                <tr>
                                                    <td>{r.last_name}</td>
                                                    <td>{r.first_name}</td>
                                                    <td>{r.phone_number}</td>
                                                    <td>{r.email.unwrap_or_default()}</td>
                                                    <td>{enterprise_name(r.enterprise)}</td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </Show>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=on_submit>
                    <h2 class="card-title">"Ajouter un responsable"</h2>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        {input("Nom", last_name)}
                        {input("Prénom", first_name)}
                        {input("Téléphone", phone_number)}
                        {input("Email", email)}
                    </div>
                    <select
                        class="select select-bordered w-full"
                        on:change=move |ev| enterprise.set(event_target_value(&ev).parse().ok())
                    >
                        <option value="">"Choisir une entreprise"</option>
                        {move || {
                            data.with(|d| {
                                d.as_ref()
                                    .map(|d| {
                                        d.enterprises
                                            .iter()
                                            .map(|e| {
                                                view! {
                                                    <option value=e.id_enterprise.to_string()>
                                                        {e.display_name()}
                                                    </option>
                                                }
                                            })
                                            .collect_view()
                                    })
                            })
                        }}
                    </select>
                    <div class="form-control mt-4">
                        <button class="btn btn-primary">"Ajouter"</button>
                    </div>
                </form>
            </div>
        </div>
    }
}

async fn load_page(api: &crate::auth::Api) -> stagetrack::ApiResult<PageData> {
    let mut responsibles = api.responsibles().await?;
    let enterprises = api.enterprises().await?;
    sort_responsibles(&mut responsibles);
    Ok(PageData {
        responsibles,
        enterprises,
    })
}
