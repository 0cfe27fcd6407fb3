use leptos::prelude::*;
use leptos::task::spawn_local;
use stagetrack::NavTicket;
use stagetrack::shared::{Contact, ContactStatus, Stage, UserIdentity};
use stagetrack::views::feedback::{UserAction, failure_message};
use stagetrack::views::search::{SearchFilter, shows_contacts, year_options};

use crate::auth::use_auth;
use crate::components::feedback::{AlertList, Alerts, Loader};
use crate::components::modal::Modal;
use crate::web::router::still_current;

/// 学生详情弹窗的数据
#[derive(Debug, Clone)]
struct StudentDetail {
    student: UserIdentity,
    contacts: Vec<Contact>,
    stage: Option<Stage>,
}

#[component]
pub fn SearchPage(ticket: NavTicket) -> impl IntoView {
    let auth = use_auth();
    let alerts = Alerts::new();
    let users = RwSignal::new(None::<Vec<UserIdentity>>);

    {
        let ticket = ticket.clone();
        spawn_local(async move {
            let result = auth.api().list_users().await;
            if !still_current(&ticket, "search") {
                return;
            }
            match result {
                Ok(list) => users.set(Some(list)),
                Err(e) => alerts.error(failure_message(UserAction::LoadPage, &e)),
            }
        });
    }

    let ticket = StoredValue::new_local(ticket);
    let term = RwSignal::new(String::new());
    let year = RwSignal::new(None::<String>);
    let students_only = RwSignal::new(false);

    let detail = RwSignal::new(None::<StudentDetail>);
    let modal_open = RwSignal::new(false);

    let open_student = move |student: UserIdentity| {
        let ticket = ticket.get_value();
        spawn_local(async move {
            let api = auth.api();
            let result = match api.user_contacts(student.id).await {
                Ok(contacts) => {
                    // 只有存在已接受的联系时才会有实习
                    let accepted = contacts
                        .iter()
                        .any(|c| c.contact_status == ContactStatus::Accepted);
                    let stage = if accepted {
                        api.student_stage(student.id).await
                    } else {
                        Ok(None)
                    };
                    stage.map(|stage| StudentDetail {
                        student,
                        contacts,
                        stage,
                    })
                }
                Err(e) => Err(e),
            };
            if !still_current(&ticket, "student detail") {
                return;
            }
            match result {
                Ok(loaded) => {
                    detail.set(Some(loaded));
                    modal_open.set(true);
                }
                Err(e) => alerts.error(failure_message(UserAction::LoadPage, &e)),
            }
        });
    };

    let results = move || {
        let filter = SearchFilter {
            term: term.get(),
            year: year.get(),
            students_only: students_only.get(),
        };
        users.with(|list| {
            list.as_deref()
                .map(|list| filter.apply(list).into_iter().cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };

    let modal_title = Signal::derive(move || {
        detail.with(|d| {
            d.as_ref()
                .map(|d| d.student.full_name())
                .unwrap_or_default()
        })
    });

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"Recherche"</h2>
                <AlertList alerts=alerts />

                <div class="flex flex-wrap gap-4 items-center">
                    <input
                        type="search"
                        placeholder="Nom ou prénom"
                        class="input input-bordered w-full max-w-xs"
                        on:input=move |ev| term.set(event_target_value(&ev))
                        prop:value=term
                    />
                    <select
                        class="select select-bordered"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            year.set(if value.is_empty() { None } else { Some(value) });
                        }
                    >
                        {move || {
                            users
                                .with(|list| year_options(list.as_deref().unwrap_or_default()))
                                .into_iter()
                                .map(|(value, label)| {
                                    view! {
                                        <option value=value.unwrap_or_default()>{label}</option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                    <label class="label cursor-pointer gap-2">
                        <input
                            type="checkbox"
                            class="checkbox checkbox-sm"
                            prop:checked=students_only
                            on:change=move |ev| students_only.set(event_target_checked(&ev))
                        />
                        <span class="label-text">"Étudiants uniquement"</span>
                    </label>
                </div>

                <Show when=move || users.with(|u| u.is_some()) fallback=|| view! { <Loader /> }>
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Nom"</th>
                                    <th>"Prénom"</th>
                                    <th>"Rôle"</th>
                                    <th>"Année académique"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=results
                                    key=|u| u.id
                                    children=move |user| {
                                        let student = shows_contacts(&user).then(|| user.clone());
                                        view! {
                                            <tr>
                                                <td>{user.last_name}</td>
                                                <td>{user.first_name}</td>
                                                <td>{user.role.display_name()}</td>
                                                <td>{user.school_year.unwrap_or_default()}</td>
                                                <td>
                                                    {student
                                                        .map(|student| {
                                                            view! {
                                                                <button
                                                                    class="btn btn-ghost btn-xs"
                                                                    on:click=move |_| open_student(student.clone())
                                                                >
                                                                    "Contacts"
                                                                </button>
                                                            }
                                                        })}
                                                </td>
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

        <Modal open=modal_open title=modal_title>
            {move || detail.get().map(|d| view! { <StudentDetailView detail=d /> })}
        </Modal>
    }
}

#[component]
fn StudentDetailView(detail: StudentDetail) -> impl IntoView {
    let StudentDetail { contacts, stage, .. } = detail;

    view! {
        {stage
            .map(|stage| {
                view! {
                    <div class="alert mb-4">
                        <span>
                            "Stage : "
                            {stage.internship_project.unwrap_or_default()}
                            " (signé le "
                            {stage.signature_date.unwrap_or_default()}
                            ")"
                        </span>
                    </div>
                }
            })}
        {if contacts.is_empty() {
            view! { <p class="text-base-content/70">"Aucun contact"</p> }.into_any()
        } else {
            view! {
                <table class="table table-sm w-full">
                    <thead>
                        <tr>
                            <th>"Entreprise"</th>
                            <th>"État"</th>
                            <th>"Lieu de rencontre"</th>
                            <th>"Raison du refus"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {contacts
                            .into_iter()
                            .map(|c| {
                                view! {
                                    <tr>
                                        <td>
                                            {c
                                                .enterprise_dto
                                                .as_ref()
                                                .map(|e| e.display_name())
                                                .unwrap_or_default()}
                                        </td>
                                        <td>{c.contact_status.label()}</td>
                                        <td>{c.meeting_place.unwrap_or_default()}</td>
                                        <td>{c.reason_for_refusal.unwrap_or_default()}</td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            }
                .into_any()
        }}
    }
}
