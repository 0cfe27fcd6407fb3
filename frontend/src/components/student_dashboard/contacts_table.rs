//! 联系表格
//!
//! "Pris" 需要会面地点，"Refusé" 需要拒绝原因，两者先在行内展开输入框；
//! "Accepté" 打开接受对话框；"Plus suivi" 直接提交。

use leptos::prelude::*;
use stagetrack::shared::Contact;
use stagetrack::views::contacts::{ContactAction, MEETING_PLACES, available_actions};
use stagetrack::views::feedback::UserAction;

use super::DashboardCtx;
use crate::auth::use_auth;

#[component]
pub(super) fn ContactsTable(ctx: DashboardCtx, accepting: RwSignal<Option<Contact>>) -> impl IntoView {
    let rows = move || {
        ctx.with_data(|d| {
            d.contacts
                .contacts
                .iter()
                .map(|c| {
                    let enterprise = d
                        .contact_enterprise(c)
                        .map(|e| e.display_name())
                        .unwrap_or_default();
                    let actions = available_actions(c.contact_status, d.has_stage());
                    (c.clone(), enterprise, actions)
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"Mes contacts"</h2>
                <div class="overflow-x-auto w-full">
                    <table class="table w-full">
                        <thead>
                            <tr>
                                <th>"Entreprise"</th>
                                <th>"État"</th>
                                <th>"Lieu de rencontre"</th>
                                <th>"Raison du refus"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                rows()
                                    .into_iter()
                                    .map(|(contact, enterprise, actions)| {
                                        view! {
                                            <ContactRow
                                                ctx=ctx
                                                accepting=accepting
                                                contact=contact
                                                enterprise=enterprise
                                                actions=actions
                                            />
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ContactRow(
    ctx: DashboardCtx,
    accepting: RwSignal<Option<Contact>>,
    contact: Contact,
    enterprise: String,
    actions: Vec<ContactAction>,
) -> impl IntoView {
    let auth = use_auth();
    // 行内展开的操作（需要补充输入）
    let pending = RwSignal::new(None::<ContactAction>);
    let input = RwSignal::new(String::new());

    let meeting_place = contact.meeting_place.clone().unwrap_or_default();
    let reason = contact.reason_for_refusal.clone().unwrap_or_default();
    let status = contact.contact_status.label();
    let contact = StoredValue::new(contact);

    let submit = move |action: ContactAction| {
        let transition = match action.transition(&input.get_untracked()) {
            Ok(transition) => transition,
            Err(msg) => {
                ctx.alerts.error(msg);
                return;
            }
        };
        let api = auth.api();
        let contact = contact.get_value();
        ctx.mutate(
            "contact status",
            UserAction::ChangeContactStatus,
            None,
            async move { api.change_contact_status(&contact, transition).await },
        );
    };

    let on_action = move |action: ContactAction| match action {
        ContactAction::Admit | ContactAction::TurnDown => {
            input.set(String::new());
            pending.set(Some(action));
        }
        ContactAction::Accept => accepting.set(Some(contact.get_value())),
        ContactAction::Unsupervise => submit(action),
    };

    let pending_input = move || {
        pending.get().map(|action| {
            let field = match action {
                ContactAction::Admit => view! {
                    <select
                        class="select select-bordered select-xs"
                        on:change=move |ev| input.set(event_target_value(&ev))
                    >
                        <option value="">"Lieu de rencontre"</option>
                        {MEETING_PLACES
                            .iter()
                            .map(|place| view! { <option value=*place>{*place}</option> })
                            .collect_view()}
                    </select>
                }
                    .into_any(),
                _ => view! {
                    <input
                        type="text"
                        placeholder="Raison du refus"
                        class="input input-bordered input-xs"
                        on:input=move |ev| input.set(event_target_value(&ev))
                        prop:value=input
                    />
                }
                    .into_any(),
            };
            view! {
                <div class="flex gap-1 mt-1">
                    {field}
                    <button class="btn btn-xs btn-primary" on:click=move |_| submit(action)>
                        "Valider"
                    </button>
                    <button class="btn btn-xs" on:click=move |_| pending.set(None)>
                        "Annuler"
                    </button>
                </div>
            }
        })
    };

    view! {
        <tr>
            <td>{enterprise}</td>
            <td>{status}</td>
            <td>{meeting_place}</td>
            <td>{reason}</td>
            <td>
                <div class="flex flex-wrap gap-1">
                    {actions
                        .into_iter()
                        .map(|action| {
                            view! {
                                <button class="btn btn-outline btn-xs" on:click=move |_| on_action(action)>
                                    {action.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                {pending_input}
            </td>
        </tr>
    }
}
