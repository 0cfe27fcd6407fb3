use leptos::prelude::*;
use leptos::task::spawn_local;
use stagetrack::NavTicket;
use stagetrack::auth::update_settings;
use stagetrack::views::feedback::{UserAction, failure_message};
use stagetrack::views::settings::{MSG_UPDATED, SettingsForm};

use crate::auth::use_auth;
use crate::components::feedback::{AlertList, Alerts, Flash};
use crate::web::router::{still_current, use_router};

#[component]
pub fn SettingsPage(ticket: NavTicket) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let alerts = Alerts::new();
    let flash = use_context::<Flash>();
    let ticket = StoredValue::new_local(ticket);
    let identity = auth.identity();

    let phone_number = RwSignal::new(String::new());
    let current_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let snapshot = move || SettingsForm {
        phone_number: phone_number.get(),
        current_password: current_password.get(),
        new_password: new_password.get(),
        confirm_password: confirm_password.get(),
    };
    let can_submit = move || snapshot().can_submit() && !is_submitting.get();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(user) = identity.get_untracked() else {
            return;
        };
        // 版本号原样回传最后一次收到的值
        let request = snapshot().to_request(user.version_number);
        let ticket = ticket.get_value();

        set_is_submitting.set(true);
        spawn_local(async move {
            let api = auth.api();
            let result = update_settings(&api, &request).await;
            if !still_current(&ticket, "settings") {
                return;
            }
            match result {
                Ok(_) => {
                    auth.sync();
                    if let Some(flash) = flash {
                        flash.success(MSG_UPDATED);
                    }
                    router.reload(&ticket);
                }
                Err(e) => {
                    alerts.error(failure_message(UserAction::EditSettings, &e));
                    set_is_submitting.set(false);
                }
            }
        });
    };

    let field = move |id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type=kind
                    on:input=move |ev| value.set(event_target_value(&ev))
                    prop:value=value
                    class="input input-bordered w-full"
                />
            </div>
        }
    };

    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">"Mes informations"</h2>
                    {move || {
                        identity
                            .get()
                            .map(|user| {
                                view! {
                                    <dl class="space-y-1">
                                        <div><dt class="font-semibold">"Nom"</dt><dd>{user.full_name()}</dd></div>
                                        <div><dt class="font-semibold">"Email"</dt><dd>{user.email}</dd></div>
                                        <div><dt class="font-semibold">"Téléphone"</dt><dd>{user.phone_number}</dd></div>
                                        <div><dt class="font-semibold">"Rôle"</dt><dd>{user.role.display_name()}</dd></div>
                                        <div>
                                            <dt class="font-semibold">"Inscrit le"</dt>
                                            <dd>{user.registration_date.unwrap_or_default()}</dd>
                                        </div>
                                    </dl>
                                }
                            })
                    }}
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=on_submit>
                    <h2 class="card-title">"Modifier"</h2>
                    <AlertList alerts=alerts />
                    {field("phone", "Nouveau téléphone", "tel", phone_number)}
                    <Show when=move || !snapshot().phone_is_valid()>
                        <p class="text-error text-sm">"Le numéro ne peut contenir que des chiffres"</p>
                    </Show>
                    {field("currentPassword", "Mot de passe actuel", "password", current_password)}
                    {field("newPassword", "Nouveau mot de passe", "password", new_password)}
                    {field("confirmPassword", "Confirmer le mot de passe", "password", confirm_password)}
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" disabled=move || !can_submit()>
                            "Enregistrer"
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
