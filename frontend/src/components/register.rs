use leptos::prelude::*;
use leptos::task::spawn_local;
use stagetrack::AppRoute;
use stagetrack::auth::register;
use stagetrack::shared::Role;
use stagetrack::views::feedback::{UserAction, failure_message};
use stagetrack::views::registration::{RegistrationForm, SELECTABLE_ROLES, role_selection_required};

use crate::auth::use_auth;
use crate::components::feedback::{AlertList, Alerts};
use crate::web::router::{Link, use_router};

/// 注册表单状态
#[derive(Clone, Copy)]
struct FormState {
    last_name: RwSignal<String>,
    first_name: RwSignal<String>,
    phone_number: RwSignal<String>,
    email: RwSignal<String>,
    role: RwSignal<Option<Role>>,
    password: RwSignal<String>,
    confirm_password: RwSignal<String>,
}

impl FormState {
    fn new() -> Self {
        Self {
            last_name: RwSignal::new(String::new()),
            first_name: RwSignal::new(String::new()),
            phone_number: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            role: RwSignal::new(None),
            password: RwSignal::new(String::new()),
            confirm_password: RwSignal::new(String::new()),
        }
    }

    fn snapshot(&self) -> RegistrationForm {
        RegistrationForm {
            last_name: self.last_name.get(),
            first_name: self.first_name.get(),
            phone_number: self.phone_number.get(),
            email: self.email.get(),
            role: self.role.get(),
            password: self.password.get(),
            confirm_password: self.confirm_password.get(),
        }
    }
}

#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] kind: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
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
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let alerts = Alerts::new();
    let form = FormState::new();
    let (is_submitting, set_is_submitting) = signal(false);

    let role_visible = move || role_selection_required(&form.email.get());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        alerts.clear();

        let request = match form.snapshot().validate() {
            Ok(request) => request,
            Err(msg) => {
                alerts.error(msg);
                return;
            }
        };

        set_is_submitting.set(true);
        spawn_local(async move {
            let api = auth.api();
            match register(&api, &request).await {
                Ok(_) => {
                    auth.sync();
                    router.redirect(AppRoute::Home);
                }
                Err(e) => {
                    alerts.error(failure_message(UserAction::Register, &e));
                    set_is_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="card max-w-2xl mx-auto shadow-2xl bg-base-100">
            <form class="card-body" on:submit=on_submit>
                <h1 class="card-title text-2xl">"Inscription"</h1>
                <AlertList alerts=alerts />

                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <TextField id="lastName" label="Nom" value=form.last_name />
                    <TextField id="firstName" label="Prénom" value=form.first_name />
                    <TextField id="phone" label="Téléphone" kind="tel" value=form.phone_number />
                    <TextField id="email" label="Email" kind="email" value=form.email />
                </div>

                <Show when=role_visible>
                    <div class="form-control">
                        <label class="label" for="role">
                            <span class="label-text">"Rôle"</span>
                        </label>
                        <select
                            id="role"
                            class="select select-bordered"
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                form.role
                                    .set(SELECTABLE_ROLES.iter().copied().find(|r| r.as_str() == value));
                            }
                        >
                            <option value="" selected=move || form.role.get().is_none()>
                                "Choisir un rôle"
                            </option>
                            {SELECTABLE_ROLES
                                .iter()
                                .map(|role| {
                                    let role = *role;
                                    view! {
                                        <option
                                            value=role.as_str()
                                            selected=move || form.role.get() == Some(role)
                                        >
                                            {role.display_name()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                </Show>

                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <TextField id="password" label="Mot de passe" kind="password" value=form.password />
                    <TextField
                        id="confirmPassword"
                        label="Confirmer le mot de passe"
                        kind="password"
                        value=form.confirm_password
                    />
                </div>

                <div class="form-control mt-6">
                    <button class="btn btn-primary" disabled=move || is_submitting.get()>
                        "S'inscrire"
                    </button>
                </div>
                <p class="text-sm text-center">
                    "Déjà inscrit ? "
                    <Link to=AppRoute::Login class="link link-primary">
                        "Se connecter"
                    </Link>
                </p>
            </form>
        </div>
    }
}
