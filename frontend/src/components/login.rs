use leptos::prelude::*;
use leptos::task::spawn_local;
use stagetrack::AppRoute;
use stagetrack::auth::login;
use stagetrack::views::feedback::{UserAction, failure_message};
use stagetrack::views::registration::MSG_MISSING_FIELDS;

use crate::auth::use_auth;
use crate::components::feedback::{AlertList, Alerts};
use crate::web::router::{Link, use_router};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let alerts = Alerts::new();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (remember_me, set_remember_me) = signal(auth.session().remember_me());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().trim().is_empty() || password.get().is_empty() {
            alerts.error(MSG_MISSING_FIELDS);
            return;
        }

        set_is_submitting.set(true);
        alerts.clear();

        let (email, password, remember_me) = (email.get(), password.get(), remember_me.get());
        spawn_local(async move {
            let api = auth.api();
            match login(&api, email.trim(), &password, remember_me).await {
                Ok(_) => {
                    auth.sync();
                    router.redirect(AppRoute::Home);
                }
                Err(e) => {
                    alerts.error(failure_message(UserAction::Login, &e));
                    set_is_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Connexion"</h1>
                    <p class="text-base-content/70">"Suivi des stages"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <AlertList alerts=alerts />

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="prenom.nom@vinci.be"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Mot de passe"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>
                        <label class="label cursor-pointer justify-start gap-2">
                            <input
                                type="checkbox"
                                class="checkbox checkbox-sm"
                                prop:checked=remember_me
                                on:change=move |ev| set_remember_me.set(event_target_checked(&ev))
                            />
                            <span class="label-text">"Se souvenir de moi"</span>
                        </label>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || {
                                    if is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> }
                                            .into_any()
                                    } else {
                                        "Se connecter".into_any()
                                    }
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center">
                            "Pas encore de compte ? "
                            <Link to=AppRoute::Register class="link link-primary">
                                "S'inscrire"
                            </Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
