use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use stagetrack::views::home::{HomeDestination, MSG_UNKNOWN_ROLE, TEACHER_CARDS, home_destination};

use crate::auth::use_auth;
use crate::components::feedback::Loader;
use crate::web::router::{Link, use_router};

/// 首页：按身份分发
#[component]
pub fn HomePage() -> impl IntoView {
    let router = use_router();
    let destination = home_destination(&use_auth().session());

    match destination {
        HomeDestination::Redirect(route) => {
            // 当前挂载完成后再跳转
            Timeout::new(0, move || router.redirect(route)).forget();
            view! { <Loader /> }.into_any()
        }
        HomeDestination::TeacherHome => view! { <TeacherHome /> }.into_any(),
        HomeDestination::UnknownRole => view! {
            <div class="text-center py-16">
                <p class="text-xl text-error">{MSG_UNKNOWN_ROLE}</p>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn TeacherHome() -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
            {TEACHER_CARDS
                .iter()
                .map(|(route, label)| {
                    view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h2 class="card-title">{*label}</h2>
                                <div class="card-actions justify-end">
                                    <Link to=*route class="btn btn-primary">
                                        "Ouvrir"
                                    </Link>
                                </div>
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
