use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use stagetrack::AppRoute;
use stagetrack::auth::logout;

use crate::auth::use_auth;
use crate::components::feedback::Loader;
use crate::web::router::use_router;

/// 清除会话，刷新导航栏，下一轮事件循环再跳转到登录页
#[component]
pub fn LogoutPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    logout(&auth.api());
    auth.sync();
    Timeout::new(0, move || router.redirect(AppRoute::Login)).forget();

    view! { <Loader /> }
}
