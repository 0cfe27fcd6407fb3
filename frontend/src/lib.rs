//! StageTrack 前端应用
//!
//! 引擎（`stagetrack`）负责会话、路由表、导航状态机和 API 网关；
//! 这里只做浏览器绑定和渲染：
//! - `web`: History / Storage / HTTP 的浏览器实现，路由服务
//! - `auth`: 认证上下文与启动时的会话复核
//! - `components`: 导航栏、提示、各页面

mod auth;
mod components {
    pub mod feedback;
    pub mod home;
    pub mod login;
    pub mod logout;
    pub mod modal;
    pub mod navbar;
    pub mod register;
    pub mod responsible;
    pub mod search;
    pub mod settings;
    pub mod student_dashboard;
    pub mod teacher_dashboard;
}

pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;

    pub use http::FetchClient;
    pub use storage::BrowserStorage;
}

use leptos::prelude::*;
use stagetrack::{AppRoute, ClientConfig, NavTicket};

use crate::auth::{AuthContext, init_auth};
use crate::components::feedback::{Flash, Loader};
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::logout::LogoutPage;
use crate::components::navbar::Navbar;
use crate::components::register::RegisterPage;
use crate::components::responsible::ResponsiblePage;
use crate::components::search::SearchPage;
use crate::components::settings::SettingsPage;
use crate::components::student_dashboard::StudentDashboardPage;
use crate::components::teacher_dashboard::TeacherDashboardPage;
use crate::web::router::{DenialToast, RouterOutlet, provide_router};

/// 路由匹配函数
///
/// 需要异步加载或变更后重渲染的页面会拿到本次挂载的令牌。
fn route_matcher(route: AppRoute, ticket: NavTicket) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Logout => view! { <LogoutPage /> }.into_any(),
        AppRoute::StudentDashboard => view! { <StudentDashboardPage ticket=ticket /> }.into_any(),
        AppRoute::TeacherDashboard => view! { <TeacherDashboardPage ticket=ticket /> }.into_any(),
        AppRoute::Settings => view! { <SettingsPage ticket=ticket /> }.into_any(),
        AppRoute::Search => view! { <SearchPage ticket=ticket /> }.into_any(),
        AppRoute::Responsible => view! { <ResponsiblePage ticket=ticket /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_build_env();
    provide_context(config.clone());
    provide_context(Flash::new());

    // 1. 认证上下文（会话 + API 网关）
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);

    // 2. 路由服务，与认证上下文共享同一个会话
    let router = provide_router(auth_ctx.session(), &config);

    // 3. 复核 token → 导航栏 → 启动路由
    init_auth(auth_ctx, router);
    let ready = auth_ctx.is_ready();

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <Show when=move || ready.get() fallback=|| view! { <Loader /> }>
                <Navbar />
            </Show>
            <DenialToast />
            <main class="max-w-7xl mx-auto p-4 md:p-8">
                <RouterOutlet matcher=route_matcher />
            </main>
        </div>
    }
}
