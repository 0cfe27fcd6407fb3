use leptos::prelude::*;
use stagetrack::AppRoute;
use stagetrack::shared::Role;

use crate::auth::use_auth;
use crate::web::router::Link;

/// 各角色可见的导航项
fn nav_links(role: Role) -> &'static [(AppRoute, &'static str)] {
    match role {
        Role::Anonymous => &[
            (AppRoute::Login, "Connexion"),
            (AppRoute::Register, "Inscription"),
        ],
        Role::Student => &[
            (AppRoute::StudentDashboard, "Tableau de bord"),
            (AppRoute::Settings, "Mes informations"),
            (AppRoute::Logout, "Déconnexion"),
        ],
        Role::Teacher => &[
            (AppRoute::TeacherDashboard, "Tableau de bord"),
            (AppRoute::Search, "Recherche"),
            (AppRoute::Responsible, "Responsables"),
            (AppRoute::Settings, "Mes informations"),
            (AppRoute::Logout, "Déconnexion"),
        ],
        Role::Administrative => &[
            (AppRoute::Search, "Recherche"),
            (AppRoute::Settings, "Mes informations"),
            (AppRoute::Logout, "Déconnexion"),
        ],
    }
}

/// 导航栏
///
/// 独立于路由器，只依赖认证上下文中的身份信号；登录、注销后自动重新渲染。
#[component]
pub fn Navbar() -> impl IntoView {
    let identity = use_auth().identity();
    let role = move || identity.get().map(|u| u.role).unwrap_or(Role::Anonymous);

    view! {
        <div class="navbar bg-base-100 shadow-xl">
            <div class="flex-1 gap-2">
                <Link to=AppRoute::Home class="btn btn-ghost text-xl">
                    "StageTrack"
                </Link>
                {move || {
                    identity
                        .get()
                        .map(|user| {
                            view! {
                                <span class="badge badge-neutral hidden md:inline-flex">
                                    {user.full_name()} " · " {user.role.display_name()}
                                </span>
                            }
                        })
                }}
            </div>
            <div class="flex-none">
                <ul class="menu menu-horizontal px-1">
                    {move || {
                        nav_links(role())
                            .iter()
                            .map(|(route, label)| {
                                view! {
                                    <li>
                                        <Link to=*route>{*label}</Link>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </div>
        </div>
    }
}
