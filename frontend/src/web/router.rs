//! 路由服务模块 - 浏览器绑定
//!
//! 引擎中的 [`Navigator`] 负责解析、授权和历史记录策略；
//! 这里只提供浏览器侧的实现：
//! - `BrowserHistory`: 封装 `window.history` / `window.location`
//! - `SignalMount`: 把挂载请求写入信号，由 `RouterOutlet` 渲染
//! - 监听 popstate 与 load 事件、拒绝提示的延时跳转

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use stagetrack::log_info;
use stagetrack::{
    AppRoute, ClientConfig, DenialNotice, History, LoadGate, NavOutcome, NavTicket, Navigator,
    PathPrefix, RouteError, SessionStore, ViewMount,
};
use wasm_bindgen::prelude::*;

// ============================================================================
// History / Mount 实现
// ============================================================================

pub struct BrowserHistory;

impl History for BrowserHistory {
    fn location(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    fn push(&self, url: &str) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }

    fn replace(&self, url: &str) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }

    fn len(&self) -> usize {
        web_sys::window()
            .and_then(|w| w.history().ok())
            .and_then(|h| h.length().ok())
            .unwrap_or(0) as usize
    }
}

/// 当前挂载的视图
#[derive(Clone)]
pub struct MountedView {
    pub route: AppRoute,
    pub ticket: NavTicket,
}

#[derive(Clone, Copy)]
pub struct SignalMount(RwSignal<Option<MountedView>, LocalStorage>);

impl ViewMount for SignalMount {
    fn mount(&self, route: AppRoute, ticket: NavTicket) {
        self.0.set(Some(MountedView { route, ticket }));
    }
}

type BrowserNavigator = Navigator<BrowserHistory, SignalMount>;

fn document_complete() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| d.ready_state() == web_sys::DocumentReadyState::Complete)
        .unwrap_or(false)
}

// ============================================================================
// 路由服务
// ============================================================================

/// 路由器服务
///
/// `Copy` 句柄，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct RouterService {
    navigator: StoredValue<Rc<BrowserNavigator>, LocalStorage>,
    mounted: RwSignal<Option<MountedView>, LocalStorage>,
    notice: RwSignal<Option<DenialNotice>>,
    prefix: StoredValue<PathPrefix>,
}

impl RouterService {
    fn new(session: Rc<SessionStore>, config: &ClientConfig) -> Self {
        let mounted = RwSignal::new_local(None);
        let navigator = Navigator::new(BrowserHistory, SignalMount(mounted), session, config);

        Self {
            navigator: StoredValue::new_local(Rc::new(navigator)),
            mounted,
            notice: RwSignal::new(None),
            prefix: StoredValue::new(config.path_prefix.clone()),
        }
    }

    fn nav(&self) -> Rc<BrowserNavigator> {
        self.navigator.get_value()
    }

    pub fn mounted(&self) -> RwSignal<Option<MountedView>, LocalStorage> {
        self.mounted
    }

    pub fn notice(&self) -> ReadSignal<Option<DenialNotice>> {
        self.notice.read_only()
    }

    /// 链接的 href（带部署前缀）
    pub fn href(&self, route: AppRoute) -> String {
        self.prefix.with_value(|p| p.apply(route.to_path()))
    }

    /// 首次加载：文档加载完成后才挂载第一个视图
    ///
    /// `redirect` 为 `Some` 时不解析当前地址，直接跳转（会话复核失败等情况）。
    pub fn start_when_loaded(&self, redirect: Option<AppRoute>) {
        let this = *self;
        let gate = Rc::new(LoadGate::new(document_complete()));
        gate.run_when_loaded(move || match redirect {
            Some(route) => this.redirect(route),
            None => this.handle(this.nav().start()),
        });

        if !gate.is_loaded() {
            let pending = Rc::clone(&gate);
            let closure = Closure::once(move || pending.mark_loaded());
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("load", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }
    }

    /// 应用内导航
    pub fn navigate(&self, route: AppRoute) {
        self.handle(self.nav().navigate(route.to_path()));
    }

    /// 程序内跳转（首页分发、注销后、登录后）
    pub fn redirect(&self, route: AppRoute) {
        self.handle_outcome(self.nav().redirect(route));
    }

    /// 变更成功后完整重渲染当前视图
    pub fn reload(&self, ticket: &NavTicket) -> Option<NavTicket> {
        self.nav().reload(ticket)
    }

    fn handle(&self, result: Result<NavOutcome, RouteError>) {
        match result {
            Ok(outcome) => self.handle_outcome(outcome),
            // 路由表不完整属于配置错误，直接抛给 JS
            Err(e) => wasm_bindgen::throw_str(&e.to_string()),
        }
    }

    fn handle_outcome(&self, outcome: NavOutcome) {
        if let NavOutcome::Denied(notice) = outcome {
            self.show_denial(notice);
        }
    }

    fn show_denial(&self, notice: DenialNotice) {
        let this = *self;
        let millis = notice.delay.as_millis() as u32;
        self.notice.set(Some(notice.clone()));

        Timeout::new(millis, move || {
            if this.notice.get_untracked().as_ref() == Some(&notice) {
                this.notice.set(None);
            }
            if let Some(outcome) = this.nav().complete_denial(&notice) {
                this.handle_outcome(outcome);
            }
        })
        .forget();
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let this = *self;
        let closure = Closure::<dyn Fn()>::new(move || this.handle(this.nav().on_popstate()));

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

/// 提供路由服务到 Context 并初始化监听
pub fn provide_router(session: Rc<SessionStore>, config: &ClientConfig) -> RouterService {
    let router = RouterService::new(session, config);
    router.init_popstate_listener();
    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    expect_context::<RouterService>()
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由出口组件
///
/// 每次挂载（包括重载）都会携带新的令牌，视图据此丢弃过期的异步结果。
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute, NavTicket) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || {
        router
            .mounted()
            .get()
            .map(|view| matcher(view.route, view.ticket))
    }
}

/// 应用内链接：拦截点击，交给路由器处理
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(to);
    };

    view! {
        <a href=router.href(to) class=class on:click=on_click>
            {children()}
        </a>
    }
}

/// 拒绝访问提示，3 秒后自动消失并跳转首页
#[component]
pub fn DenialToast() -> impl IntoView {
    let notice = use_router().notice();

    view! {
        <Show when=move || notice.get().is_some()>
            <div class="toast toast-top toast-center z-50">
                <div role="alert" class="alert alert-warning shadow-lg">
                    <span>{move || notice.get().map(|n| n.message()).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}

/// 异步结果返回时检查视图是否仍是当前视图；过期结果记录后丢弃
pub fn still_current(ticket: &NavTicket, what: &str) -> bool {
    if ticket.is_current() {
        return true;
    }
    log_info!("[View] Dropped stale {} result (#{})", what, ticket.generation());
    false
}
