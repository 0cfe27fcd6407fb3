//! 认证上下文
//!
//! 持有会话与 API 网关，并把会话中的身份镜像为信号，
//! 导航栏据此在登录 / 注销后重新渲染。

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use stagetrack::auth::{self, RestoreOutcome};
use stagetrack::shared::UserIdentity;
use stagetrack::{ApiGateway, AppRoute, ClientConfig, SessionStore};

use crate::web::router::RouterService;
use crate::web::{BrowserStorage, FetchClient};

pub type Api = ApiGateway<FetchClient>;

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    api: StoredValue<Rc<Api>, LocalStorage>,
    identity: RwSignal<Option<UserIdentity>>,
    /// 启动时的会话复核是否已经结束
    ready: RwSignal<bool>,
}

impl AuthContext {
    pub fn new(config: &ClientConfig) -> Self {
        let session = Rc::new(SessionStore::init(
            Box::new(BrowserStorage::Local),
            Box::new(BrowserStorage::Session),
        ));
        let api = ApiGateway::new(FetchClient, &config.api_base_url, session);

        Self {
            api: StoredValue::new_local(Rc::new(api)),
            identity: RwSignal::new(None),
            ready: RwSignal::new(false),
        }
    }

    pub fn api(&self) -> Rc<Api> {
        self.api.get_value()
    }

    pub fn session(&self) -> Rc<SessionStore> {
        Rc::clone(self.api().session())
    }

    pub fn identity(&self) -> ReadSignal<Option<UserIdentity>> {
        self.identity.read_only()
    }

    pub fn is_ready(&self) -> ReadSignal<bool> {
        self.ready.read_only()
    }

    /// 会话被写入后调用，刷新依赖身份的界面
    pub fn sync(&self) {
        self.identity.set(self.session().get_session());
    }
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// 启动流程：复核 token，然后显示导航栏，最后启动路由
pub fn init_auth(ctx: AuthContext, router: RouterService) {
    spawn_local(async move {
        let outcome = auth::restore(&ctx.api()).await;
        ctx.sync();
        ctx.ready.set(true);

        let redirect = match outcome {
            RestoreOutcome::Expired => Some(AppRoute::Logout),
            RestoreOutcome::Offline => Some(AppRoute::Home),
            RestoreOutcome::Restored(_) | RestoreOutcome::Anonymous => None,
        };
        router.start_when_loaded(redirect);
    });
}
