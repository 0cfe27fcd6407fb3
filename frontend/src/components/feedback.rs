//! 提示与加载状态
//!
//! 表单附近的内联提示（10 秒后自动关闭），以及跨一次重渲染传递的 "闪现" 消息。

use std::time::Duration;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use stagetrack::ClientConfig;
use stagetrack::config::ALERT_DISMISS_DELAY;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

impl AlertKind {
    fn class(&self) -> &'static str {
        match self {
            AlertKind::Success => "alert alert-success text-sm py-2",
            AlertKind::Error => "alert alert-error text-sm py-2",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: Uuid,
    pub kind: AlertKind,
    pub message: String,
}

/// 变更成功后视图会被重新挂载，提示需要跨过这次重渲染
#[derive(Clone, Copy)]
pub struct Flash(RwSignal<Option<(AlertKind, String)>>);

impl Flash {
    pub fn new() -> Self {
        Self(RwSignal::new(None))
    }

    pub fn success(&self, message: impl Into<String>) {
        self.0.set(Some((AlertKind::Success, message.into())));
    }

    fn take(&self) -> Option<(AlertKind, String)> {
        let mut taken = None;
        self.0.update(|v| taken = v.take());
        taken
    }
}

/// 一个表单的提示列表
#[derive(Clone, Copy)]
pub struct Alerts {
    items: RwSignal<Vec<Alert>>,
    dismiss_after: Duration,
}

impl Alerts {
    /// 创建时顺带取走上一次挂载留下的闪现消息
    pub fn new() -> Self {
        let dismiss_after = use_context::<ClientConfig>()
            .map(|c| c.alert_dismiss_delay)
            .unwrap_or(ALERT_DISMISS_DELAY);
        let alerts = Self {
            items: RwSignal::new(Vec::new()),
            dismiss_after,
        };
        if let Some((kind, message)) = use_context::<Flash>().and_then(|f| f.take()) {
            alerts.push(kind, message);
        }
        alerts
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(AlertKind::Error, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(AlertKind::Success, message.into());
    }

    pub fn dismiss(&self, id: Uuid) {
        self.items.update(|list| list.retain(|a| a.id != id));
    }

    pub fn clear(&self) {
        self.items.set(Vec::new());
    }

    fn push(&self, kind: AlertKind, message: String) {
        let id = Uuid::new_v4();
        self.items.update(|list| list.push(Alert { id, kind, message }));

        let items = self.items;
        Timeout::new(self.dismiss_after.as_millis() as u32, move || {
            // 视图可能已经卸载
            items.try_update(|list| list.retain(|a| a.id != id));
        })
        .forget();
    }
}

#[component]
pub fn AlertList(alerts: Alerts) -> impl IntoView {
    view! {
        <For
            each=move || alerts.items.get()
            key=|alert| alert.id
            children=move |alert| {
                let id = alert.id;
                view! {
                    <div role="alert" class=alert.kind.class()>
                        <span>{alert.message}</span>
                        <button
                            type="button"
                            class="btn btn-ghost btn-xs"
                            on:click=move |_| alerts.dismiss(id)
                        >
                            "✕"
                        </button>
                    </div>
                }
            }
        />
    }
}

#[component]
pub fn Loader() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-16">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}
