//! 新建企业对话框
//!
//! 字段整合为 `FormState`（`RwSignal` 是 `Copy`，可以直接作为 Props 传递），
//! 提交时转换为 `CreateEnterpriseRequest`。

use leptos::prelude::*;
use stagetrack::shared::protocol::CreateEnterpriseRequest;
use stagetrack::views::dashboard::create_enterprise_and_contact;
use stagetrack::views::feedback::UserAction;
use stagetrack::views::registration::MSG_MISSING_FIELDS;

use super::DashboardCtx;
use crate::auth::use_auth;
use crate::components::modal::Modal;

#[derive(Clone, Copy)]
struct FormState {
    trade_name: RwSignal<String>,
    designation: RwSignal<String>,
    street: RwSignal<String>,
    street_number: RwSignal<String>,
    postal_code: RwSignal<String>,
    city: RwSignal<String>,
    country: RwSignal<String>,
    phone_number: RwSignal<String>,
    email: RwSignal<String>,
}

impl FormState {
    fn new() -> Self {
        Self {
            trade_name: RwSignal::new(String::new()),
            designation: RwSignal::new(String::new()),
            street: RwSignal::new(String::new()),
            street_number: RwSignal::new(String::new()),
            postal_code: RwSignal::new(String::new()),
            city: RwSignal::new(String::new()),
            country: RwSignal::new(String::new()),
            phone_number: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        for field in self.fields() {
            field.set(String::new());
        }
    }

    fn fields(&self) -> [RwSignal<String>; 9] {
        [
            self.trade_name,
            self.designation,
            self.street,
            self.street_number,
            self.postal_code,
            self.city,
            self.country,
            self.phone_number,
            self.email,
        ]
    }

    /// 地址各项与商号必填，分部名 / 电话 / 邮箱留空则不发送
    fn to_request(&self) -> Result<CreateEnterpriseRequest, &'static str> {
        let required = |s: RwSignal<String>| s.get_untracked().trim().to_string();
        let optional = |s: RwSignal<String>| {
            let value = s.get_untracked().trim().to_string();
            (!value.is_empty()).then_some(value)
        };

        let request = CreateEnterpriseRequest {
            trade_name: required(self.trade_name),
            designation: optional(self.designation),
            street: required(self.street),
            street_number: required(self.street_number),
            postal_code: required(self.postal_code),
            city: required(self.city),
            country: required(self.country),
            phone_number: optional(self.phone_number),
            email: optional(self.email),
        };

        let complete = [
            &request.trade_name,
            &request.street,
            &request.street_number,
            &request.postal_code,
            &request.city,
            &request.country,
        ]
        .iter()
        .all(|v| !v.is_empty());

        if complete { Ok(request) } else { Err(MSG_MISSING_FIELDS) }
    }
}

#[component]
pub(super) fn CreateEnterpriseDialog(ctx: DashboardCtx, open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let form = FormState::new();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match form.to_request() {
            Ok(request) => request,
            Err(msg) => {
                ctx.alerts.error(msg);
                return;
            }
        };
        open.set(false);
        form.reset();
        let api = auth.api();
        ctx.mutate(
            "create enterprise",
            UserAction::CreateEnterprise,
            Some("Entreprise ajoutée et contactée"),
            async move { create_enterprise_and_contact(&api, &request).await.map(|_| ()) },
        );
    };

    let field = move |label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <label class="form-control w-full">
                <div class="label">
                    <span class="label-text">{label}</span>
                </div>
                <input
                    type=kind
                    class="input input-bordered input-sm w-full"
                    on:input=move |ev| value.set(event_target_value(&ev))
                    prop:value=value
                />
            </label>
        }
    };

    view! {
        <Modal open=open title="Nouvelle entreprise".to_string()>
            <form class="space-y-2" on:submit=on_submit>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-2">
                    {field("Nom commercial", "text", form.trade_name)}
                    {field("Appellation", "text", form.designation)}
                    {field("Rue", "text", form.street)}
                    {field("Numéro", "text", form.street_number)}
                    {field("Code postal", "text", form.postal_code)}
                    {field("Ville", "text", form.city)}
                    {field("Pays", "text", form.country)}
                    {field("Téléphone", "tel", form.phone_number)}
                    {field("Email", "email", form.email)}
                </div>
                <button class="btn btn-primary w-full mt-4">"Ajouter et contacter"</button>
            </form>
        </Modal>
    }
}
