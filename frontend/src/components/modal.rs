use leptos::prelude::*;

/// 原生 `<dialog>` 模态框，由 `open` 信号控制显示
#[component]
pub fn Modal(
    open: RwSignal<bool>,
    #[prop(into)] title: Signal<String>,
    children: Children,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box max-w-3xl">
                <h3 class="font-bold text-lg mb-4">{move || title.get()}</h3>
                {children()}
                <div class="modal-action">
                    <button type="button" class="btn" on:click=move |_| open.set(false)>
                        "Fermer"
                    </button>
                </div>
            </div>
        </dialog>
    }
}
