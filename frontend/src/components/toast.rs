use leptos::prelude::*;

use crate::platform::NoticeKind;
use crate::store::{Toast, use_store};

#[component]
pub fn Toasts() -> impl IntoView {
    let store = use_store();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || store.toasts.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div role="alert" class=format!("alert {}", alert_class(toast.kind))>
                            <span>{toast.message}</span>
                            <button class="btn btn-ghost btn-xs" on:click=move |_| store.dismiss(id)>"✕"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}

fn alert_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "alert-success",
        NoticeKind::Info => "alert-info",
        NoticeKind::Warning => "alert-warning",
        NoticeKind::Error => "alert-error",
    }
}
