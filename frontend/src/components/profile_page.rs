use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::profile;
use crate::store::{spawn_with, use_app, use_store};

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <div class="container mx-auto p-4 grid gap-6 lg:grid-cols-2">
            <ProfileCard />
            <PasswordCard />
        </div>
    }
}

#[component]
fn ProfileCard() -> impl IntoView {
    let app = use_app();
    let store = use_store();

    let name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());

    // 每次读取到新的资料时覆盖可编辑字段
    Effect::new(move |_| {
        let form = store.profile.get();
        name.set(form.name);
        last_name.set(form.last_name);
        address.set(form.address);
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let (n, l, a) = (name.get(), last_name.get(), address.get());
        spawn_with(app, move |ctx| async move {
            profile::update_profile(&ctx, &n, &l, &a).await;
        });
    };

    view! {
        <div class="card bg-base-100 shadow">
            <form id="profile-form" class="card-body" on:submit=on_submit>
                <h2 class="card-title">"Profile"</h2>
                <label class="form-control">
                    <span class="label-text">"Email"</span>
                    <input
                        type="email"
                        class="input input-bordered"
                        prop:value=move || store.profile.get().email
                        readonly
                    />
                </label>
                <label class="form-control">
                    <span class="label-text">"Name"</span>
                    <input
                        type="text"
                        class="input input-bordered"
                        on:input=move |ev| name.set(event_target_value(&ev))
                        prop:value=name
                    />
                </label>
                <label class="form-control">
                    <span class="label-text">"Last Name"</span>
                    <input
                        type="text"
                        class="input input-bordered"
                        on:input=move |ev| last_name.set(event_target_value(&ev))
                        prop:value=last_name
                    />
                </label>
                <label class="form-control">
                    <span class="label-text">"Address"</span>
                    <input
                        type="text"
                        class="input input-bordered"
                        on:input=move |ev| address.set(event_target_value(&ev))
                        prop:value=address
                    />
                </label>
                <div class="card-actions justify-end mt-4">
                    <button class="btn btn-primary">"Save Changes"</button>
                </div>
            </form>
        </div>
    }
}

#[component]
fn PasswordCard() -> impl IntoView {
    let app = use_app();

    let current = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let (c, n, f) = (current.get(), new_password.get(), confirm.get());
        spawn_with(app, move |ctx| async move {
            if profile::change_password(&ctx, &c, &n, &f).await {
                current.set(String::new());
                new_password.set(String::new());
                confirm.set(String::new());
            }
        });
    };

    let field = move |id: &'static str, label: &'static str, value: RwSignal<String>| {
        view! {
            <label class="form-control">
                <span class="label-text">{label}</span>
                <input
                    id=id
                    type="password"
                    class="input input-bordered"
                    on:input=move |ev| value.set(event_target_value(&ev))
                    prop:value=value
                    required
                />
            </label>
        }
    };

    view! {
        <div class="card bg-base-100 shadow">
            <form id="change-password-form" class="card-body" on:submit=on_submit>
                <h2 class="card-title">"Change Password"</h2>
                {field("current-password", "Current Password", current)}
                {field("new-password", "New Password", new_password)}
                {field("confirm-password", "Confirm New Password", confirm)}
                <div class="card-actions justify-end mt-4">
                    <button class="btn btn-warning">"Change Password"</button>
                </div>
            </form>
        </div>
    }
}
