use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::auth::{self, RegisterForm};
use crate::cart;
use crate::store::{spawn_with, use_app, use_store};
use crate::web::route::View;

#[component]
pub fn AuthPage() -> impl IntoView {
    let store = use_store();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"DishDash"</h1>
                    <p class="text-base-content/70">"Order your favourite dishes online"</p>
                </div>
                {move || match store.view.get() {
                    View::Register => view! { <RegisterCard /> }.into_any(),
                    _ => view! { <LoginCard /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn LoginCard() -> impl IntoView {
    let app = use_app();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let is_submitting = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let (email_value, password_value) = (email.get(), password.get());
        is_submitting.set(true);

        spawn_with(app, move |ctx| async move {
            if auth::login(&ctx, &email_value, &password_value).await {
                cart::update_cart_icon(&ctx).await;
            }
            is_submitting.set(false);
        });
    };

    view! {
        <div class="card shrink-0 w-full shadow-2xl bg-base-100">
            <form id="login-form" class="card-body" on:submit=on_submit>
                <h2 class="card-title">"Login"</h2>
                <label class="form-control">
                    <span class="label-text">"Email"</span>
                    <input
                        type="email"
                        class="input input-bordered"
                        on:input=move |ev| email.set(event_target_value(&ev))
                        prop:value=email
                        required
                    />
                </label>
                <label class="form-control">
                    <span class="label-text">"Password"</span>
                    <input
                        type="password"
                        class="input input-bordered"
                        on:input=move |ev| password.set(event_target_value(&ev))
                        prop:value=password
                        required
                    />
                </label>
                <div class="form-control mt-6">
                    <button class="btn btn-primary" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                        } else {
                            "Login".into_any()
                        }}
                    </button>
                </div>
                <p class="text-sm text-center">
                    "Don't have an account? "
                    <a id="show-register" class="link link-primary" href="#register">"Register"</a>
                </p>
            </form>
        </div>
    }
}

#[component]
fn RegisterCard() -> impl IntoView {
    let app = use_app();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());
    let is_submitting = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let form = RegisterForm {
            email: email.get(),
            password: password.get(),
            confirm_password: confirm_password.get(),
            name: name.get(),
            last_name: last_name.get(),
            address: address.get(),
        };
        is_submitting.set(true);

        spawn_with(app, move |ctx| async move {
            if auth::register(&ctx, &form).await {
                cart::update_cart_icon(&ctx).await;
            }
            is_submitting.set(false);
        });
    };

    let field = move |label: &'static str, kind: &'static str, value: RwSignal<String>, required: bool| {
        view! {
            <label class="form-control">
                <span class="label-text">{label}</span>
                <input
                    type=kind
                    class="input input-bordered"
                    on:input=move |ev| value.set(event_target_value(&ev))
                    prop:value=value
                    required=required
                />
            </label>
        }
    };

    view! {
        <div class="card shrink-0 w-full shadow-2xl bg-base-100">
            <form id="register-form" class="card-body" on:submit=on_submit>
                <h2 class="card-title">"Register"</h2>
                {field("Email", "email", email, true)}
                {field("Password", "password", password, true)}
                {field("Confirm Password", "password", confirm_password, true)}
                {field("Name", "text", name, true)}
                {field("Last Name", "text", last_name, true)}
                {field("Address", "text", address, false)}
                <div class="form-control mt-6">
                    <button class="btn btn-primary" disabled=move || is_submitting.get()>"Create Account"</button>
                </div>
                <p class="text-sm text-center">
                    "Already have an account? "
                    <a id="show-login" class="link link-primary" href="#login">"Login"</a>
                </p>
            </form>
        </div>
    }
}
