use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::auth;
use crate::store::{use_app, use_store};
use crate::web::route::{Route, View};

/// 顶部导航栏；登录和注册页不显示
#[component]
pub fn Navbar() -> impl IntoView {
    let app = use_app();
    let store = use_store();

    let link_class = move |view: View| {
        move || {
            if store.view.get() == view {
                "active"
            } else {
                ""
            }
        }
    };

    let on_logout = move |ev: MouseEvent| {
        ev.prevent_default();
        auth::logout(&app.get_value());
    };

    view! {
        <div class="navbar bg-base-100 shadow-sm" class:hidden=move || store.view.get().is_public()>
            <div class="flex-1">
                <a class="btn btn-ghost text-xl" href=Route::Menu.fragment()>"DishDash"</a>
            </div>
            <ul class="menu menu-horizontal px-1 gap-1">
                <li><a href=Route::Menu.fragment() class=link_class(View::Menu)>"Menu"</a></li>
                <li>
                    <a href=Route::Cart.fragment() class=link_class(View::Cart)>
                        "Cart"
                        <span id="cart-icon" class="badge badge-primary badge-sm">
                            {move || store.badge.get()}
                        </span>
                    </a>
                </li>
                <li><a href=Route::Profile.fragment() class=link_class(View::Profile)>"Profile"</a></li>
                <li><a href="#" on:click=on_logout>"Logout"</a></li>
            </ul>
        </div>
    }
}
