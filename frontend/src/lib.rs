//! DishDash 前端应用
//!
//! 无头核心与 Leptos 外壳分离：
//! - `platform`: 能力接口（HTTP、存储、导航、通知、渲染、延时）与 `AppContext`
//! - `api` / `auth`: 带 Bearer token 的请求客户端与会话
//! - `web::route`: 路由决策（纯函数）
//! - `web::router`: 路由服务（执行决策并加载数据）
//! - `dishes` / `cart` / `profile`: 功能模块
//! - `store` / `components`: 信号仓库与 UI 组件层

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_warn {
    ($($t:tt)*) => (web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => (web_sys::console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

mod api;
mod auth;
mod cart;
mod components {
    pub mod auth_page;
    pub mod cart_page;
    pub mod details;
    pub mod menu;
    pub mod navbar;
    pub mod profile_page;
    pub mod toast;
}
mod config;
mod dishes;
mod error;
mod platform;
mod profile;
mod store;

#[cfg(test)]
mod testing;

// 原生 Web API 封装模块
// 直接基于 web-sys 实现各能力接口，不引入 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    mod location;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::FetchTransport;
    pub use location::HashNavigator;
    pub use storage::BrowserStorage;
    pub use timer::BrowserDelay;
}

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::auth_page::AuthPage;
use crate::components::cart_page::CartPage;
use crate::components::details::DetailsPage;
use crate::components::menu::MenuPage;
use crate::components::navbar::Navbar;
use crate::components::profile_page::ProfilePage;
use crate::components::toast::Toasts;
use crate::config::AppConfig;
use crate::platform::AppContext;
use crate::store::{AppHandle, UiStore};
use crate::web::route::View;
use crate::web::{BrowserDelay, BrowserStorage, FetchTransport, HashNavigator, router};

/// 视图匹配函数
///
/// 同一时刻只有一个视图可见。
fn view_matcher(view: View) -> AnyView {
    match view {
        View::Login | View::Register => view! { <AuthPage /> }.into_any(),
        View::Menu => view! { <MenuPage /> }.into_any(),
        View::DishDetails => view! { <DetailsPage /> }.into_any(),
        View::Cart => view! { <CartPage /> }.into_any(),
        View::Profile => view! { <ProfilePage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建 UI 仓库
    let store = UiStore::new();
    provide_context(store);

    // 2. 组装能力并创建应用上下文
    let ctx = AppContext::new(
        AppConfig::from_build_env(),
        Rc::new(FetchTransport),
        Rc::new(BrowserStorage),
        Rc::new(HashNavigator),
        Rc::new(store),
        Rc::new(store),
        Rc::new(BrowserDelay),
    );
    let app: AppHandle = StoredValue::new_local(ctx.clone());
    provide_context(app);

    // 3. 监听 hashchange，并处理初始 fragment
    router::init_hashchange_listener(ctx.clone());
    spawn_local(async move {
        router::handle_current(&ctx).await;
        // 未登录时不请求购物车，避免启动时出现会话过期提示
        if ctx.session.is_authenticated() {
            cart::update_cart_icon(&ctx).await;
        }
    });

    // 仅在视图真正变化时重建页面
    let current_view = Memo::new(move |_| store.view.get());

    view! {
        <Navbar />
        <main class="min-h-screen bg-base-200">
            {move || view_matcher(current_view.get())}
        </main>
        <Toasts />
    }
}
