//! 路由服务模块 - 执行引擎
//!
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程：
//! 每次 fragment 变化（以及首次加载）都经过 `route::settle`，
//! 重定向通过改写 fragment 实现，浏览器随后触发 `hashchange` 再次进入这里。

use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

use super::route::{Route, Settled, settle};
use crate::platform::AppContext;
use crate::{cart, dishes, profile};

/// 一次路由处理的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Shown(Route),
    Redirected(Route),
}

/// **核心方法：导航与守卫**
///
/// 重定向链由 `settle` 在本地走完，只改写一次 fragment，直接指向最终路由。
pub async fn handle_fragment(ctx: &AppContext, fragment: &str) -> RouteOutcome {
    let is_auth = ctx.session.is_authenticated();
    let Settled { route, redirects } = settle(fragment, is_auth);

    if redirects.is_empty() {
        ctx.screen.show_view(route.view());
        load_route_data(ctx, &route).await;
        return RouteOutcome::Shown(route);
    }

    let mut from = fragment.to_string();
    for (to, cause) in &redirects {
        if cause.is_error() {
            log_error!("[Router] {}: {}. Redirecting to {}.", from, cause, to);
        } else {
            log_warn!("[Router] {}: {}. Redirecting to {}.", from, cause, to);
        }
        from = to.fragment();
    }

    ctx.go(&route);
    RouteOutcome::Redirected(route)
}

/// 处理当前地址栏中的 fragment
pub async fn handle_current(ctx: &AppContext) -> RouteOutcome {
    let fragment = ctx.navigator.fragment();
    handle_fragment(ctx, &fragment).await
}

/// 视图切换后的数据加载
async fn load_route_data(ctx: &AppContext, route: &Route) {
    match route {
        Route::Menu => dishes::load_dishes(ctx, "").await,
        Route::Cart => cart::load_cart(ctx).await,
        Route::Profile => profile::load_user_profile(ctx).await,
        Route::DishDetails { id } => dishes::show_dish_details(ctx, *id).await,
        Route::Login | Route::Register => {}
    }
}

/// 初始化 `hashchange` 监听
///
/// 每次事件都在新的任务里处理；进行中的请求不会被取消。
pub fn init_hashchange_listener(ctx: AppContext) {
    let closure = Closure::<dyn Fn()>::new(move || {
        let ctx = ctx.clone();
        spawn_local(async move {
            handle_current(&ctx).await;
        });
    });

    match web_sys::window() {
        Some(window) => {
            if let Err(e) = window
                .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())
            {
                log_error!("[Router] Failed to register hashchange listener: {:?}", e);
            }
        }
        None => log_error!("[Router] No window; hashchange listener not registered."),
    }

    // 泄漏闭包以保持监听器存活
    closure.forget();
}

#[cfg(test)]
mod tests;
