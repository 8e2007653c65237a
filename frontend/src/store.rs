//! UI 状态仓库
//!
//! 将视图模型整合为一个 `Copy` 的信号集合，并实现 `Screen` 与 `Notifier`，
//! 功能模块写入，组件读取。

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::cart::CartView;
use crate::dishes::{DishDetailsView, DishListView};
use crate::platform::{AppContext, NoticeKind, Notifier, Screen};
use crate::profile::ProfileForm;
use crate::web::route::View;

const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// 使用 `RwSignal` 因为它实现了 `Copy` trait，可以直接放进闭包和 Context。
#[derive(Clone, Copy)]
pub struct UiStore {
    pub view: RwSignal<View>,
    pub dishes: RwSignal<Option<DishListView>>,
    pub details: RwSignal<Option<DishDetailsView>>,
    pub cart: RwSignal<Option<CartView>>,
    pub badge: RwSignal<u32>,
    pub profile: RwSignal<ProfileForm>,
    pub search: RwSignal<String>,
    pub toasts: RwSignal<Vec<Toast>>,
    next_toast_id: RwSignal<u64>,
}

impl UiStore {
    pub fn new() -> Self {
        Self {
            view: RwSignal::new(View::default()),
            dishes: RwSignal::new(None),
            details: RwSignal::new(None),
            cart: RwSignal::new(None),
            badge: RwSignal::new(0),
            profile: RwSignal::new(ProfileForm::default()),
            search: RwSignal::new(String::new()),
            toasts: RwSignal::new(Vec::new()),
            next_toast_id: RwSignal::new(0),
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for UiStore {
    fn show_view(&self, view: View) {
        // 每次导航都清掉详情，新菜品加载完成前不显示上一个菜品
        self.details.set(None);
        // 回到登录/注册页时丢弃上一个用户的数据
        if view.is_public() {
            self.cart.set(None);
            self.badge.set(0);
            self.profile.set(ProfileForm::default());
        }
        if view == View::Menu {
            self.search.set(String::new());
        }
        self.view.set(view);
    }

    fn render_dishes(&self, list: DishListView) {
        self.dishes.set(Some(list));
    }

    fn render_dish_details(&self, details: DishDetailsView) {
        self.details.set(Some(details));
    }

    fn render_cart(&self, cart: CartView) {
        self.cart.set(Some(cart));
    }

    fn set_badge(&self, count: u32) {
        self.badge.set(count);
    }

    fn fill_profile(&self, form: ProfileForm) {
        self.profile.set(form);
    }
}

#[async_trait(?Send)]
impl Notifier for UiStore {
    fn notify(&self, kind: NoticeKind, message: &str) {
        let id = self.next_toast_id.get_untracked();
        self.next_toast_id.set(id + 1);
        self.toasts.update(|list| {
            list.push(Toast {
                id,
                kind,
                message: message.to_string(),
            })
        });

        let store = *self;
        set_timeout(move || store.dismiss(id), TOAST_DURATION);
    }

    async fn alert(&self, _kind: NoticeKind, title: &str, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&format!("{}\n\n{}", title, message));
        }
    }

    async fn confirm(&self, title: &str, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(&format!("{}\n\n{}", title, prompt)).ok())
            .unwrap_or(false)
    }
}

// =========================================================
// Context 访问
// =========================================================

/// `AppContext` 内含 `Rc`，借助本地 `StoredValue` 放入 Context
pub type AppHandle = StoredValue<AppContext, LocalStorage>;

pub fn use_app() -> AppHandle {
    use_context::<AppHandle>().expect("AppContext should be provided")
}

pub fn use_store() -> UiStore {
    use_context::<UiStore>().expect("UiStore should be provided")
}

/// 在新任务中运行一个功能操作
pub fn spawn_with<F, Fut>(app: AppHandle, task: F)
where
    F: FnOnce(AppContext) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    spawn_local(task(app.get_value()));
}
