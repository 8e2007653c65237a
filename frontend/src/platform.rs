//! 能力接口 (Capabilities)
//!
//! 所有副作用都经过这里声明的 trait：网络、存储、地址栏、通知、渲染、定时器。
//! 浏览器实现位于 `web` 与 `store` 模块，测试使用内存实现。
//! `(?Send)` 是因为 WASM 单线程环境下 `JsValue` 等类型不是 Send 的。

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use dishdash_shared::protocol::HttpMethod;

use crate::api::ApiClient;
use crate::auth::Session;
use crate::cart::CartView;
use crate::config::AppConfig;
use crate::dishes::{DishDetailsView, DishListView};
use crate::error::AppResult;
use crate::profile::ProfileForm;
use crate::web::route::View;

// =========================================================
// HTTP 传输层
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    /// 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

/// HTTP 传输 trait，只负责把请求送出去；状态码语义由 `ApiClient` 处理
#[async_trait(?Send)]
pub trait HttpTransport {
    /// 传输失败时返回 `ErrorKind::Network`
    async fn send(&self, req: HttpRequest) -> AppResult<HttpResponse>;
}

// =========================================================
// 持久化、地址栏、定时器
// =========================================================

/// 客户端本地键值存储
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// URL fragment 导航
pub trait Navigator {
    /// 当前 fragment（含 `#`，可能为空串）
    fn fragment(&self) -> String;
    /// 改写 fragment；浏览器中会触发 `hashchange` 并重新进入路由
    fn set_fragment(&self, fragment: &str);
    /// 整页跳转（服务端指示的重定向）
    fn open_url(&self, url: &str);
}

#[async_trait(?Send)]
pub trait Delay {
    async fn sleep(&self, duration: Duration);
}

// =========================================================
// UI 能力
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

#[async_trait(?Send)]
pub trait Notifier {
    /// 非阻塞提示（toast）
    fn notify(&self, kind: NoticeKind, message: &str);
    /// 阻塞式提示框，用户关闭后返回
    async fn alert(&self, kind: NoticeKind, title: &str, message: &str);
    /// 显式确认
    async fn confirm(&self, title: &str, prompt: &str) -> bool;
}

/// 渲染面：各功能模块只把视图模型交给它
pub trait Screen {
    fn show_view(&self, view: View);
    fn render_dishes(&self, list: DishListView);
    fn render_dish_details(&self, details: DishDetailsView);
    fn render_cart(&self, cart: CartView);
    fn set_badge(&self, count: u32);
    fn fill_profile(&self, form: ProfileForm);
}

// =========================================================
// 应用上下文
// =========================================================

/// 注入到所有功能模块的上下文，克隆开销很小
#[derive(Clone)]
pub struct AppContext {
    pub config: Rc<AppConfig>,
    pub session: Session,
    pub api: ApiClient,
    pub navigator: Rc<dyn Navigator>,
    pub notifier: Rc<dyn Notifier>,
    pub screen: Rc<dyn Screen>,
    pub delay: Rc<dyn Delay>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        transport: Rc<dyn HttpTransport>,
        storage: Rc<dyn TokenStore>,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
        screen: Rc<dyn Screen>,
        delay: Rc<dyn Delay>,
    ) -> Self {
        let config = Rc::new(config);
        let session = Session::new(storage, &config.token_storage_key);
        let api = ApiClient::new(
            config.clone(),
            transport,
            session.clone(),
            navigator.clone(),
            notifier.clone(),
        );

        Self {
            config,
            session,
            api,
            navigator,
            notifier,
            screen,
            delay,
        }
    }

    /// 通过改写 fragment 导航
    pub fn go(&self, route: &crate::web::route::Route) {
        self.navigator.set_fragment(&route.fragment());
    }
}
