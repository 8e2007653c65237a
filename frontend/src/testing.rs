//! 测试工具：内存版的能力实现与组装好的 `TestHarness`

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use crate::cart::CartView;
use crate::config::AppConfig;
use crate::dishes::{DishDetailsView, DishListView};
use crate::error::{AppError, AppResult};
use crate::platform::{
    AppContext, Delay, HttpRequest, HttpResponse, HttpTransport, Navigator, NoticeKind, Notifier,
    Screen, TokenStore,
};
use crate::profile::ProfileForm;
use crate::web::route::{Route, View};
use crate::web::router::{RouteOutcome, handle_current};

pub const TEST_BASE_URL: &str = "http://api.test";

// =========================================================
// MockTransport
// =========================================================

#[derive(Debug, Clone)]
pub enum MockReply {
    Respond {
        status: u16,
        content_type: Option<String>,
        body: String,
    },
    NetworkFailure,
}

impl MockReply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        MockReply::Respond {
            status,
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        MockReply::Respond {
            status,
            content_type: Some("text/plain".to_string()),
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RecordedRequest {
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 按 `"METHOD /path"` 返回预设响应
///
/// 每个键维护一个队列：多于一个时逐个弹出，只剩一个时重复返回它。
/// 未配置的键返回 404。
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<HashMap<String, VecDeque<MockReply>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// 替换该键的全部响应
    pub fn reply(&self, key: &str, reply: MockReply) {
        self.replies
            .borrow_mut()
            .insert(key.to_string(), VecDeque::from([reply]));
    }

    /// 追加一个后续响应
    pub fn enqueue(&self, key: &str, reply: MockReply) {
        self.replies
            .borrow_mut()
            .entry(key.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.requests.borrow().iter().map(RecordedRequest::key).collect()
    }

    pub fn count(&self, key: &str) -> usize {
        self.requests.borrow().iter().filter(|r| r.key() == key).count()
    }

    pub fn find(&self, key: &str) -> Option<RecordedRequest> {
        self.requests.borrow().iter().find(|r| r.key() == key).cloned()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, req: HttpRequest) -> AppResult<HttpResponse> {
        let recorded = RecordedRequest {
            method: req.method.as_str().to_string(),
            path: req
                .url
                .strip_prefix(TEST_BASE_URL)
                .unwrap_or(&req.url)
                .to_string(),
            headers: req.headers.clone(),
            body: req.body.clone(),
        };
        let key = recorded.key();
        self.requests.borrow_mut().push(recorded);

        let reply = {
            let mut replies = self.replies.borrow_mut();
            match replies.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some(MockReply::Respond {
                status,
                content_type,
                body,
            }) => Ok(HttpResponse {
                status,
                content_type,
                body,
            }),
            Some(MockReply::NetworkFailure) => Err(AppError::network("TypeError: Failed to fetch")),
            None => Ok(HttpResponse {
                status: 404,
                content_type: None,
                body: "Not Found".to_string(),
            }),
        }
    }
}

// =========================================================
// 其余能力
// =========================================================

#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl TokenStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.items.borrow_mut().remove(key);
        true
    }
}

#[derive(Default)]
pub struct MockNavigator {
    fragment: RefCell<String>,
    history: RefCell<Vec<String>>,
    opened: RefCell<Vec<String>>,
}

impl MockNavigator {
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl Navigator for MockNavigator {
    fn fragment(&self) -> String {
        self.fragment.borrow().clone()
    }

    fn set_fragment(&self, fragment: &str) {
        *self.fragment.borrow_mut() = fragment.to_string();
        self.history.borrow_mut().push(fragment.to_string());
    }

    fn open_url(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }
}

pub struct RecordingNotifier {
    notices: RefCell<Vec<(NoticeKind, String)>>,
    alerts: RefCell<Vec<(NoticeKind, String, String)>>,
    confirms: RefCell<Vec<String>>,
    confirm_answer: Cell<bool>,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self {
            notices: RefCell::new(Vec::new()),
            alerts: RefCell::new(Vec::new()),
            confirms: RefCell::new(Vec::new()),
            confirm_answer: Cell::new(true),
        }
    }
}

impl RecordingNotifier {
    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.notices.borrow().clone()
    }

    pub fn notices_of(&self, kind: NoticeKind) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub fn alerts(&self) -> Vec<(NoticeKind, String, String)> {
        self.alerts.borrow().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.notices.borrow_mut().push((kind, message.to_string()));
    }

    async fn alert(&self, kind: NoticeKind, title: &str, message: &str) {
        self.alerts
            .borrow_mut()
            .push((kind, title.to_string(), message.to_string()));
    }

    async fn confirm(&self, _title: &str, prompt: &str) -> bool {
        self.confirms.borrow_mut().push(prompt.to_string());
        self.confirm_answer.get()
    }
}

#[derive(Default)]
pub struct RecordingScreen {
    views: RefCell<Vec<View>>,
    dishes: RefCell<Vec<DishListView>>,
    details: RefCell<Vec<DishDetailsView>>,
    carts: RefCell<Vec<CartView>>,
    badges: RefCell<Vec<u32>>,
    profiles: RefCell<Vec<ProfileForm>>,
}

impl RecordingScreen {
    pub fn views(&self) -> Vec<View> {
        self.views.borrow().clone()
    }

    pub fn last_dishes(&self) -> Option<DishListView> {
        self.dishes.borrow().last().cloned()
    }

    pub fn last_details(&self) -> Option<DishDetailsView> {
        self.details.borrow().last().cloned()
    }

    pub fn last_cart(&self) -> Option<CartView> {
        self.carts.borrow().last().cloned()
    }

    pub fn cart_renders(&self) -> usize {
        self.carts.borrow().len()
    }

    pub fn badge(&self) -> Option<u32> {
        self.badges.borrow().last().copied()
    }

    pub fn last_profile(&self) -> Option<ProfileForm> {
        self.profiles.borrow().last().cloned()
    }
}

impl Screen for RecordingScreen {
    fn show_view(&self, view: View) {
        self.views.borrow_mut().push(view);
    }

    fn render_dishes(&self, list: DishListView) {
        self.dishes.borrow_mut().push(list);
    }

    fn render_dish_details(&self, details: DishDetailsView) {
        self.details.borrow_mut().push(details);
    }

    fn render_cart(&self, cart: CartView) {
        self.carts.borrow_mut().push(cart);
    }

    fn set_badge(&self, count: u32) {
        self.badges.borrow_mut().push(count);
    }

    fn fill_profile(&self, form: ProfileForm) {
        self.profiles.borrow_mut().push(form);
    }
}

/// 不真正等待，只记录时长
#[derive(Default)]
pub struct InstantDelay {
    slept: RefCell<Vec<Duration>>,
}

impl InstantDelay {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Delay for InstantDelay {
    async fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

// =========================================================
// TestHarness
// =========================================================

pub struct TestHarness {
    pub ctx: AppContext,
    pub transport: Rc<MockTransport>,
    pub storage: Rc<MemoryStorage>,
    pub navigator: Rc<MockNavigator>,
    pub notifier: Rc<RecordingNotifier>,
    pub screen: Rc<RecordingScreen>,
    pub delay: Rc<InstantDelay>,
}

impl TestHarness {
    pub fn new() -> Self {
        let transport = Rc::new(MockTransport::default());
        let storage = Rc::new(MemoryStorage::default());
        let navigator = Rc::new(MockNavigator::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let screen = Rc::new(RecordingScreen::default());
        let delay = Rc::new(InstantDelay::default());

        let ctx = AppContext::new(
            AppConfig::new(TEST_BASE_URL),
            transport.clone(),
            storage.clone(),
            navigator.clone(),
            notifier.clone(),
            screen.clone(),
            delay.clone(),
        );

        Self {
            ctx,
            transport,
            storage,
            navigator,
            notifier,
            screen,
            delay,
        }
    }

    /// 已存有 token 的会话
    pub fn authenticated() -> Self {
        let harness = Self::new();
        harness.ctx.session.store_token("test-token");
        harness
    }

    /// 模拟浏览器：改写 fragment 后反复进入路由，直到某个视图被显示
    pub async fn visit(&self, fragment: &str) -> Route {
        self.navigator.set_fragment(fragment);
        for _ in 0..8 {
            match handle_current(&self.ctx).await {
                RouteOutcome::Shown(route) => return route,
                RouteOutcome::Redirected(_) => continue,
            }
        }
        panic!("routing did not settle for {fragment:?}");
    }
}
