//! 认证模块
//!
//! 管理 bearer token 会话，与路由系统解耦：
//! 路由只通过 `Session::is_authenticated` 读取认证状态。

use std::rc::Rc;

use dishdash_shared::protocol::{AuthResponse, LoginRequest, RegisterRequest};

use crate::error::{AppError, AppResult};
use crate::platform::{AppContext, NoticeKind, TokenStore};
use crate::web::route::Route;

/// 会话存储
///
/// 进程内唯一实例，token 持久化在客户端本地存储中，刷新页面后仍然有效。
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn TokenStore>,
    key: Rc<str>,
}

impl Session {
    pub fn new(store: Rc<dyn TokenStore>, key: &str) -> Self {
        Self {
            store,
            key: Rc::from(key),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(&self.key)
    }

    /// 仅检查本地是否存有 token，服务端失效要等下一次 401/403 才能发现
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn store_token(&self, token: &str) {
        if !self.store.set(&self.key, token) {
            log_warn!("[Auth] Failed to persist token.");
        }
    }

    pub fn clear(&self) {
        self.store.remove(&self.key);
    }
}

/// 注册表单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub last_name: String,
    pub address: String,
}

impl RegisterForm {
    fn validate(&self) -> AppResult<()> {
        if self.password != self.confirm_password {
            return Err(AppError::validation("Passwords do not match"));
        }
        Ok(())
    }

    fn to_request(&self) -> RegisterRequest {
        let address = self.address.trim();
        RegisterRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
            last_name: self.last_name.clone(),
            address: (!address.is_empty()).then(|| address.to_string()),
        }
    }
}

/// 登录
///
/// # Returns
/// 是否成功；失败时已经提示过用户，且不会导航
pub async fn login(ctx: &AppContext, email: &str, password: &str) -> bool {
    let req = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    match ctx.api.send(&req).await {
        Ok(resp) => {
            establish(ctx, resp);
            true
        }
        Err(e) => {
            report_auth_failure(ctx, "Error logging in", e.in_op("auth.login")).await;
            false
        }
    }
}

/// 注册；确认密码不一致时在本地失败，不发请求
pub async fn register(ctx: &AppContext, form: &RegisterForm) -> bool {
    if let Err(e) = form.validate() {
        ctx.notifier.alert(NoticeKind::Error, "Error", e.message()).await;
        return false;
    }

    match ctx.api.send(&form.to_request()).await {
        Ok(resp) => {
            establish(ctx, resp);
            true
        }
        Err(e) => {
            report_auth_failure(ctx, "Error registering", e.in_op("auth.register")).await;
            false
        }
    }
}

/// 注销：纯本地操作，不需要服务端确认
pub fn logout(ctx: &AppContext) {
    ctx.session.clear();
    ctx.go(&Route::auth_failure_redirect());
    log_info!("[Auth] Logged out.");
}

/// 保存 token（若有）并进入菜单
///
/// 响应中没有 token 时视为 cookie 会话，仍然算作成功。
fn establish(ctx: &AppContext, resp: AuthResponse) {
    match resp.token {
        Some(token) => {
            ctx.session.store_token(&token);
            log_info!("[Auth] Authenticated, token saved.");
        }
        None => log_info!("[Auth] Authenticated (assuming cookie session)."),
    }
    ctx.go(&Route::auth_success_redirect());
}

async fn report_auth_failure(ctx: &AppContext, prefix: &str, err: AppError) {
    log_error!("[Auth] {}", err);
    if let Some(msg) = err.user_message("Unknown error") {
        ctx.notifier
            .alert(NoticeKind::Error, "Error", &format!("{}: {}", prefix, msg))
            .await;
    }
}
