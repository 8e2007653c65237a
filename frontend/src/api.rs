//! REST API 客户端
//!
//! 负责 bearer token 注入、JSON 序列化，以及统一的状态码处理：
//! - 401/403：清除会话、跳转登录页、返回 `SessionExpired`
//! - 其他非 2xx：返回携带服务端消息的 `Api` 错误
//! - 2xx 但不是 JSON：返回合成的 `{success: true}` 应答

use std::rc::Rc;

use dishdash_shared::protocol::ApiRequest;
use dishdash_shared::{Ack, CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::auth::Session;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::platform::{HttpRequest, HttpResponse, HttpTransport, Navigator, NoticeKind, Notifier};
use crate::web::route::Route;

const SESSION_EXPIRED_NOTICE: &str =
    "Session Expired: Your session has expired or you are unauthorized. Please log in again.";

#[derive(Clone)]
pub struct ApiClient {
    config: Rc<AppConfig>,
    transport: Rc<dyn HttpTransport>,
    session: Session,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
}

impl ApiClient {
    pub fn new(
        config: Rc<AppConfig>,
        transport: Rc<dyn HttpTransport>,
        session: Session,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            transport,
            session,
            navigator,
            notifier,
        }
    }

    /// 发送一个 API 请求并解析响应
    pub async fn send<R: ApiRequest>(&self, req: &R) -> AppResult<R::Response> {
        let path = req.path();
        let mut http = HttpRequest::new(&self.config.api_url(&path), R::METHOD)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);

        if let Some(token) = self.session.token() {
            http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        if R::METHOD.has_body() {
            let body = serde_json::to_string(req).map_err(|e| AppError::from(e).in_op(&*path))?;
            http = http.with_body(body);
        }

        let resp = self.transport.send(http).await.map_err(|e| {
            log_error!("[Http] {} {} failed: {}", R::METHOD.as_str(), path, e);
            e.in_op(&*path)
        })?;

        if resp.status == 401 || resp.status == 403 {
            self.expire_session();
            return Err(AppError::session_expired().in_op(&*path));
        }

        if !resp.ok() {
            let err = AppError::api(resp.status, error_message(&resp)).in_op(&*path);
            log_error!("[Http] {} {}: {}", R::METHOD.as_str(), path, err);
            return Err(err);
        }

        parse_success(&resp).map_err(|e| e.in_op(&*path))
    }

    /// 会话过期：只在这里提示一次
    fn expire_session(&self) {
        log_warn!("[Http] Unauthorized response. Clearing session.");
        self.session.clear();
        self.notifier.notify(NoticeKind::Warning, SESSION_EXPIRED_NOTICE);
        self.navigator.set_fragment(&Route::Login.fragment());
    }
}

/// 成功响应：JSON 则解析，否则视为空 body 的确认
fn parse_success<T: DeserializeOwned>(resp: &HttpResponse) -> AppResult<T> {
    if resp.is_json() {
        Ok(serde_json::from_str(&resp.body)?)
    } else {
        Ok(serde_json::from_value(serde_json::to_value(Ack::synthetic())?)?)
    }
}

/// 错误消息优先取 JSON body 的 `message`，其次取纯文本 body
fn error_message(resp: &HttpResponse) -> String {
    let fallback = || format!("HTTP {}", resp.status);

    match serde_json::from_str::<serde_json::Value>(&resp.body) {
        Ok(value) => value
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(fallback),
        Err(_) => {
            let text = resp.body.trim();
            if text.is_empty() {
                fallback()
            } else {
                text.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::{MockReply, TestHarness};
    use dishdash_shared::protocol::{GetCartRequest, PlaceOrderRequest, UpdateCartRequest};
    use serde_json::json;

    #[tokio::test]
    async fn test_bearer_header_only_when_token_present() {
        let h = TestHarness::new();
        h.transport
            .reply("GET /Customer/Cart/GetCartData", MockReply::json(200, json!({"cartItems": []})));

        h.ctx.api.send(&GetCartRequest).await.unwrap();
        assert_eq!(h.transport.last().header("Authorization"), None);

        h.ctx.session.store_token("tok-1");
        h.ctx.api.send(&GetCartRequest).await.unwrap();
        assert_eq!(h.transport.last().header("Authorization"), Some("Bearer tok-1"));
        assert_eq!(h.transport.last().header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_get_has_no_body_and_post_serializes_json() {
        let h = TestHarness::authenticated();
        h.transport
            .reply("GET /Customer/Cart/GetCartData", MockReply::json(200, json!({"cartItems": []})));
        h.transport
            .reply("POST /Customer/Cart/UpdateCart", MockReply::json(200, json!({"success": true})));

        h.ctx.api.send(&GetCartRequest).await.unwrap();
        assert_eq!(h.transport.last().body, None);

        h.ctx
            .api
            .send(&UpdateCartRequest { dish_id: 4, quantity: 3 })
            .await
            .unwrap();
        let body: serde_json::Value =
            serde_json::from_str(h.transport.last().body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"dishId": 4, "quantity": 3}));
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_and_redirects() {
        for status in [401, 403] {
            let h = TestHarness::authenticated();
            h.navigator.set_fragment("#cart");
            h.transport
                .reply("GET /Customer/Cart/GetCartData", MockReply::text(status, ""));

            let err = h.ctx.api.send(&GetCartRequest).await.unwrap_err();

            assert!(err.is_session_expired());
            assert!(!h.ctx.session.is_authenticated());
            assert_eq!(h.navigator.fragment(), "#login");
            assert_eq!(h.notifier.notices_of(NoticeKind::Warning).len(), 1);
        }
    }

    #[tokio::test]
    async fn test_api_error_uses_server_message() {
        let h = TestHarness::authenticated();
        h.transport.reply(
            "POST /Customer/Cart/PlaceOrder",
            MockReply::json(400, json!({"message": "Your cart is empty"})),
        );

        let err = h.ctx.api.send(&PlaceOrderRequest {}).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Api { status: 400 });
        assert_eq!(err.message(), "Your cart is empty");
        assert!(h.ctx.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_api_error_falls_back_to_status() {
        let h = TestHarness::authenticated();
        h.transport
            .reply("POST /Customer/Cart/PlaceOrder", MockReply::json(500, json!({"error": "boom"})));
        let err = h.ctx.api.send(&PlaceOrderRequest {}).await.unwrap_err();
        assert_eq!(err.message(), "HTTP 500");

        h.transport
            .reply("POST /Customer/Cart/PlaceOrder", MockReply::text(502, "Bad gateway"));
        let err = h.ctx.api.send(&PlaceOrderRequest {}).await.unwrap_err();
        assert_eq!(err.message(), "Bad gateway");
    }

    #[tokio::test]
    async fn test_non_json_success_is_synthetic_ack() {
        let h = TestHarness::authenticated();
        h.transport
            .reply("POST /Customer/Cart/PlaceOrder", MockReply::text(200, ""));

        let ack = h.ctx.api.send(&PlaceOrderRequest {}).await.unwrap();
        assert!(ack.success);
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        let h = TestHarness::authenticated();
        h.transport
            .reply("GET /Customer/Cart/GetCartData", MockReply::NetworkFailure);

        let err = h.ctx.api.send(&GetCartRequest).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Network);
        assert!(h.ctx.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let h = TestHarness::authenticated();
        h.transport.reply(
            "GET /Customer/Cart/GetCartData",
            MockReply::Respond {
                status: 200,
                content_type: Some("application/json; charset=utf-8".to_string()),
                body: "{not json".to_string(),
            },
        );

        let err = h.ctx.api.send(&GetCartRequest).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
    }
}
