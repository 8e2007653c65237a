//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现 `HttpTransport`。

use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::error::{AppError, AppResult};
use crate::platform::{HttpRequest, HttpResponse, HttpTransport};

/// 基于 `window.fetch` 的传输实现
pub struct FetchTransport;

impl FetchTransport {
    fn build(req: &HttpRequest) -> AppResult<Request> {
        let headers = Headers::new()
            .map_err(|e| AppError::network(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| AppError::network(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| AppError::network(format!("请求构建失败: {:?}", e)))
    }
}

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> AppResult<HttpResponse> {
        let request = Self::build(&req)?;

        let window =
            web_sys::window().ok_or_else(|| AppError::network("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| AppError::network(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| AppError::network(format!("Response 类型转换失败: {:?}", e)))?;

        let content_type = response.headers().get("content-type").ok().flatten();

        let text_promise = response
            .text()
            .map_err(|e| AppError::decode(format!("{:?}", e)))?;
        let body = JsFuture::from(text_promise)
            .await
            .map_err(|e| AppError::network(format!("{:?}", e)))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse {
            status: response.status(),
            content_type,
            body,
        })
    }
}
