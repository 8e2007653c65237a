//! 定时器封装模块
//!
//! 把 `setTimeout` 包装成 Promise，再交给 `JsFuture` 等待。

use std::time::Duration;

use async_trait::async_trait;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::platform::Delay;

pub struct BrowserDelay;

#[async_trait(?Send)]
impl Delay for BrowserDelay {
    async fn sleep(&self, duration: Duration) {
        let millis = duration.as_millis().min(i32::MAX as u128) as i32;
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window()
                .ok_or_else(|| JsValue::from_str("window unavailable"))
                .and_then(|window| {
                    window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                });

            // 无法计时就立即完成，调用方不会永远挂起
            if let Err(e) = scheduled {
                log_error!("[Timer] setTimeout failed: {:?}", e);
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}
