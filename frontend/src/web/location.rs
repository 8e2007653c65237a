//! 地址栏封装模块
//!
//! 使用 `window.location` 读写 fragment。

use crate::platform::Navigator;

fn location() -> Option<web_sys::Location> {
    Some(web_sys::window()?.location())
}

/// 基于 `location.hash` 的导航实现
pub struct HashNavigator;

impl Navigator for HashNavigator {
    fn fragment(&self) -> String {
        location()
            .and_then(|l| l.hash().ok())
            .unwrap_or_default()
    }

    fn set_fragment(&self, fragment: &str) {
        if let Some(location) = location() {
            let _ = location.set_hash(fragment);
        }
    }

    fn open_url(&self, url: &str) {
        if let Some(location) = location() {
            let _ = location.set_href(url);
        }
    }
}
