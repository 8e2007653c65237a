//! 运行时配置
//!
//! 默认值集中在这里；构建时可通过环境变量覆盖（`option_env!`），
//! 例如 `DISHDASH_API_BASE_URL=https://api.example.com trunk build`。

use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5293";
const DEFAULT_TOKEN_STORAGE_KEY: &str = "authToken";
const DEFAULT_REDIRECT_DELAY_MS: u64 = 1000;
const DEFAULT_LOGOUT_DELAY_MS: u64 = 2000;

/// 新密码最小长度
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// REST API 根地址（无尾部斜杠）
    pub api_base_url: String,
    /// 菜品图片的根地址
    pub image_base_url: String,
    /// 保存 bearer token 的 LocalStorage 键
    pub token_storage_key: String,
    /// 服务端要求跳转时的延迟
    pub redirect_delay: Duration,
    /// 修改密码成功后强制登出的延迟
    pub logout_delay: Duration,
    pub min_password_len: usize,
}

impl AppConfig {
    /// 从构建时环境变量读取，读不到就用默认值
    pub fn from_build_env() -> Self {
        let api_base_url = option_env!("DISHDASH_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL);
        let image_base_url = option_env!("DISHDASH_IMAGE_BASE_URL").unwrap_or(api_base_url);
        let token_key = option_env!("DISHDASH_TOKEN_KEY").unwrap_or(DEFAULT_TOKEN_STORAGE_KEY);

        Self::new(api_base_url)
            .with_image_base_url(image_base_url)
            .with_token_storage_key(token_key)
    }

    pub fn new(api_base_url: &str) -> Self {
        let api_base_url = trim_base(api_base_url);
        Self {
            image_base_url: api_base_url.clone(),
            api_base_url,
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_string(),
            redirect_delay: Duration::from_millis(DEFAULT_REDIRECT_DELAY_MS),
            logout_delay: Duration::from_millis(DEFAULT_LOGOUT_DELAY_MS),
            min_password_len: MIN_PASSWORD_LEN,
        }
    }

    pub fn with_image_base_url(mut self, url: &str) -> Self {
        self.image_base_url = trim_base(url);
        self
    }

    pub fn with_token_storage_key(mut self, key: &str) -> Self {
        self.token_storage_key = key.to_string();
        self
    }

    /// 拼接完整请求地址
    pub fn api_url(&self, path: &str) -> String {
        join(&self.api_base_url, path)
    }

    /// 拼接图片地址
    pub fn image_url(&self, image_ref: &str) -> String {
        join(&self.image_base_url, image_ref)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
