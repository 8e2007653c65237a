use std::fmt;

// =========================================================
// 错误类别
// =========================================================

/// 错误类别
///
/// 传输层问题（会话过期、状态码解析）在 HTTP 客户端中一次性处理；
/// 业务层问题在各功能操作中一次性处理并通知用户。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401/403：会话已被 HTTP 客户端清理，调用方不应再次提示
    SessionExpired,
    /// 其他非 2xx 响应
    Api { status: u16 },
    /// 纯本地校验失败，未发出任何请求
    Validation,
    /// 传输失败（fetch 被拒绝等）
    Network,
    /// 响应体无法解析，或请求体无法序列化
    Decode,
}

impl ErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorKind::SessionExpired => "SESSION_EXPIRED",
            ErrorKind::Api { .. } => "API_ERROR",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Decode => "DECODE_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 前端统一错误
///
/// - kind: 错误类别
/// - message: 面向用户的消息（Api 错误时为服务端消息）
/// - spans: 错误向上传播时经过的操作
#[derive(Debug, Clone)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    spans: Vec<String>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            spans: Vec::new(),
        }
    }

    pub fn session_expired() -> Self {
        Self::new(ErrorKind::SessionExpired, "Unauthorized or session expired")
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api { status }, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// 添加操作追踪
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(operation.into());
        self
    }

    pub fn is_session_expired(&self) -> bool {
        self.kind == ErrorKind::SessionExpired
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 面向用户的提示文本
    ///
    /// - 会话过期：`None`，HTTP 客户端已提示过
    /// - Api / Validation：原样展示消息
    /// - Network / Decode：使用调用方给出的通用提示
    pub fn user_message(&self, generic: &str) -> Option<String> {
        match self.kind {
            ErrorKind::SessionExpired => None,
            ErrorKind::Api { .. } | ErrorKind::Validation => Some(self.message.clone()),
            ErrorKind::Network | ErrorKind::Decode => Some(generic.to_string()),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: {}", self.spans.join(" -> "))?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::decode(e.to_string())
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_trace() {
        let err = AppError::api(409, "Insufficient quantity")
            .in_op("cart.add")
            .in_op("details.add_button");
        assert_eq!(
            err.to_string(),
            "[API_ERROR] Insufficient quantity | trace: cart.add -> details.add_button"
        );
    }

    #[test]
    fn test_user_message_policy() {
        let generic = "Please try again.";
        assert_eq!(AppError::session_expired().user_message(generic), None);
        assert_eq!(
            AppError::api(400, "Cart is empty").user_message(generic).as_deref(),
            Some("Cart is empty")
        );
        assert_eq!(
            AppError::network("TypeError: Failed to fetch").user_message(generic).as_deref(),
            Some(generic)
        );
    }
}
