use serde::{Deserialize, Serialize};

pub mod html;
pub mod money;
pub mod protocol;

pub use money::Money;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 菜品（只读）
///
/// `description` 是服务端提供的 HTML 片段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "imageURL", default)]
    pub image_url: Option<String>,
}

impl Dish {
    pub fn price(&self) -> Money {
        Money::from_f64(self.price)
    }

    /// 去除 HTML 标记后的纯文本描述
    pub fn plain_description(&self) -> String {
        self.description
            .as_deref()
            .map(html::strip_html)
            .unwrap_or_default()
    }

    /// 名称或纯文本描述是否包含搜索词（不区分大小写）
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.plain_description().to_lowercase().contains(&needle)
    }
}

/// 购物车行项目，归服务端所有
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub dish_id: i64,
    pub dish_name: String,
    pub dish_price: f64,
    pub quantity: u32,
}

impl CartItem {
    pub fn unit_price(&self) -> Money {
        Money::from_f64(self.dish_price)
    }

    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity
    }
}

/// 购物车快照：服务端返回的权威内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartData {
    #[serde(default)]
    pub cart_items: Option<Vec<CartItem>>,
}

impl CartData {
    pub fn items(&self) -> &[CartItem] {
        self.cart_items.as_deref().unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// 徽标数字：所有行数量之和
    pub fn total_quantity(&self) -> u32 {
        self.items().iter().map(|item| item.quantity).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.items().iter().map(CartItem::line_total).sum()
    }
}

/// 用户资料
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// 所有变更类接口的统一应答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

impl Ack {
    /// 非 JSON 的成功响应（如空 body）所对应的合成应答
    pub fn synthetic() -> Self {
        Self {
            success: true,
            message: Some("Operation successful.".to_string()),
            redirect_url: None,
        }
    }

    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.message.as_deref() {
            Some(msg) if !msg.is_empty() => msg,
            _ => fallback,
        }
    }
}
