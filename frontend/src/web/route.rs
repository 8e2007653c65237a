//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! `decide(fragment, 认证状态)` 给出要显示的路由或重定向目标，
//! 副作用（显示视图、加载数据、改写 fragment）由 `router` 模块执行。

use std::fmt::Display;

/// 页面上的视图区块
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Register,
    Menu,
    Cart,
    Profile,
    DishDetails,
}

impl View {
    /// 未登录也可访问的视图（同时隐藏导航栏）
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

/// 应用路由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Menu,
    Cart,
    Profile,
    DishDetails { id: i64 },
}

impl Route {
    /// 获取路由对应的 fragment
    pub fn fragment(&self) -> String {
        match self {
            Self::Login => "#login".to_string(),
            Self::Register => "#register".to_string(),
            Self::Menu => "#menu".to_string(),
            Self::Cart => "#cart".to_string(),
            Self::Profile => "#profile".to_string(),
            Self::DishDetails { id } => format!("#details?id={}", id),
        }
    }

    pub fn view(&self) -> View {
        match self {
            Self::Login => View::Login,
            Self::Register => View::Register,
            Self::Menu => View::Menu,
            Self::Cart => View::Cart,
            Self::Profile => View::Profile,
            Self::DishDetails { .. } => View::DishDetails,
        }
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Menu
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fragment())
    }
}

/// 重定向原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectCause {
    /// 未登录访问受保护视图
    Unauthenticated,
    /// 已登录访问登录/注册页
    AlreadyAuthenticated,
    /// `#details` 缺少 id（warn 级别）
    MissingDishId,
    /// `#details` 的 id 不是整数（error 级别）
    MalformedDishId(String),
    /// 无法识别的 fragment
    UnknownFragment(String),
}

impl RedirectCause {
    /// 只有 id 格式错误算作 error，其余按 warn 记录
    pub fn is_error(&self) -> bool {
        matches!(self, Self::MalformedDishId(_))
    }
}

impl Display for RedirectCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "access denied"),
            Self::AlreadyAuthenticated => write!(f, "already authenticated"),
            Self::MissingDishId => write!(f, "no dish id specified"),
            Self::MalformedDishId(raw) => write!(f, "dish id {:?} is not a number", raw),
            Self::UnknownFragment(raw) => write!(f, "unknown fragment {:?}", raw),
        }
    }
}

/// 路由决策
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Show(Route),
    Redirect { to: Route, cause: RedirectCause },
}

/// fragment 解析后的目标
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target<'a> {
    Login,
    Register,
    Menu,
    Cart,
    Profile,
    Details(Option<&'a str>),
    Unknown,
}

impl<'a> Target<'a> {
    fn parse(fragment: &'a str) -> Self {
        let trimmed = fragment.strip_prefix('#').unwrap_or(fragment);
        let (path, query) = match trimmed.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (trimmed, None),
        };

        match (path, query) {
            ("details", query) => Self::Details(query.and_then(|q| query_param(q, "id"))),
            (_, Some(_)) => Self::Unknown,
            ("login", None) => Self::Login,
            ("register", None) => Self::Register,
            ("menu", None) => Self::Menu,
            ("cart", None) => Self::Cart,
            ("profile", None) => Self::Profile,
            _ => Self::Unknown,
        }
    }

    fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

/// 取查询串中第一个非空的同名参数
fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
        .filter(|v| !v.is_empty())
}

/// **核心方法：对 fragment 做守卫与解析**
///
/// 规则依次为：
/// 1. 未登录且目标不是登录/注册页 -> 登录页
/// 2. 已登录且目标是登录/注册页 -> 菜单
/// 3. 详情页需要整数 id，缺失或格式错误 -> 菜单
/// 4. 无法识别 -> 已登录去菜单，否则去登录页
pub fn decide(fragment: &str, is_authenticated: bool) -> RouteDecision {
    let target = Target::parse(fragment);

    if !is_authenticated && !target.is_public() {
        return RouteDecision::Redirect {
            to: Route::auth_failure_redirect(),
            cause: RedirectCause::Unauthenticated,
        };
    }

    if is_authenticated && target.is_public() {
        return RouteDecision::Redirect {
            to: Route::auth_success_redirect(),
            cause: RedirectCause::AlreadyAuthenticated,
        };
    }

    let route = match target {
        Target::Login => Route::Login,
        Target::Register => Route::Register,
        Target::Menu => Route::Menu,
        Target::Cart => Route::Cart,
        Target::Profile => Route::Profile,
        Target::Details(None) => {
            return RouteDecision::Redirect {
                to: Route::Menu,
                cause: RedirectCause::MissingDishId,
            };
        }
        Target::Details(Some(raw)) => match raw.trim().parse::<i64>() {
            Ok(id) => Route::DishDetails { id },
            Err(_) => {
                return RouteDecision::Redirect {
                    to: Route::Menu,
                    cause: RedirectCause::MalformedDishId(raw.to_string()),
                };
            }
        },
        Target::Unknown => {
            return RouteDecision::Redirect {
                to: Route::auth_success_redirect(),
                cause: RedirectCause::UnknownFragment(fragment.to_string()),
            };
        }
    };

    RouteDecision::Show(route)
}

/// 重定向链的上限；正常情况下最多一次
const MAX_REDIRECTS: usize = 4;

/// 反复应用 `decide` 直到得到可显示的路由
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    pub route: Route,
    pub redirects: Vec<(Route, RedirectCause)>,
}

pub fn settle(fragment: &str, is_authenticated: bool) -> Settled {
    let mut redirects = Vec::new();
    let mut current = fragment.to_string();

    while redirects.len() < MAX_REDIRECTS {
        match decide(&current, is_authenticated) {
            RouteDecision::Show(route) => return Settled { route, redirects },
            RouteDecision::Redirect { to, cause } => {
                current = to.fragment();
                redirects.push((to, cause));
            }
        }
    }

    // 不可达：登录页与菜单在对应认证状态下总是稳定的
    let route = if is_authenticated {
        Route::auth_success_redirect()
    } else {
        Route::auth_failure_redirect()
    };
    Settled { route, redirects }
}
