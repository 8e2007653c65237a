//! 购物车模块
//!
//! 购物车归服务端所有：客户端只持有最近一次读取的快照。
//! 每次变更都发送到服务端，然后重新读取完整快照并重建视图，
//! 从不在本地修补数量或合计。

use dishdash_shared::protocol::{
    AddToCartRequest, GetCartRequest, PlaceOrderRequest, RemoveFromCartRequest, UpdateCartRequest,
};
use dishdash_shared::{Ack, CartData, Money};

use crate::error::{AppError, AppResult};
use crate::platform::{AppContext, NoticeKind};
use crate::web::route::Route;

// =========================================================
// 视图模型
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CartLineView {
    pub dish_id: i64,
    pub dish_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// 表格（桌面）与卡片（移动端）两种渲染共用的视图
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: Money,
    pub total: Money,
}

impl CartView {
    /// 合计只来自快照本身
    pub fn from_snapshot(snapshot: &CartData) -> Self {
        let lines = snapshot
            .items()
            .iter()
            .map(|item| CartLineView {
                dish_id: item.dish_id,
                dish_name: item.dish_name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price(),
                line_total: item.line_total(),
            })
            .collect();

        let subtotal = snapshot.subtotal();
        Self {
            lines,
            subtotal,
            total: subtotal,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

// =========================================================
// 数量步进策略
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartMutation {
    Update { dish_id: i64, quantity: u32 },
    Remove { dish_id: i64 },
}

/// 数量为 1 时再减就是移除；不存在数量为 0 的行
pub fn plan_step(dish_id: i64, current: u32, direction: StepDirection) -> CartMutation {
    match direction {
        StepDirection::Increment => CartMutation::Update {
            dish_id,
            quantity: current.saturating_add(1),
        },
        StepDirection::Decrement if current > 1 => CartMutation::Update {
            dish_id,
            quantity: current - 1,
        },
        StepDirection::Decrement => CartMutation::Remove { dish_id },
    }
}

// =========================================================
// 操作
// =========================================================

async fn fetch_snapshot(ctx: &AppContext) -> AppResult<CartData> {
    ctx.api
        .send(&GetCartRequest)
        .await
        .map_err(|e| e.in_op("cart.snapshot"))
}

/// 加入购物车；失败时展示服务端消息，并按服务端指示延迟跳转
pub async fn add_to_cart(ctx: &AppContext, dish_id: i64, dish_name: &str, dish_price: f64, quantity: u32) {
    let req = AddToCartRequest {
        dish_id,
        dish_name: dish_name.to_string(),
        dish_price,
        quantity,
    };

    match ctx.api.send(&req).await {
        Ok(ack) if ack.success => {
            ctx.notifier
                .notify(NoticeKind::Success, ack.message_or("Added to cart."));
            update_cart_icon(ctx).await;
        }
        Ok(ack) => {
            ctx.notifier
                .notify(NoticeKind::Error, ack.message_or("Could not add to cart."));
            follow_server_redirect(ctx, &ack).await;
        }
        Err(e) => report(
            ctx,
            e.in_op("cart.add"),
            "An error occurred while adding to cart. Please try again.",
        ),
    }
}

/// 读取权威快照，重建表格与卡片视图，并同步徽标
pub async fn load_cart(ctx: &AppContext) {
    match fetch_snapshot(ctx).await {
        Ok(snapshot) => {
            let view = CartView::from_snapshot(&snapshot);
            ctx.screen.set_badge(view.item_count());
            ctx.screen.render_cart(view);
        }
        Err(e) => report(ctx, e, "Error loading cart. Please try again."),
    }
}

pub async fn update_cart_on_server(ctx: &AppContext, dish_id: i64, quantity: u32) {
    let result = ctx.api.send(&UpdateCartRequest { dish_id, quantity }).await;
    let reload = settle_mutation(
        ctx,
        result.map_err(|e| e.in_op("cart.update")),
        NoticeKind::Success,
        "Error updating item quantity. Please try again.",
    );
    if reload {
        load_cart(ctx).await;
    }
}

pub async fn remove_from_cart_on_server(ctx: &AppContext, dish_id: i64) {
    let result = ctx.api.send(&RemoveFromCartRequest { dish_id }).await;
    let reload = settle_mutation(
        ctx,
        result.map_err(|e| e.in_op("cart.remove")),
        NoticeKind::Info,
        "Error removing item. Please try again.",
    );
    if reload {
        load_cart(ctx).await;
    }
}

/// 步进按钮：`current` 是最近一次渲染的数量
pub async fn step_quantity(ctx: &AppContext, dish_id: i64, current: u32, direction: StepDirection) {
    match plan_step(dish_id, current, direction) {
        CartMutation::Update { dish_id, quantity } => {
            update_cart_on_server(ctx, dish_id, quantity).await
        }
        CartMutation::Remove { dish_id } => remove_from_cart_on_server(ctx, dish_id).await,
    }
}

/// 尽力刷新徽标，失败时保持旧值
pub async fn update_cart_icon(ctx: &AppContext) {
    match fetch_snapshot(ctx).await {
        Ok(snapshot) => ctx.screen.set_badge(snapshot.total_quantity()),
        Err(e) => log_warn!("[Cart] Error updating cart icon: {}", e),
    }
}

/// 下单：必须先经用户确认；提交的是服务端持有的购物车，请求体为空对象
pub async fn confirm_order(ctx: &AppContext) {
    let confirmed = ctx
        .notifier
        .confirm("Confirm Order", "Are you sure you want to place this order?")
        .await;
    if !confirmed {
        return;
    }

    match ctx.api.send(&PlaceOrderRequest {}).await {
        Ok(ack) if ack.success => {
            update_cart_icon(ctx).await;
            ctx.notifier
                .alert(NoticeKind::Success, "Order Placed!", ack.message_or("Your order has been placed."))
                .await;
            ctx.go(&Route::Menu);
        }
        Ok(ack) => {
            ctx.notifier
                .notify(NoticeKind::Error, ack.message_or("Error processing your order."));
            follow_server_redirect(ctx, &ack).await;
        }
        Err(e) => report(
            ctx,
            e.in_op("cart.place_order"),
            "An error occurred while trying to process your order. Please try again.",
        ),
    }
}

// =========================================================
// 内部工具
// =========================================================

/// 处理变更结果，返回是否需要重新读取快照
///
/// 只要请求走完（成功、业务失败或普通错误）就重新读取；
/// 会话过期时跳过，避免对失效会话再发请求。
fn settle_mutation(ctx: &AppContext, result: AppResult<Ack>, success_kind: NoticeKind, generic: &str) -> bool {
    match result {
        Ok(ack) if ack.success => {
            ctx.notifier.notify(success_kind, ack.message_or("Cart updated."));
            true
        }
        Ok(ack) => {
            ctx.notifier.notify(NoticeKind::Error, ack.message_or(generic));
            true
        }
        Err(e) => {
            let reload = !e.is_session_expired();
            report(ctx, e, generic);
            reload
        }
    }
}

async fn follow_server_redirect(ctx: &AppContext, ack: &Ack) {
    if let Some(url) = ack.redirect_url.as_deref().filter(|url| !url.is_empty()) {
        ctx.delay.sleep(ctx.config.redirect_delay).await;
        log_info!("[Cart] Following server redirect to {}", url);
        ctx.navigator.open_url(url);
    }
}

fn report(ctx: &AppContext, err: AppError, generic: &str) {
    log_error!("[Cart] {}", err);
    if let Some(msg) = err.user_message(generic) {
        ctx.notifier.notify(NoticeKind::Error, &msg);
    }
}
