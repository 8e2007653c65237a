//! 菜品模块：菜单列表、搜索过滤与详情

use dishdash_shared::protocol::{GetDishRequest, ListDishesRequest};
use dishdash_shared::{Dish, Money};

use crate::platform::{AppContext, NoticeKind};

/// 菜单中的一张卡片
#[derive(Debug, Clone, PartialEq)]
pub struct DishCard {
    pub id: i64,
    pub name: String,
    /// 两位小数的价格文本
    pub price: String,
}

impl From<&Dish> for DishCard {
    fn from(dish: &Dish) -> Self {
        Self {
            id: dish.id,
            name: dish.name.clone(),
            price: dish.price().fixed(),
        }
    }
}

/// 菜单列表的三种渲染状态
#[derive(Debug, Clone, PartialEq)]
pub enum DishListView {
    Cards(Vec<DishCard>),
    /// 有菜品，但没有匹配搜索词的
    NoMatches,
    /// 服务端没有任何菜品
    NoDishes,
}

/// 详情视图，同时携带加入购物车所需的 id/名称/价格
#[derive(Debug, Clone, PartialEq)]
pub struct DishDetailsView {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub price_label: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// 按名称或纯文本描述过滤（不区分大小写）；空搜索词不过滤
pub fn filter_dishes<'a>(dishes: &'a [Dish], term: &str) -> Vec<&'a Dish> {
    if term.is_empty() {
        return dishes.iter().collect();
    }
    dishes.iter().filter(|dish| dish.matches(term)).collect()
}

pub fn build_list_view(dishes: &[Dish], term: &str) -> DishListView {
    if dishes.is_empty() {
        return DishListView::NoDishes;
    }

    let matched = filter_dishes(dishes, term);
    if matched.is_empty() {
        DishListView::NoMatches
    } else {
        DishListView::Cards(matched.into_iter().map(DishCard::from).collect())
    }
}

/// 拉取全部菜品，按搜索词在本地过滤后渲染
pub async fn load_dishes(ctx: &AppContext, search_term: &str) {
    match ctx.api.send(&ListDishesRequest).await {
        Ok(resp) => {
            let dishes = resp.data.unwrap_or_default();
            ctx.screen.render_dishes(build_list_view(&dishes, search_term));
        }
        Err(e) => {
            log_error!("[Dishes] Error loading dishes: {}", e);
            if let Some(msg) = e.user_message("Could not load dishes.") {
                ctx.notifier.alert(NoticeKind::Error, "Error", &msg).await;
            }
        }
    }
}

/// 拉取并渲染单个菜品；不存在或失败时弹出阻塞提示
pub async fn show_dish_details(ctx: &AppContext, dish_id: i64) {
    match ctx.api.send(&GetDishRequest { id: dish_id }).await {
        Ok(resp) => match resp.dish {
            Some(dish) => ctx.screen.render_dish_details(details_view(ctx, &dish)),
            None => {
                log_warn!("[Dishes] Dish {} not found.", dish_id);
                ctx.notifier
                    .alert(NoticeKind::Error, "Error", "Dish not found.")
                    .await;
            }
        },
        Err(e) => {
            log_error!("[Dishes] Error loading dish {}: {}", dish_id, e);
            if let Some(msg) = e.user_message("Could not load dish details.") {
                ctx.notifier.alert(NoticeKind::Error, "Error", &msg).await;
            }
        }
    }
}

fn details_view(ctx: &AppContext, dish: &Dish) -> DishDetailsView {
    DishDetailsView {
        id: dish.id,
        name: dish.name.clone(),
        price: dish.price,
        price_label: Money::from_f64(dish.price).fixed(),
        description: dish.plain_description(),
        image_url: dish
            .image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(|url| ctx.config.image_url(url)),
    }
}
