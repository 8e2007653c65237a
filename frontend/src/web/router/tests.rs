use super::*;
use crate::platform::{Navigator, NoticeKind};
use crate::testing::{MockReply, TestHarness};
use crate::web::route::View;
use serde_json::json;

#[tokio::test]
async fn test_unauthenticated_visit_lands_on_login() {
    for fragment in ["#menu", "#cart", "#profile", "#details?id=3", "#nowhere", ""] {
        let h = TestHarness::new();

        let route = h.visit(fragment).await;

        assert_eq!(route, Route::Login);
        assert_eq!(h.navigator.fragment(), "#login");
        assert_eq!(h.screen.views(), vec![View::Login]);
        assert!(h.transport.requests().is_empty(), "{fragment:?}");
    }
}

#[tokio::test]
async fn test_authenticated_public_views_redirect_to_menu() {
    for fragment in ["#login", "#register"] {
        let h = TestHarness::authenticated();
        h.transport
            .reply("GET /Customer/Home/GetAll", MockReply::json(200, json!({"data": []})));

        assert_eq!(h.visit(fragment).await, Route::Menu);
        assert_eq!(h.navigator.fragment(), "#menu");
        assert_eq!(h.screen.views(), vec![View::Menu]);
    }
}

#[tokio::test]
async fn test_bad_dish_ids_redirect_to_menu() {
    for fragment in ["#details", "#details?id=abc"] {
        let h = TestHarness::authenticated();
        h.transport
            .reply("GET /Customer/Home/GetAll", MockReply::json(200, json!({"data": []})));

        assert_eq!(h.visit(fragment).await, Route::Menu);
        assert_eq!(h.navigator.history(), vec![fragment.to_string(), "#menu".to_string()]);
        assert_eq!(h.transport.count("GET /Customer/Home/GetAll"), 1);
    }
}

#[tokio::test]
async fn test_redirect_rewrites_fragment_once() {
    let h = TestHarness::new();

    let outcome = handle_fragment(&h.ctx, "#details?id=abc").await;

    assert_eq!(outcome, RouteOutcome::Redirected(Route::Login));
    assert_eq!(h.navigator.history(), vec!["#login".to_string()]);
    assert!(h.screen.views().is_empty());
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn test_each_view_triggers_its_load() {
    let h = TestHarness::authenticated();
    h.transport
        .reply("GET /Customer/Cart/GetCartData", MockReply::json(200, json!({"cartItems": []})));
    h.transport
        .reply("GET /api/account/profile", MockReply::json(200, json!({"email": "a@b.c"})));
    h.transport.reply(
        "GET /Customer/Home/Get/7",
        MockReply::json(200, json!({"dish": {"id": 7, "name": "Flan", "price": 3.5}})),
    );

    h.visit("#cart").await;
    h.visit("#profile").await;
    h.visit("#details?id=7").await;

    assert_eq!(
        h.transport.keys(),
        vec![
            "GET /Customer/Cart/GetCartData".to_string(),
            "GET /api/account/profile".to_string(),
            "GET /Customer/Home/Get/7".to_string(),
        ]
    );
    assert_eq!(h.screen.views(), vec![View::Cart, View::Profile, View::DishDetails]);
    assert_eq!(h.screen.last_details().unwrap().name, "Flan");
}

#[tokio::test]
async fn test_expired_session_during_load_returns_to_login() {
    let h = TestHarness::authenticated();
    h.transport
        .reply("GET /Customer/Cart/GetCartData", MockReply::text(401, ""));

    h.visit("#cart").await;
    // 401 改写了 fragment，浏览器会再次进入路由
    let route = handle_current(&h.ctx).await;

    assert_eq!(route, RouteOutcome::Shown(Route::Login));
    assert!(!h.ctx.session.is_authenticated());
    assert_eq!(h.notifier.notices_of(NoticeKind::Warning).len(), 1);
    assert_eq!(h.notifier.notices().len(), 1);
    assert_eq!(h.screen.views(), vec![View::Cart, View::Login]);
}
