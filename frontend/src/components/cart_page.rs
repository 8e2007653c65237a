use leptos::prelude::*;

use crate::cart::{self, CartLineView, CartView, StepDirection};
use crate::store::{AppHandle, spawn_with, use_app, use_store};
use crate::web::route::Route;

#[component]
pub fn CartPage() -> impl IntoView {
    let app = use_app();
    let store = use_store();

    view! {
        <div class="container mx-auto p-4">
            {move || match store.cart.get() {
                None => view! {
                    <div class="flex justify-center">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }.into_any(),
                Some(snapshot) if snapshot.is_empty() => view! {
                    <div class="text-center space-y-4 py-12">
                        <p class="text-lg">"Your cart is empty."</p>
                        <a class="btn btn-primary" href=Route::Menu.fragment()>"Browse the Menu"</a>
                    </div>
                }.into_any(),
                Some(snapshot) => cart_contents(app, snapshot).into_any(),
            }}
        </div>
    }
}

fn cart_contents(app: AppHandle, cart_view: CartView) -> impl IntoView {
    let CartView {
        lines,
        subtotal,
        total,
    } = cart_view;

    let on_confirm = move |_| {
        spawn_with(app, move |ctx| async move { cart::confirm_order(&ctx).await });
    };

    view! {
        <div class="grid gap-6 lg:grid-cols-3">
            <div class="lg:col-span-2 space-y-4">
                <div class="overflow-x-auto hidden md:block">
                    <table id="cart-items-table" class="table">
                        <thead>
                            <tr>
                                <th>"Dish"</th>
                                <th>"Price"</th>
                                <th>"Quantity"</th>
                                <th>"Total"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {lines.iter().cloned().map(|line| table_row(app, line)).collect_view()}
                        </tbody>
                    </table>
                </div>
                <div id="cart-items-cards" class="space-y-3 md:hidden">
                    {lines.into_iter().map(|line| line_card(app, line)).collect_view()}
                </div>
            </div>
            <div class="card bg-base-100 shadow h-fit">
                <div class="card-body">
                    <h2 class="card-title">"Order Summary"</h2>
                    <div class="flex justify-between">
                        <span>"Subtotal"</span>
                        <span id="cart-subtotal">{subtotal.currency()}</span>
                    </div>
                    <div class="flex justify-between font-bold">
                        <span>"Total"</span>
                        <span id="cart-total">{total.currency()}</span>
                    </div>
                    <div class="card-actions mt-4">
                        <button id="confirm-order" class="btn btn-success w-full" on:click=on_confirm>
                            "Confirm Order"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

fn table_row(app: AppHandle, line: CartLineView) -> impl IntoView {
    view! {
        <tr>
            <td>{line.dish_name.clone()}</td>
            <td>{line.unit_price.currency()}</td>
            <td>{stepper(app, line.dish_id, line.quantity)}</td>
            <td>{line.line_total.currency()}</td>
            <td>{remove_button(app, line.dish_id)}</td>
        </tr>
    }
}

fn line_card(app: AppHandle, line: CartLineView) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body p-4">
                <h3 class="font-semibold">{line.dish_name.clone()}</h3>
                <p class="text-sm">"Price: " {line.unit_price.currency()}</p>
                <div class="flex items-center justify-between">
                    {stepper(app, line.dish_id, line.quantity)}
                    <span class="font-semibold">{line.line_total.currency()}</span>
                </div>
                <div class="card-actions justify-end">{remove_button(app, line.dish_id)}</div>
            </div>
        </div>
    }
}

/// 数量步进器；以渲染时的数量为基准计算下一步
fn stepper(app: AppHandle, dish_id: i64, quantity: u32) -> impl IntoView {
    let step = move |direction: StepDirection| {
        spawn_with(app, move |ctx| async move {
            cart::step_quantity(&ctx, dish_id, quantity, direction).await;
        });
    };

    view! {
        <div class="join">
            <button class="btn btn-sm join-item" on:click=move |_| step(StepDirection::Decrement)>"-"</button>
            <span class="btn btn-sm join-item no-animation">{quantity}</span>
            <button class="btn btn-sm join-item" on:click=move |_| step(StepDirection::Increment)>"+"</button>
        </div>
    }
}

fn remove_button(app: AppHandle, dish_id: i64) -> impl IntoView {
    let on_remove = move |_| {
        spawn_with(app, move |ctx| async move {
            cart::remove_from_cart_on_server(&ctx, dish_id).await;
        });
    };

    view! { <button class="btn btn-sm btn-error btn-outline" on:click=on_remove>"Remove"</button> }
}
