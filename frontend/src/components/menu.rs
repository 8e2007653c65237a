use leptos::prelude::*;

use crate::dishes::{self, DishCard, DishListView};
use crate::store::{spawn_with, use_app, use_store};
use crate::web::route::Route;

#[component]
pub fn MenuPage() -> impl IntoView {
    let app = use_app();
    let store = use_store();

    // 每次输入都用去除首尾空白的搜索词重新加载，仅在菜单页生效
    let on_search = move |ev| {
        let term = event_target_value(&ev);
        store.search.set(term.clone());

        spawn_with(app, move |ctx| async move {
            if ctx.navigator.fragment() == Route::Menu.fragment() {
                dishes::load_dishes(&ctx, term.trim()).await;
            }
        });
    };

    view! {
        <div class="container mx-auto p-4 space-y-4">
            <input
                id="search-input"
                type="search"
                class="input input-bordered w-full"
                placeholder="Search dishes..."
                on:input=on_search
                prop:value=store.search
            />
            <div id="dishes-container" class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                {move || match store.dishes.get() {
                    None => view! {
                        <div class="col-span-full flex justify-center">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }.into_any(),
                    Some(DishListView::NoDishes) => view! {
                        <p class="col-span-full text-center text-base-content/70">"No dishes available."</p>
                    }.into_any(),
                    Some(DishListView::NoMatches) => view! {
                        <p class="col-span-full text-center text-base-content/70">"No dishes found matching your search."</p>
                    }.into_any(),
                    Some(DishListView::Cards(cards)) => cards
                        .into_iter()
                        .map(dish_card)
                        .collect_view()
                        .into_any(),
                }}
            </div>
        </div>
    }
}

fn dish_card(card: DishCard) -> impl IntoView {
    let href = Route::DishDetails { id: card.id }.fragment();

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h5 class="card-title">{card.name}</h5>
                <p>"Price: " {card.price}</p>
                <div class="card-actions justify-end">
                    <a class="btn btn-info btn-sm" href=href>"View Details"</a>
                </div>
            </div>
        </div>
    }
}
