use leptos::prelude::*;

use crate::cart;
use crate::dishes::DishDetailsView;
use crate::store::{AppHandle, spawn_with, use_app, use_store};
use crate::web::route::Route;

#[component]
pub fn DetailsPage() -> impl IntoView {
    let app = use_app();
    let store = use_store();

    view! {
        <div id="details-container" class="container mx-auto p-4">
            {move || match store.details.get() {
                Some(details) => details_card(app, details).into_any(),
                None => view! {
                    <div class="flex justify-center">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }.into_any(),
            }}
        </div>
    }
}

fn details_card(app: AppHandle, details: DishDetailsView) -> impl IntoView {
    let DishDetailsView {
        id,
        name,
        price,
        price_label,
        description,
        image_url,
    } = details;

    let cart_name = name.clone();
    let on_add = move |_| {
        let dish_name = cart_name.clone();
        spawn_with(app, move |ctx| async move {
            cart::add_to_cart(&ctx, id, &dish_name, price, 1).await;
        });
    };

    let image = image_url.map(|src| {
        let alt = name.clone();
        view! { <figure><img class="max-h-96 object-cover" src=src alt=alt /></figure> }
    });

    view! {
        <div class="card lg:card-side bg-base-100 shadow-xl">
            {image}
            <div class="card-body">
                <h2 class="card-title text-2xl">{name}</h2>
                <p class="text-lg font-semibold">"Price: " {price_label}</p>
                <p>{description}</p>
                <div class="card-actions justify-end">
                    <a class="btn btn-ghost" href=Route::Menu.fragment()>"Back to Menu"</a>
                    <button class="btn btn-primary" on:click=on_add>"Add to Cart"</button>
                </div>
            </div>
        </div>
    }
}
