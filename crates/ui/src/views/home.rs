use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::{AppContext, PracticeSlot};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CategoryCardVm, map_category_card};

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    cards: Vec<CategoryCardVm>,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let practice = use_context::<PracticeSlot>();
    let mut query = use_signal(String::new);

    // Coming back to the category list ends any run in progress.
    use_effect(move || {
        let mut practice = practice;
        practice.set(None);
    });

    let catalog = ctx.catalog();
    let mut resource = use_resource(move || {
        let mut catalog = catalog.clone();
        async move {
            catalog.refresh().await?;
            let cards = catalog
                .categories()
                .iter()
                .map(|category| {
                    let count = catalog.questions_in(category.name()).count();
                    map_category_card(category, Some(count))
                })
                .collect();
            Ok::<_, ViewError>(HomeData { cards })
        }
    });

    let state = view_state_from_resource(&resource);
    let query_text = query();

    rsx! {
        div { class: "page",
            h2 { "Choose a category" }
            input {
                class: "search",
                r#type: "search",
                placeholder: "Search categories",
                value: "{query_text}",
                oninput: move |evt| query.set(evt.value()),
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.cards.is_empty() {
                        p { "No categories yet. Add one from the admin page." }
                    } else {
                        ul { class: "category-grid",
                            for card in data.cards.into_iter().filter(|card| card.matches_query(&query_text)) {
                                CategoryCard { key: "{card.id}", card }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| resource.restart(),
                        "Retry"
                    }
                },
            }
        }
    }
}

#[component]
fn CategoryCard(card: CategoryCardVm) -> Element {
    rsx! {
        li { class: "category-card {card.color_class}",
            Link { to: Route::Setup { category_id: card.id.clone() },
                span { class: "category-card__icon", "{card.glyph}" }
                span { class: "category-card__name", "{card.name}" }
                if let Some(count) = &card.count_label {
                    span { class: "category-card__count", "{count}" }
                }
            }
            if !card.description.is_empty() {
                p { class: "category-card__description", "{card.description}" }
            }
        }
    }
}
