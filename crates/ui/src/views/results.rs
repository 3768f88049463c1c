use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::{PracticeContext, PracticeSlot};
use crate::routes::Route;
use crate::vm::AnswerReviewVm;

#[component]
pub fn ResultsView() -> Element {
    let practice = use_context::<PracticeSlot>();
    let navigator = use_navigator();

    let (results, category_id) = {
        let guard = practice.read();
        let run = guard.as_ref();
        (
            run.and_then(PracticeContext::results),
            run.map(|run| run.category().id().clone()),
        )
    };
    let Some(results) = results else {
        return rsx! {
            div { class: "page",
                p { "No finished quiz to show." }
                Link { to: Route::Home {}, "Choose a category" }
            }
        };
    };

    rsx! {
        div { class: "page results-page",
            h2 { "{results.headline}" }
            p { class: "results-percentage", "Your score: {results.percentage_label}" }
            p { class: "results-tally", "{results.tally_label}" }

            ol { class: "results-review",
                for item in results.review {
                    ReviewRow { key: "{item.number}", item }
                }
            }

            div { class: "results-actions",
                if let Some(category_id) = category_id {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut practice = practice;
                            practice.set(None);
                            let _ = navigator.push(Route::Setup { category_id: category_id.clone() });
                        },
                        "Practice again"
                    }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let mut practice = practice;
                        practice.set(None);
                        let _ = navigator.push(Route::Home {});
                    },
                    "Back to categories"
                }
            }
        }
    }
}

#[component]
fn ReviewRow(item: AnswerReviewVm) -> Element {
    let (class, verdict) = if item.is_correct {
        ("review review--correct", "Correct")
    } else {
        ("review review--wrong", "Incorrect")
    };
    rsx! {
        li { class: "{class}",
            p { class: "review__question", "{item.question}" }
            p { "Your answer: {item.your_answer}" }
            if !item.is_correct {
                p { "Correct answer: {item.correct_answer}" }
            }
            span { class: "review__verdict", "{verdict}" }
        }
    }
}
