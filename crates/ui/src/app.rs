use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::provide_practice_slot;
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    provide_practice_slot();

    rsx! {
        document::Title { "Quiz" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
