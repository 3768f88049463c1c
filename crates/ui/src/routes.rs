use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use quiz_core::model::CategoryId;

use crate::views::{AdminView, HomeView, QuizView, ResultsView, SetupView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/setup/:category_id", SetupView)] Setup { category_id: CategoryId },
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/results", ResultsView)] Results {},
        #[route("/admin", AdminView)] Admin {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            nav { class: "topbar",
                h1 { "Quiz" }
                ul {
                    li { Link { to: Route::Home {}, "Categories" } }
                    li { Link { to: Route::Admin {}, "Admin" } }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
