use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::model::{CategoryId, QuizMode, TypeFilter};

use crate::context::{AppContext, PracticeContext, PracticeSlot};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::SetupVm;

const MODES: [(QuizMode, &str); 2] = [(QuizMode::Sequential, "In order"), (QuizMode::Random, "Shuffled")];
const FILTERS: [TypeFilter; 3] = [TypeFilter::All, TypeFilter::Single, TypeFilter::Multiple];

fn choice_class(active: bool) -> &'static str {
    if active { "choice choice--active" } else { "choice" }
}

#[component]
pub fn SetupView(category_id: CategoryId) -> Element {
    let ctx = use_context::<AppContext>();
    let practice = use_context::<PracticeSlot>();
    let navigator = use_navigator();

    let mut setup = use_signal(|| None::<SetupVm>);
    let mut count_input = use_signal(String::new);
    let error = use_signal(|| None::<ViewError>);

    let ctx_for_resource = ctx.clone();
    let resource = use_resource(move || {
        let ctx = ctx_for_resource.clone();
        let category_id = category_id.clone();
        let mut setup = setup;
        let mut count_input = count_input;
        async move {
            let loaded = ctx.open_setup(&category_id).await?;
            count_input.set(loaded.config().requested_count.to_string());
            setup.set(Some(loaded));
            Ok::<_, ViewError>(())
        }
    });

    let on_filter = {
        let practice_service = ctx.practice();
        use_callback(move |filter: TypeFilter| {
            let practice_service = practice_service.clone();
            let mut setup = setup;
            let mut error = error;
            spawn(async move {
                let Some(mut local) = setup.peek().clone() else {
                    return;
                };
                match local.set_type_filter(&practice_service, filter).await {
                    Ok(()) => {
                        setup.set(Some(local));
                        error.set(None);
                    }
                    Err(err) => error.set(Some(err)),
                }
            });
        })
    };

    let on_start = {
        let ctx = ctx.clone();
        use_callback(move |()| {
            let ctx = ctx.clone();
            let mut setup = setup;
            let mut error = error;
            let mut practice = practice;
            let Some(mut local) = setup.peek().clone() else {
                return;
            };
            if let Err(err) = local.set_count_input(&count_input.peek()) {
                error.set(Some(err));
                return;
            }
            setup.set(Some(local.clone()));
            spawn(async move {
                match PracticeContext::start(&ctx, &local).await {
                    Ok(started) => {
                        practice.set(Some(started));
                        error.set(None);
                        let _ = navigator.push(Route::Quiz {});
                    }
                    Err(err) => error.set(Some(err)),
                }
            });
        })
    };

    let state = view_state_from_resource(&resource);
    let current = setup.read().clone();
    let count_text = count_input();

    rsx! {
        div { class: "page setup-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    Link { to: Route::Home {}, "Back to categories" }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(vm) = current {
                        h2 { "{vm.category().name()}" }
                        p { class: "setup-availability", "{vm.availability_label()}" }

                        fieldset { class: "choice-group",
                            legend { "Order: {vm.mode_label()}" }
                            for (mode, label) in MODES {
                                button {
                                    class: choice_class(vm.config().mode == mode),
                                    r#type: "button",
                                    onclick: move |_| {
                                        if let Some(vm) = setup.write().as_mut() {
                                            vm.set_mode(mode);
                                        }
                                    },
                                    "{label}"
                                }
                            }
                        }

                        fieldset { class: "choice-group",
                            legend { "Question type" }
                            for filter in FILTERS {
                                button {
                                    class: choice_class(vm.config().type_filter == filter),
                                    r#type: "button",
                                    onclick: move |_| on_filter.call(filter),
                                    "{filter}"
                                }
                            }
                        }

                        label { class: "setup-count",
                            "Number of questions"
                            input {
                                r#type: "number",
                                min: "1",
                                value: "{count_text}",
                                oninput: move |evt| count_input.set(evt.value()),
                            }
                        }

                        if vm.can_start() {
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: move |_| on_start.call(()),
                                "Start practice"
                            }
                        } else {
                            p { class: "setup-empty", "No questions match. Pick another type or category." }
                        }
                    }
                },
            }
            if let Some(err) = error() {
                p { class: "form-error", "{err.message()}" }
            }
        }
    }
}
