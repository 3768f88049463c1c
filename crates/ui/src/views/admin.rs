use dioxus::prelude::*;
use quiz_core::model::{Category, QuestionId};
use services::DeleteRequirement;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    AdminQuestionRowVm, CategoryFormInput, QuestionFormInput, color_choices, delete_prompt,
    icon_choices, map_question_row, parse_category_form, parse_question_form,
};

#[derive(Clone, Debug, PartialEq)]
struct AdminSection {
    category: Category,
    questions: Vec<(QuestionId, AdminQuestionRowVm)>,
}

#[derive(Clone, Debug, PartialEq)]
struct PendingDelete {
    category: Category,
    requirement: DeleteRequirement,
}

impl PendingDelete {
    fn prompt(&self) -> String {
        let count = match self.requirement {
            DeleteRequirement::Confirm => None,
            DeleteRequirement::Password { question_count } => Some(question_count),
        };
        delete_prompt(&self.category, count)
    }

    fn needs_password(&self) -> bool {
        matches!(self.requirement, DeleteRequirement::Password { .. })
    }
}

#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = use_signal(|| ctx.catalog());
    let error = use_signal(|| None::<ViewError>);
    let mut pending = use_signal(|| None::<PendingDelete>);
    let mut password = use_signal(String::new);
    let mut category_form = use_signal(CategoryFormInput::default);
    let mut question_form = use_signal(QuestionFormInput::default);

    let mut resource = use_resource(move || {
        let mut catalog = catalog;
        async move {
            let mut local = catalog.peek().clone();
            local.refresh().await?;
            catalog.set(local);
            Ok::<_, ViewError>(())
        }
    });

    // Mutations run on a copy; the signal only sees it once storage accepted the change.
    let on_add_category = use_callback(move |()| {
        let mut catalog = catalog;
        let mut error = error;
        let input = match parse_category_form(&category_form.peek()) {
            Ok(input) => input,
            Err(err) => {
                error.set(Some(err));
                return;
            }
        };
        spawn(async move {
            let mut local = catalog.peek().clone();
            let result = local.add_category(input).await.map(|_| ());
            match result {
                Ok(()) => {
                    catalog.set(local);
                    category_form.set(CategoryFormInput::default());
                    error.set(None);
                }
                Err(err) => error.set(Some(err.into())),
            }
        });
    });

    let on_add_question = use_callback(move |()| {
        let mut catalog = catalog;
        let mut error = error;
        let draft = match parse_question_form(&question_form.peek()) {
            Ok(draft) => draft,
            Err(err) => {
                error.set(Some(err));
                return;
            }
        };
        spawn(async move {
            let mut local = catalog.peek().clone();
            let result = local.add_question(draft).await.map(|_| ());
            match result {
                Ok(()) => {
                    catalog.set(local);
                    let category = question_form.peek().category.clone();
                    question_form.set(QuestionFormInput {
                        category,
                        ..QuestionFormInput::default()
                    });
                    error.set(None);
                }
                Err(err) => error.set(Some(err.into())),
            }
        });
    });

    let on_request_delete = use_callback(move |category: Category| {
        let mut error = error;
        spawn(async move {
            let local = catalog.peek().clone();
            match local.delete_requirement(&category).await {
                Ok(requirement) => {
                    password.set(String::new());
                    pending.set(Some(PendingDelete {
                        category,
                        requirement,
                    }));
                    error.set(None);
                }
                Err(err) => error.set(Some(err.into())),
            }
        });
    });

    let on_confirm_delete = use_callback(move |()| {
        let mut catalog = catalog;
        let mut error = error;
        let Some(target) = pending.peek().clone() else {
            return;
        };
        let typed = password.peek().clone();
        spawn(async move {
            let mut local = catalog.peek().clone();
            let secret = target.needs_password().then_some(typed.as_str());
            match local.remove_category(target.category.id(), secret).await {
                Ok(()) => {
                    catalog.set(local);
                    pending.set(None);
                    password.set(String::new());
                    error.set(None);
                }
                Err(err) => error.set(Some(err.into())),
            }
        });
    });

    let on_delete_question = use_callback(move |id: QuestionId| {
        let mut catalog = catalog;
        let mut error = error;
        spawn(async move {
            let mut local = catalog.peek().clone();
            match local.remove_question(&id).await {
                Ok(()) => {
                    catalog.set(local);
                    error.set(None);
                }
                Err(err) => error.set(Some(err.into())),
            }
        });
    });

    let state = view_state_from_resource(&resource);
    let (sections, category_names) = {
        let guard = catalog.read();
        let sections: Vec<AdminSection> = guard
            .categories()
            .iter()
            .map(|category| AdminSection {
                category: category.clone(),
                questions: guard
                    .questions_in(category.name())
                    .map(|q| (q.id().clone(), map_question_row(q)))
                    .collect(),
            })
            .collect();
        let names: Vec<String> = guard
            .categories()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        (sections, names)
    };
    let no_categories = sections.is_empty();
    let category_input = category_form();
    let question_input = question_form();

    rsx! {
        div { class: "page admin-page",
            h2 { "Admin" }

            if let Some(err) = error() {
                p { class: "form-error", "{err.message()}" }
            }

            if let Some(target) = pending() {
                div { class: "confirm", role: "dialog",
                    p { "{target.prompt()}" }
                    if target.needs_password() {
                        input {
                            r#type: "password",
                            placeholder: "Admin password",
                            value: "{password}",
                            oninput: move |evt| password.set(evt.value()),
                        }
                    }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| on_confirm_delete.call(()),
                        "Delete"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            pending.set(None);
                            password.set(String::new());
                        },
                        "Cancel"
                    }
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
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
                ViewState::Ready(()) => rsx! {
                    if no_categories {
                        p { "No categories yet." }
                    }
                    for section in sections {
                        CategorySection {
                            key: "{section.category.id()}",
                            section,
                            on_delete: on_request_delete,
                            on_delete_question,
                        }
                    }
                },
            }

            section { class: "admin-form",
                h3 { "New category" }
                input {
                    placeholder: "Name",
                    value: "{category_input.name}",
                    oninput: move |evt| category_form.write().name = evt.value(),
                }
                select {
                    value: "{category_input.icon}",
                    onchange: move |evt| category_form.write().icon = evt.value(),
                    option { value: "", "Icon" }
                    for (value, label) in icon_choices() {
                        option { value: "{value}", "{label}" }
                    }
                }
                select {
                    value: "{category_input.color}",
                    onchange: move |evt| category_form.write().color = evt.value(),
                    option { value: "", "Color" }
                    for (value, label) in color_choices() {
                        option { value: "{value}", "{label}" }
                    }
                }
                input {
                    placeholder: "Description (optional)",
                    value: "{category_input.description}",
                    oninput: move |evt| category_form.write().description = evt.value(),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_add_category.call(()),
                    "Add category"
                }
            }

            section { class: "admin-form",
                h3 { "New question" }
                select {
                    value: "{question_input.category}",
                    onchange: move |evt| question_form.write().category = evt.value(),
                    option { value: "", "Category" }
                    for name in category_names {
                        option { value: "{name}", "{name}" }
                    }
                }
                select {
                    value: "{question_input.question_type}",
                    onchange: move |evt| question_form.write().question_type = evt.value(),
                    option { value: "", "Type" }
                    option { value: "single", "Single choice" }
                    option { value: "multiple", "Multiple choice" }
                }
                textarea {
                    placeholder: "Question",
                    value: "{question_input.text}",
                    oninput: move |evt| question_form.write().text = evt.value(),
                }
                textarea {
                    placeholder: "Options, one per line",
                    value: "{question_input.options}",
                    oninput: move |evt| question_form.write().options = evt.value(),
                }
                input {
                    placeholder: "Correct option numbers, e.g. 1, 3",
                    value: "{question_input.correct}",
                    oninput: move |evt| question_form.write().correct = evt.value(),
                }
                input {
                    placeholder: "Explanation (optional)",
                    value: "{question_input.explanation}",
                    oninput: move |evt| question_form.write().explanation = evt.value(),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_add_question.call(()),
                    "Add question"
                }
            }
        }
    }
}

#[component]
fn CategorySection(
    section: AdminSection,
    on_delete: EventHandler<Category>,
    on_delete_question: EventHandler<QuestionId>,
) -> Element {
    let category = section.category.clone();
    rsx! {
        section { class: "admin-category",
            header {
                h3 { "{section.category.name()}" }
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    onclick: move |_| on_delete.call(category.clone()),
                    "Delete category"
                }
            }
            if section.questions.is_empty() {
                p { class: "admin-empty", "No questions." }
            }
            ul {
                for (id, row) in section.questions {
                    QuestionItem { key: "{id}", id, row, on_delete: on_delete_question }
                }
            }
        }
    }
}

#[component]
fn QuestionItem(
    id: QuestionId,
    row: AdminQuestionRowVm,
    on_delete: EventHandler<QuestionId>,
) -> Element {
    rsx! {
        li {
            span { class: "admin-kind", "[{row.kind_label}]" }
            span { class: "admin-text", "{row.text}" }
            span { class: "admin-answer", "Answer: {row.answer_label}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_delete.call(id.clone()),
                "Delete"
            }
        }
    }
}
