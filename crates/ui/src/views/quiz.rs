use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::PracticeSlot;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{OptionMark, OptionRowVm, QuizIntent, QuizOutcome, parse_quiz_input};

fn option_class(mark: OptionMark) -> &'static str {
    match mark {
        OptionMark::Idle => "option",
        OptionMark::Selected => "option option--selected",
        OptionMark::Correct => "option option--correct",
        OptionMark::Wrong => "option option--wrong",
        OptionMark::Dimmed => "option option--dimmed",
    }
}

#[component]
pub fn QuizView() -> Element {
    let practice = use_context::<PracticeSlot>();
    let navigator = use_navigator();
    let error = use_signal(|| None::<ViewError>);

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut practice = practice;
        let mut error = error;
        let outcome = {
            let mut guard = practice.write();
            let Some(run) = guard.as_mut() else {
                return;
            };
            run.dismiss_notice();
            run.quiz_mut().apply(intent)
        };
        match outcome {
            Ok(QuizOutcome::Continue) => error.set(None),
            Ok(QuizOutcome::Finished(score)) => {
                tracing::debug!(%score, "quiz finished");
                error.set(None);
                let _ = navigator.push(Route::Results {});
            }
            Err(err) => error.set(Some(err)),
        }
    });

    let on_key = move |evt: KeyboardEvent| {
        let answered = practice
            .read()
            .as_ref()
            .is_some_and(|run| run.quiz().session().is_answered());
        let key = match evt.data.key() {
            Key::Enter => String::new(),
            Key::Character(value) => value,
            _ => return,
        };
        if let Some(intent) = parse_quiz_input(&key, answered) {
            evt.prevent_default();
            dispatch.call(intent);
        }
    };

    let guard = practice.read();
    let Some(run) = guard.as_ref() else {
        return rsx! {
            div { class: "page",
                p { "No quiz in progress." }
                Link { to: Route::Home {}, "Choose a category" }
            }
        };
    };
    let quiz = run.quiz();
    let notice = run.notice().map(str::to_owned);
    let position_label = quiz.position_label();
    let progress = quiz.progress_percent();
    let badge = quiz.badge_label();
    let score_label = quiz.score_label();
    let question_text = quiz.question_text().to_string();
    let hint = quiz.hint();
    let rows = quiz.option_rows();
    let feedback = quiz.feedback();
    let answered = quiz.session().is_answered();
    drop(guard);

    rsx! {
        div { class: "page quiz-page", tabindex: "0", onkeydown: on_key,
            if let Some(notice) = notice {
                p { class: "notice", "{notice}" }
            }
            header { class: "quiz-header",
                span { class: "quiz-position", "{position_label}" }
                span { class: "quiz-score", "{score_label}" }
                div { class: "progress",
                    div { class: "progress__bar", style: "width: {progress}%" }
                }
            }
            p { class: "quiz-badge", "{badge}" }
            h2 { class: "quiz-question", "{question_text}" }
            ul { class: "quiz-options",
                for (index, row) in rows.into_iter().enumerate() {
                    OptionRow { key: "{row.label}", row, index, answered, on_intent: dispatch }
                }
            }
            if let Some(err) = error() {
                p { class: "form-error", "{err.message()}" }
            }
            match feedback {
                Some(feedback) => rsx! {
                    div { class: "feedback",
                        h3 { "{feedback.headline}" }
                        p { "Explanation: {feedback.explanation}" }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| dispatch.call(QuizIntent::Next),
                            "{feedback.next_label}"
                        }
                    }
                },
                None => rsx! {
                    p { class: "quiz-hint", "{hint}" }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| dispatch.call(QuizIntent::Submit),
                        "Submit"
                    }
                },
            }
        }
    }
}

#[component]
fn OptionRow(
    row: OptionRowVm,
    index: usize,
    answered: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        li {
            button {
                class: option_class(row.mark),
                r#type: "button",
                disabled: answered,
                onclick: move |_| on_intent.call(QuizIntent::Toggle(index)),
                span { class: "option__label", "{row.label}" }
                span { class: "option__text", "{row.text}" }
            }
        }
    }
}
