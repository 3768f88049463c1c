use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{
    AnswerOption, CategoryColor, CategoryIcon, CategoryId, OptionId, QuestionDraft, QuestionType,
};
use quiz_core::time::fixed_clock;
use services::{AdminGate, AppServices, CatalogState, NewCategory, PracticeService};
use storage::repository::Storage;

use crate::context::{AppContext, PracticeContext, UiApp, build_app_context};
use crate::views::{AdminView, HomeView, QuizView, ResultsView, SetupView};
use crate::vm::QuizIntent;

pub const CATEGORY: &str = "Space";
pub const QUESTIONS: [&str; 3] = [
    "Which planet is closest to the sun?",
    "Which planet has the most moons?",
    "Which planet spins on its side?",
];

struct TestApp(AppServices);

impl UiApp for TestApp {
    fn practice(&self) -> Arc<PracticeService> {
        self.0.practice()
    }

    fn catalog(&self) -> CatalogState {
        self.0.catalog()
    }

    fn default_question_count(&self) -> usize {
        5
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Setup,
    Quiz,
    Results,
    Admin,
}

#[derive(Clone, PartialEq)]
struct HarnessTarget {
    view: ViewKind,
    category_id: CategoryId,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    context: AppContext,
    target: HarnessTarget,
    practice: Option<PracticeContext>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    use_context_provider(|| props.context.clone());
    use_context_provider(|| props.target.clone());
    use_context_provider(|| Signal::new(props.practice.clone()));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let target = use_context::<HarnessTarget>();
    match target.view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Setup => rsx! { SetupView { category_id: target.category_id } },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Results => rsx! { ResultsView {} },
        ViewKind::Admin => rsx! { AdminView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
    pub category_id: CategoryId,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let resources resolve and re-render.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn test_context(services: &AppServices) -> AppContext {
    let app: Arc<dyn UiApp> = Arc::new(TestApp(services.clone()));
    build_app_context(&app)
}

/// Services over in-memory storage holding one category with three
/// single-choice questions, each answered by the "Right" option.
pub async fn seeded_services(storage: &Storage) -> (AppServices, CategoryId) {
    let services = AppServices::from_storage(storage, fixed_clock(), AdminGate::new("pw"));
    let category = services
        .category_service()
        .create_category(NewCategory {
            name: CATEGORY.into(),
            icon: CategoryIcon::Rocket,
            color: CategoryColor::Blue,
            description: Some("Planets and moons".into()),
        })
        .await
        .expect("create category");
    for text in QUESTIONS {
        services
            .question_service()
            .create_question(QuestionDraft {
                category: CATEGORY.into(),
                question_type: QuestionType::SingleChoice,
                text: text.into(),
                options: vec![
                    AnswerOption::new(OptionId::new("right"), "Right").expect("option"),
                    AnswerOption::new(OptionId::new("wrong"), "Wrong").expect("option"),
                ],
                correct_option_ids: vec![OptionId::new("right")],
                explanation: Some("Look it up.".into()),
            })
            .await
            .expect("create question");
    }
    (services, category.id().clone())
}

/// Toggle the "Right" or "Wrong" option of the current question and submit.
pub fn answer_current(run: &mut PracticeContext, correct: bool) {
    let wanted = if correct { "Right" } else { "Wrong" };
    let index = run
        .quiz()
        .option_rows()
        .iter()
        .position(|row| row.text == wanted)
        .expect("option row");
    let quiz = run.quiz_mut();
    quiz.apply(QuizIntent::Toggle(index)).expect("toggle");
    quiz.apply(QuizIntent::Submit).expect("submit");
}

pub async fn start_practice(context: &AppContext, category_id: &CategoryId) -> PracticeContext {
    let setup = context.open_setup(category_id).await.expect("open setup");
    PracticeContext::start(context, &setup)
        .await
        .expect("start practice")
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let storage = Storage::in_memory();
    let (services, category_id) = seeded_services(&storage).await;
    let context = test_context(&services);

    let practice = match view {
        ViewKind::Quiz => Some(start_practice(&context, &category_id).await),
        // One right answer, then two wrong ones.
        ViewKind::Results => {
            let mut run = start_practice(&context, &category_id).await;
            for correct in [true, false, false] {
                answer_current(&mut run, correct);
                run.quiz_mut().apply(QuizIntent::Next).expect("next");
            }
            Some(run)
        }
        _ => None,
    };

    setup_view_harness_with_practice(view, services, category_id, practice)
}

pub fn setup_view_harness_with_practice(
    view: ViewKind,
    services: AppServices,
    category_id: CategoryId,
    practice: Option<PracticeContext>,
) -> ViewHarness {
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            context: test_context(&services),
            target: HarnessTarget {
                view,
                category_id: category_id.clone(),
            },
            practice,
        },
    );

    ViewHarness {
        dom,
        services,
        category_id,
    }
}

/// Harness over `storage` with nothing seeded.
pub fn setup_view_harness_with_storage(view: ViewKind, storage: &Storage) -> ViewHarness {
    let services = AppServices::from_storage(storage, fixed_clock(), AdminGate::new("pw"));
    setup_view_harness_with_practice(view, services, CategoryId::new("missing"), None)
}
