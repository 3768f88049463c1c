mod admin_vm;
mod category_vm;
mod quiz_vm;
mod results_vm;
mod setup_vm;

pub use admin_vm::{
    AdminQuestionRowVm, CategoryFormInput, QuestionFormInput, color_choices, delete_prompt,
    icon_choices, map_question_row, parse_category_form, parse_question_form,
};
pub use category_vm::{CategoryCardVm, map_category_card};
pub use quiz_vm::{
    FeedbackVm, OptionMark, OptionRowVm, QuizIntent, QuizOutcome, QuizVm, parse_quiz_input,
};
pub use results_vm::{AnswerReviewVm, ResultsVm, map_results};
pub use setup_vm::{SetupVm, clamp_notice_text, parse_count};
