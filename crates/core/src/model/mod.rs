mod category;
mod config;
mod ids;
mod option;
mod question;

pub use ids::{CategoryId, OptionId, ParseIdError, QuestionId};

pub use category::{Category, CategoryColor, CategoryError, CategoryIcon};
pub use config::{DEFAULT_QUESTION_COUNT, QuizMode, SessionConfig, TypeFilter};
pub use option::AnswerOption;
pub use question::{Question, QuestionDraft, QuestionError, QuestionType};
