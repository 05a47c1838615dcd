pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub use quiz::{Quiz, RelatedKind};
pub use quiz_attempt::{QuizAttempt, UNANSWERED};
pub use quiz_question::{QuizOption, QuizQuestion};
