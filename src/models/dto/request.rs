use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::AppResult;
use crate::models::domain::quiz::RelatedKind;
use crate::models::domain::quiz_question::{QuizOption, QuizQuestion};

/// Authoring input for a new quiz, as handed over by the admin-facing
/// collaborator. Field-level checks live here; structural rules the
/// derive cannot express (positive points, at least one option) are
/// enforced again by the domain constructors.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub description: String,

    pub instructions: Option<String>,

    pub related_kind: RelatedKind,

    #[validate(length(min = 1))]
    pub related_id: String,

    #[validate(length(min = 1))]
    #[validate(nested)]
    pub questions: Vec<CreateQuestionRequest>,

    #[validate(range(min = 1))]
    pub time_limit_minutes: Option<i64>,

    #[validate(range(min = 0, max = 100))]
    pub pass_percentage: i16,

    #[validate(range(min = 1))]
    pub max_attempts: i16,

    pub shuffle_questions: Option<bool>,
    pub shuffle_options: Option<bool>,
    pub show_correct_answers: Option<bool>,

    pub available_from: Option<DateTime<Utc>>,
    pub available_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,

    #[validate(length(min = 1))]
    #[validate(nested)]
    pub options: Vec<CreateOptionRequest>,

    #[validate(range(min = 1))]
    pub points: i16,

    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOptionRequest {
    #[validate(length(min = 1, max = 500))]
    pub text: String,

    pub is_correct: bool,
}

impl CreateQuestionRequest {
    pub fn into_domain(self) -> AppResult<QuizQuestion> {
        let options = self
            .options
            .into_iter()
            .map(|opt| QuizOption::new(&opt.text, opt.is_correct))
            .collect();

        QuizQuestion::new(&self.text, options, self.points, self.explanation)
    }
}
