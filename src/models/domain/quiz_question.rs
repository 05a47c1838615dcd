use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub text: String,
    pub options: Vec<QuizOption>, // presentation order doubles as the scoring index
    pub points: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>, // shown to the student after answering
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizOption {
    pub text: String,
    pub is_correct: bool,
}

impl QuizQuestion {
    pub fn new(
        text: &str,
        options: Vec<QuizOption>,
        points: i16,
        explanation: Option<String>,
    ) -> AppResult<Self> {
        if text.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Question text must not be empty".to_string(),
            ));
        }
        if options.is_empty() {
            return Err(AppError::ValidationError(
                "Question must have at least one option".to_string(),
            ));
        }
        if points < 1 {
            return Err(AppError::ValidationError(format!(
                "Question points must be positive, got {}",
                points
            )));
        }

        Ok(QuizQuestion {
            text: text.to_string(),
            options,
            points,
            explanation,
        })
    }

    /// Index of the first option marked correct. `None` means the question
    /// is malformed and can never award points; callers must not render a
    /// correct-answer hint for it.
    pub fn correct_option_index(&self) -> Option<usize> {
        self.options.iter().position(|opt| opt.is_correct)
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

impl QuizOption {
    pub fn new(text: &str, is_correct: bool) -> Self {
        QuizOption {
            text: text.to_string(),
            is_correct,
        }
    }
}
