use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel stored in `answers` for a question the user skipped.
pub const UNANSWERED: i32 = -1;

/// One user's pass through a quiz. Created in progress by `start_attempt`,
/// graded exactly once by `submit_attempt`, never deleted: the attempt list
/// on the quiz is an append-only audit log.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub user_id: String,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub answers: Vec<i32>, // selected option index per question, UNANSWERED when skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<i16>,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_taken_seconds: Option<i64>,
}

impl QuizAttempt {
    pub fn new(user_id: &str, started_at: DateTime<Utc>) -> Self {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            started_at,
            completed_at: None,
            answers: Vec::new(),
            score: None,
            max_score: None,
            passed: false,
            time_taken_seconds: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Writes `answers[question_index] = option_index`, padding skipped
    /// slots with the sentinel. No range check on the option index here:
    /// out-of-range selections are scored as wrong at grading, which keeps
    /// answer/re-answer flows free of intermediate errors.
    pub fn record_answer(&mut self, question_index: usize, option_index: i32) {
        while self.answers.len() <= question_index {
            self.answers.push(UNANSWERED);
        }
        self.answers[question_index] = option_index;
    }
}
