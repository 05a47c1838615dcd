use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::quiz_attempt::QuizAttempt;
use crate::models::domain::quiz_question::QuizQuestion;

/// What a quiz is attached to. Opaque to the engine, used only for
/// classification and repository lookups.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum RelatedKind {
    Course,
    Material,
}

impl RelatedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelatedKind::Course => "course",
            RelatedKind::Material => "material",
        }
    }
}

/// Quiz aggregate: the question template plus every attempt ever made
/// against it. Question order is significant, it defines question numbering
/// and the scoring index for `answers`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    // Classification
    pub related_kind: RelatedKind,
    pub related_id: String,

    pub questions: Vec<QuizQuestion>,

    // Settings, immutable per attempt once one has started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_minutes: Option<i64>, // advisory, enforced by the calling layer
    pub pass_percentage: i16,
    pub max_attempts: i16,
    pub shuffle_questions: bool, // presentation only, never consulted by scoring
    pub shuffle_options: bool,   // presentation only, never consulted by scoring
    pub show_correct_answers: bool,

    // Availability window, both bounds inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_until: Option<DateTime<Utc>>,

    // Append-only attempt log, owned by this aggregate
    pub attempts: Vec<QuizAttempt>,

    // Metadata
    pub created_by: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(
        title: &str,
        description: &str,
        related_kind: RelatedKind,
        related_id: &str,
        questions: Vec<QuizQuestion>,
        pass_percentage: i16,
        max_attempts: i16,
        created_by: &str,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            instructions: None,
            related_kind,
            related_id: related_id.to_string(),
            questions,
            time_limit_minutes: None,
            pass_percentage,
            max_attempts,
            shuffle_questions: true,
            shuffle_options: true,
            show_correct_answers: true,
            available_from: None,
            available_until: None,
            attempts: Vec::new(),
            created_by: created_by.to_string(),
            is_active: true,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    pub fn user_attempts(&self, user_id: &str) -> Vec<&QuizAttempt> {
        self.attempts
            .iter()
            .filter(|a| a.user_id == user_id)
            .collect()
    }

    /// Every started attempt counts, submitted or not.
    pub fn attempt_count(&self, user_id: &str) -> usize {
        self.attempts.iter().filter(|a| a.user_id == user_id).count()
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
