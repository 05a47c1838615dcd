use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Quiz, QuizAttempt, RelatedKind},
    models::dto::CreateQuizRequest,
    repositories::QuizRepository,
    services::quiz_attempt_service::{QuestionResult, QuizAttemptService},
};

/// Load -> engine -> save orchestration around `QuizAttemptService`. The
/// engine itself never touches storage; this service owns the repository
/// round-trip and reads the clock once per call.
pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_quiz(
        &self,
        request: CreateQuizRequest,
        created_by: &str,
    ) -> AppResult<Quiz> {
        request.validate()?;

        let questions = request
            .questions
            .into_iter()
            .map(|q| q.into_domain())
            .collect::<AppResult<Vec<_>>>()?;

        let mut quiz = Quiz::new(
            &request.title,
            &request.description,
            request.related_kind,
            &request.related_id,
            questions,
            request.pass_percentage,
            request.max_attempts,
            created_by,
        );
        quiz.instructions = request.instructions;
        quiz.time_limit_minutes = request.time_limit_minutes;
        quiz.shuffle_questions = request.shuffle_questions.unwrap_or(true);
        quiz.shuffle_options = request.shuffle_options.unwrap_or(true);
        quiz.show_correct_answers = request.show_correct_answers.unwrap_or(true);
        quiz.available_from = request.available_from;
        quiz.available_until = request.available_until;

        log::info!("Creating quiz '{}' ({})", quiz.title, quiz.id);
        self.repository.create(quiz).await
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::QuizNotFound(id.to_string()))
    }

    pub async fn list_for_related(
        &self,
        kind: RelatedKind,
        related_id: &str,
    ) -> AppResult<Vec<Quiz>> {
        self.repository.list_by_related(kind, related_id).await
    }

    /// Soft-disable. An inactive quiz refuses new attempts but keeps its
    /// attempt history readable.
    pub async fn set_active(&self, quiz_id: &str, active: bool) -> AppResult<Quiz> {
        let mut quiz = self.get_quiz(quiz_id).await?;
        quiz.is_active = active;
        quiz.touch();
        self.repository.update(quiz).await
    }

    pub async fn can_attempt(&self, quiz_id: &str, user_id: &str) -> AppResult<bool> {
        let quiz = self.get_quiz(quiz_id).await?;
        Ok(QuizAttemptService::can_attempt(&quiz, user_id, Utc::now()))
    }

    pub async fn start_attempt(&self, quiz_id: &str, user_id: &str) -> AppResult<QuizAttempt> {
        let mut quiz = self.get_quiz(quiz_id).await?;
        let attempt = QuizAttemptService::start_attempt(&mut quiz, user_id, Utc::now())?;
        self.repository.update(quiz).await?;
        Ok(attempt)
    }

    pub async fn record_answer(
        &self,
        quiz_id: &str,
        user_id: &str,
        question_index: usize,
        option_index: i32,
    ) -> AppResult<QuizAttempt> {
        let mut quiz = self.get_quiz(quiz_id).await?;
        let attempt =
            QuizAttemptService::record_answer(&mut quiz, user_id, question_index, option_index)?;
        self.repository.update(quiz).await?;
        Ok(attempt)
    }

    pub async fn submit_attempt(
        &self,
        quiz_id: &str,
        user_id: &str,
        answers: Vec<i32>,
    ) -> AppResult<QuizAttempt> {
        let mut quiz = self.get_quiz(quiz_id).await?;
        let attempt = QuizAttemptService::submit_attempt(&mut quiz, user_id, answers, Utc::now())?;
        self.repository.update(quiz).await?;
        Ok(attempt)
    }

    pub async fn get_best_attempt(
        &self,
        quiz_id: &str,
        user_id: &str,
    ) -> AppResult<Option<QuizAttempt>> {
        let quiz = self.get_quiz(quiz_id).await?;
        Ok(QuizAttemptService::get_best_attempt(&quiz, user_id).cloned())
    }

    pub async fn get_attempt(&self, quiz_id: &str, attempt_id: &str) -> AppResult<QuizAttempt> {
        let quiz = self.get_quiz(quiz_id).await?;
        QuizAttemptService::find_attempt(&quiz, attempt_id).cloned()
    }

    pub async fn get_question_result(
        &self,
        quiz_id: &str,
        question_index: usize,
        selected_option: i32,
    ) -> AppResult<QuestionResult> {
        let quiz = self.get_quiz(quiz_id).await?;
        QuizAttemptService::get_question_result(&quiz, question_index, selected_option)
    }
}
