use chrono::{DateTime, Utc};

use crate::errors::{AppError, AppResult};
use crate::models::domain::quiz_attempt::{QuizAttempt, UNANSWERED};
use crate::models::domain::Quiz;

/// Post-attempt review data for a single question.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionResult {
    pub is_correct: bool,
    pub explanation: Option<String>,
    pub selected_option_text: Option<String>,
    pub correct_option_index: Option<usize>,
    pub correct_option_text: Option<String>,
}

/// Attempt lifecycle and auto-grading over the `Quiz` aggregate.
///
/// Stateless: every operation takes the quiz (and `now`) explicitly, so the
/// caller owns loading the aggregate from storage and saving it back. An
/// attempt moves in progress -> graded and never back; a retake is a new
/// attempt record, not a reset.
pub struct QuizAttemptService;

impl QuizAttemptService {
    /// Why the user may not start an attempt right now, or `None` when they
    /// may. Each started attempt counts against the cap, submitted or not:
    /// abandoning an attempt does not refund it.
    pub fn refusal_reason(quiz: &Quiz, user_id: &str, now: DateTime<Utc>) -> Option<String> {
        if !quiz.is_active {
            return Some(format!("quiz '{}' is inactive", quiz.id));
        }

        // Availability bounds are inclusive on both ends.
        if let Some(from) = quiz.available_from {
            if now < from {
                return Some(format!("quiz '{}' is not open yet", quiz.id));
            }
        }
        if let Some(until) = quiz.available_until {
            if now > until {
                return Some(format!("quiz '{}' has closed", quiz.id));
            }
        }

        if quiz.attempt_count(user_id) >= quiz.max_attempts.max(0) as usize {
            return Some(format!(
                "user '{}' has used all {} attempts",
                user_id, quiz.max_attempts
            ));
        }

        None
    }

    /// Pure predicate behind the "start" affordance. `start_attempt` applies
    /// the same check as its precondition.
    pub fn can_attempt(quiz: &Quiz, user_id: &str, now: DateTime<Utc>) -> bool {
        Self::refusal_reason(quiz, user_id, now).is_none()
    }

    /// Appends a fresh in-progress attempt and returns it. Refuses with
    /// `AttemptNotAllowed` when `can_attempt` does not hold; no record is
    /// created in that case.
    pub fn start_attempt(
        quiz: &mut Quiz,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<QuizAttempt> {
        if let Some(reason) = Self::refusal_reason(quiz, user_id, now) {
            return Err(AppError::AttemptNotAllowed(reason));
        }

        let attempt = QuizAttempt::new(user_id, now);
        quiz.attempts.push(attempt.clone());
        quiz.touch();

        log::debug!(
            "Started attempt {} on quiz {} for user {}",
            attempt.id,
            quiz.id,
            user_id
        );

        Ok(attempt)
    }

    /// Records one answer on the user's in-progress attempt. The option
    /// index is not range-checked against the question (grading treats
    /// out-of-range selections as wrong), only values below the sentinel
    /// are refused as garbage.
    pub fn record_answer(
        quiz: &mut Quiz,
        user_id: &str,
        question_index: usize,
        option_index: i32,
    ) -> AppResult<QuizAttempt> {
        if question_index >= quiz.questions.len() {
            return Err(AppError::InvalidQuestionIndex(question_index));
        }
        if option_index < UNANSWERED {
            return Err(AppError::InvalidOptionIndex(option_index));
        }

        let attempt = quiz
            .attempts
            .iter_mut()
            .rev()
            .find(|a| a.user_id == user_id && !a.is_completed())
            .ok_or_else(|| AppError::NoActiveAttempt(user_id.to_string()))?;

        attempt.record_answer(question_index, option_index);
        let snapshot = attempt.clone();
        quiz.touch();

        Ok(snapshot)
    }

    /// Pure scoring pass. `max_score` always sums every question's points; a
    /// question earns its points only when the answer at its position is in
    /// range and marked correct. Unanswered, out-of-range, and malformed
    /// (no correct option) questions score zero without being errors.
    pub fn calculate_score(quiz: &Quiz, answers: &[i32]) -> (i16, i16) {
        let mut score: i16 = 0;
        let mut max_score: i16 = 0;

        for (i, question) in quiz.questions.iter().enumerate() {
            max_score += question.points;

            if let Some(&selected) = answers.get(i) {
                if selected >= 0
                    && (selected as usize) < question.option_count()
                    && question.options[selected as usize].is_correct
                {
                    score += question.points;
                }
            }
        }

        (score, max_score)
    }

    /// Grades the most recently started incomplete attempt for the user.
    /// The submitted answers replace anything recorded earlier in full;
    /// submission is authoritative. Terminal: a graded attempt is never
    /// mutated again.
    pub fn submit_attempt(
        quiz: &mut Quiz,
        user_id: &str,
        answers: Vec<i32>,
        now: DateTime<Utc>,
    ) -> AppResult<QuizAttempt> {
        let (score, max_score) = Self::calculate_score(quiz, &answers);
        let percentage = if max_score > 0 {
            score as f64 / max_score as f64 * 100.0
        } else {
            0.0
        };
        let passed = max_score > 0 && percentage >= quiz.pass_percentage as f64;
        let pass_percentage = quiz.pass_percentage;

        let attempt = quiz
            .attempts
            .iter_mut()
            .rev()
            .find(|a| a.user_id == user_id && !a.is_completed())
            .ok_or_else(|| AppError::NoActiveAttempt(user_id.to_string()))?;

        attempt.completed_at = Some(now);
        attempt.answers = answers;
        attempt.score = Some(score);
        attempt.max_score = Some(max_score);
        attempt.passed = passed;
        // Whole seconds, truncated.
        attempt.time_taken_seconds = Some((now - attempt.started_at).num_seconds());

        let snapshot = attempt.clone();
        quiz.touch();

        log::debug!(
            "Graded attempt {} on quiz {}: {}/{} ({}% required), passed={}",
            snapshot.id,
            quiz.id,
            score,
            max_score,
            pass_percentage,
            passed
        );

        Ok(snapshot)
    }

    /// Highest-scoring completed attempt for the user; ties go to the
    /// earliest `completed_at` so first mastery is what counts.
    pub fn get_best_attempt<'a>(quiz: &'a Quiz, user_id: &str) -> Option<&'a QuizAttempt> {
        quiz.attempts
            .iter()
            .filter(|a| a.user_id == user_id && a.is_completed())
            .fold(None, |best: Option<&QuizAttempt>, candidate| match best {
                None => Some(candidate),
                Some(current) => {
                    let candidate_score = candidate.score.unwrap_or(0);
                    let current_score = current.score.unwrap_or(0);
                    if candidate_score > current_score
                        || (candidate_score == current_score
                            && candidate.completed_at < current.completed_at)
                    {
                        Some(candidate)
                    } else {
                        Some(current)
                    }
                }
            })
    }

    /// Attempt lookup by id within one quiz aggregate.
    pub fn find_attempt<'a>(quiz: &'a Quiz, attempt_id: &str) -> AppResult<&'a QuizAttempt> {
        quiz.attempts
            .iter()
            .find(|a| a.id == attempt_id)
            .ok_or_else(|| AppError::AttemptNotFound(attempt_id.to_string()))
    }

    /// Review data for one question. An out-of-range selection is rendered
    /// as "not answered", never an error; a malformed question with no
    /// correct option yields no correct-answer hint even when the quiz is
    /// configured to show them.
    pub fn get_question_result(
        quiz: &Quiz,
        question_index: usize,
        selected_option: i32,
    ) -> AppResult<QuestionResult> {
        let question = quiz
            .questions
            .get(question_index)
            .ok_or(AppError::InvalidQuestionIndex(question_index))?;

        let correct_option_index = question.correct_option_index();
        let correct_option_text =
            correct_option_index.map(|i| question.options[i].text.clone());

        let selected = if selected_option >= 0 {
            question.options.get(selected_option as usize)
        } else {
            None
        };

        Ok(QuestionResult {
            is_correct: selected.map(|opt| opt.is_correct).unwrap_or(false),
            explanation: question.explanation.clone(),
            selected_option_text: selected.map(|opt| opt.text.clone()),
            correct_option_index,
            correct_option_text,
        })
    }

    /// Advisory countdown for the calling layer's time-limit enforcement.
    /// `None` when the quiz is untimed; clamped at zero once the limit has
    /// elapsed. The engine never terminates an attempt on its own.
    pub fn remaining_seconds(
        quiz: &Quiz,
        attempt: &QuizAttempt,
        now: DateTime<Utc>,
    ) -> Option<i64> {
        quiz.time_limit_minutes.map(|limit| {
            let elapsed = (now - attempt.started_at).num_seconds();
            (limit * 60 - elapsed).max(0)
        })
    }
}
