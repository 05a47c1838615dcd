#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::quiz::RelatedKind;
    use crate::models::domain::quiz_question::{QuizOption, QuizQuestion};
    use crate::models::domain::Quiz;

    /// Three-option question whose option at `correct_index` is the right
    /// answer, worth `points`.
    pub fn scored_question(correct_index: usize, points: i16) -> QuizQuestion {
        let options = (0..3)
            .map(|i| QuizOption::new(&format!("option {}", i), i == correct_index))
            .collect();

        QuizQuestion::new("sample question", options, points, None)
            .expect("fixture question should be valid")
    }

    /// One-point question with the first option correct.
    pub fn simple_question() -> QuizQuestion {
        scored_question(0, 1)
    }

    /// Active quiz with the given questions, 60% pass bar, 3 attempts, no
    /// availability window.
    pub fn quiz_with_questions(questions: Vec<QuizQuestion>) -> Quiz {
        Quiz::new(
            "Test quiz",
            "Quiz used by unit tests",
            RelatedKind::Course,
            "course-1",
            questions,
            60,
            3,
            "admin-1",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_scored_question() {
        let question = scored_question(2, 4);
        assert_eq!(question.correct_option_index(), Some(2));
        assert_eq!(question.points, 4);
        assert_eq!(question.option_count(), 3);
    }

    #[test]
    fn test_fixtures_quiz_with_questions() {
        let quiz = quiz_with_questions(vec![simple_question(), scored_question(1, 2)]);
        assert!(quiz.is_active);
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.pass_percentage, 60);
        assert_eq!(quiz.max_attempts, 3);
    }
}
