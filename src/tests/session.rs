#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        question::models::{FillIn, MultiChoice, Question, TrueFalse},
        quiz::models::{QuizSession, QuizStatus},
    };

    fn sample_questions() -> Vec<Question> {
        vec![
            Question::MultiChoice(MultiChoice {
                id: "mc1".to_string(),
                prompt: "What is 2+2?".to_string(),
                options: vec![
                    "3".to_string(),
                    "4".to_string(),
                    "5".to_string(),
                    "6".to_string(),
                ],
                difficulty: 1,
                answer: "4".to_string(),
                hint: None,
                time_limit: Duration::from_secs(30),
            }),
            Question::TrueFalse(TrueFalse {
                id: "tf1".to_string(),
                prompt: "The sky is blue".to_string(),
                difficulty: 2,
                answer: true,
                hint: None,
                time_limit: Duration::from_secs(15),
            }),
            Question::FillIn(FillIn {
                id: "fi1".to_string(),
                prompt: "The capital of France is ___".to_string(),
                difficulty: 3,
                answer: "Paris".to_string(),
                hint: Some("Starts with P".to_string()),
                time_limit: Duration::from_secs(45),
            }),
        ]
    }

    #[test]
    fn new_session_defaults() {
        let session = QuizSession::new("quiz1", sample_questions());

        assert_eq!(session.id(), "quiz1");
        assert_eq!(session.amount_of_questions(), 3);
        assert_eq!(session.score(), 0);
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.status(), QuizStatus::Started);
        assert!(!session.is_completed());
        assert!(session.history().is_empty());
        assert_eq!(session.progress(), (1, 3));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = QuizSession::with_generated_id(vec![]);
        let b = QuizSession::with_generated_id(vec![]);

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn current_question_follows_the_pointer() {
        let mut session = QuizSession::new("quiz1", sample_questions());

        assert_eq!(session.current_question().map(|q| q.id()), Some("mc1"));

        session.next_question();
        assert_eq!(session.current_question().map(|q| q.id()), Some("tf1"));
    }

    #[test]
    fn empty_session_has_no_current_question() {
        let mut session = QuizSession::new("quiz1", vec![]);

        assert!(session.current_question().is_none());
        assert!(!session.next_question());
        assert!(session.is_completed());
    }

    #[test]
    fn next_question_advances_then_finishes() {
        let mut session = QuizSession::new("quiz1", sample_questions());

        assert!(session.next_question());
        assert_eq!(session.status(), QuizStatus::AwaitingAnswer);
        assert!(session.next_question());
        assert_eq!(session.progress(), (3, 3));

        // Advancing past the last question completes the session.
        assert!(!session.next_question());
        assert!(session.is_completed());
        assert_eq!(session.status(), QuizStatus::Finished);

        // Repeated calls after completion stay no-ops.
        assert!(!session.next_question());
        assert_eq!(session.progress(), (3, 3));
    }

    #[test]
    fn submit_answer_scores_and_records_history() {
        let mut session = QuizSession::new("quiz1", sample_questions());

        assert!(session.submit_answer("4"));
        assert_eq!(session.score(), 1);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.status(), QuizStatus::Answered);

        let history = session.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].question_id, "mc1");
        assert!(history[0].correct);

        session.next_question();
        assert!(!session.submit_answer("false"));
        assert_eq!(session.score(), 1);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.history().len(), 2);
        assert!(!session.history()[1].correct);
    }

    #[test]
    fn resubmitting_accumulates_score_and_history() {
        let mut session = QuizSession::new("quiz1", sample_questions());

        // Score accumulates per submission, not per question.
        assert!(session.submit_answer("4"));
        assert!(session.submit_answer("4"));

        assert_eq!(session.score(), 2);
        assert_eq!(session.correct_count(), 2);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn submit_after_completion_is_rejected() {
        let mut session = QuizSession::new("quiz1", sample_questions());

        while session.next_question() {}
        assert!(session.is_completed());

        assert!(!session.submit_answer("4"));
        assert!(session.history().is_empty());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn full_run_scenario() {
        let mut session = QuizSession::new("quiz1", sample_questions());

        assert!(session.submit_answer("4"));
        session.next_question();
        assert!(session.submit_answer("true"));
        session.next_question();
        assert!(!session.submit_answer("London"));
        assert!(!session.next_question());

        assert_eq!(session.score(), 3);
        assert_eq!(session.correct_count(), 2);
        assert_eq!(session.status(), QuizStatus::Finished);
        assert!(session.is_completed());
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn true_false_only_accepts_the_literal_true_as_a_true_vote() {
        let question = Question::TrueFalse(TrueFalse {
            id: "tf1".to_string(),
            prompt: "The sky is blue".to_string(),
            difficulty: 2,
            answer: true,
            hint: None,
            time_limit: Duration::from_secs(15),
        });

        assert!(question.check_answer("true"));
        assert!(!question.check_answer("false"));
        assert!(!question.check_answer("maybe"));
        assert!(!question.check_answer("True"));
    }

    #[test]
    fn true_false_counts_anything_else_as_a_false_vote() {
        let question = Question::TrueFalse(TrueFalse {
            id: "tf2".to_string(),
            prompt: "The sky is green".to_string(),
            difficulty: 2,
            answer: false,
            hint: None,
            time_limit: Duration::from_secs(15),
        });

        assert!(!question.check_answer("true"));
        assert!(question.check_answer("false"));
        assert!(question.check_answer("maybe"));
    }

    #[test]
    fn check_answer_is_pure() {
        let question = sample_questions().remove(0);
        let before = question.clone();

        assert_eq!(question.check_answer("4"), question.check_answer("4"));
        assert!(!question.check_answer("5"));
        assert_eq!(question, before);
    }

    #[test]
    fn fill_in_comparison_is_exact() {
        let question = sample_questions().remove(2);

        assert!(question.check_answer("Paris"));
        assert!(!question.check_answer("paris"));
        assert!(!question.check_answer(" Paris"));
    }

    #[test]
    fn time_taken_freezes_at_completion() {
        let mut session = QuizSession::new("quiz1", sample_questions());

        while session.next_question() {}

        let frozen = session.time_taken();
        assert_eq!(session.time_taken(), frozen);
    }

    #[test]
    fn caller_can_force_saved_and_quit_states() {
        let mut session = QuizSession::new("quiz1", sample_questions());

        session.set_status(QuizStatus::Saved);
        assert_eq!(session.status(), QuizStatus::Saved);

        session.set_status(QuizStatus::Quit);
        assert_eq!(session.status(), QuizStatus::Quit);
    }
}
