use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::question::models::Question;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum QuizStatus {
    Started,
    AwaitingAnswer,
    Answered,
    Finished,
    Saved,
    Quit,
}

impl QuizStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizStatus::Started => "STARTED",
            QuizStatus::AwaitingAnswer => "AWAITING_ANSWER",
            QuizStatus::Answered => "ANSWERED",
            QuizStatus::Finished => "FINISHED",
            QuizStatus::Saved => "SAVED",
            QuizStatus::Quit => "QUIT",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "STARTED" => Some(QuizStatus::Started),
            "AWAITING_ANSWER" => Some(QuizStatus::AwaitingAnswer),
            "ANSWERED" => Some(QuizStatus::Answered),
            "FINISHED" => Some(QuizStatus::Finished),
            "SAVED" => Some(QuizStatus::Saved),
            "QUIT" => Some(QuizStatus::Quit),
            _ => None,
        }
    }
}

/// Record of one answer submission. `time_taken` measures the latency of the
/// answer check itself, not the taker's think time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuestionResult {
    pub question_id: String,
    pub correct: bool,
    pub time_taken: Duration,
}

/// A single quiz attempt: an ordered question list, a progress pointer and
/// the running score. None of the operations fail, illegal calls such as
/// advancing or submitting after completion are signalled through their
/// boolean return value instead.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: String,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    completed: bool,
    status: QuizStatus,
    start_time: DateTime<Utc>,
    creation_date: DateTime<Utc>,
    time_taken: Duration,
    correct_count: u32,
    history: Vec<QuestionResult>,
}

impl QuizSession {
    pub fn new(id: impl Into<String>, questions: Vec<Question>) -> Self {
        let now = Utc::now();

        Self {
            id: id.into(),
            questions,
            current_index: 0,
            score: 0,
            completed: false,
            status: QuizStatus::Started,
            start_time: now,
            creation_date: now,
            time_taken: Duration::ZERO,
            correct_count: 0,
            history: Vec::new(),
        }
    }

    pub fn with_generated_id(questions: Vec<Question>) -> Self {
        Self::new(Uuid::new_v4().to_string(), questions)
    }

    /// Rebuilds a session from persisted rows. Only the quiz adapter should
    /// need this.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        id: String,
        questions: Vec<Question>,
        current_index: usize,
        score: u32,
        completed: bool,
        status: QuizStatus,
        start_time: DateTime<Utc>,
        creation_date: DateTime<Utc>,
        time_taken: Duration,
        correct_count: u32,
        history: Vec<QuestionResult>,
    ) -> Self {
        Self {
            id,
            questions,
            current_index,
            score,
            completed,
            status,
            start_time,
            creation_date,
            time_taken,
            correct_count,
            history,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Advances to the next question, or finishes the session when the
    /// pointer already sits on the last question. Returns false once there is
    /// nothing left to advance to; further calls after completion are no-ops
    /// that keep returning false.
    pub fn next_question(&mut self) -> bool {
        if self.completed {
            return false;
        }

        if self.current_index + 1 >= self.questions.len() {
            self.completed = true;
            self.status = QuizStatus::Finished;
            self.time_taken = elapsed_since(self.start_time);
            return false;
        }

        self.current_index += 1;
        self.status = QuizStatus::AwaitingAnswer;
        true
    }

    /// Checks the submitted answer against the current question, records the
    /// outcome in the history and updates score and correct count on a hit.
    /// Submitting twice for the same question appends two history entries.
    pub fn submit_answer(&mut self, submitted: &str) -> bool {
        if self.completed || self.current_index >= self.questions.len() {
            return false;
        }

        let question = &self.questions[self.current_index];
        let question_id = question.id().to_string();
        let difficulty = question.difficulty();

        let check_start = Instant::now();
        let correct = question.check_answer(submitted);
        let time_taken = check_start.elapsed();

        self.history.push(QuestionResult {
            question_id,
            correct,
            time_taken,
        });

        if correct {
            self.score += difficulty;
            self.correct_count += 1;
        }

        self.status = QuizStatus::Answered;
        correct
    }

    /// 1-based position of the current question and the total count.
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index + 1, self.questions.len())
    }

    /// Frozen duration once completed, live elapsed time before that.
    pub fn time_taken(&self) -> Duration {
        if self.completed {
            return self.time_taken;
        }

        elapsed_since(self.start_time)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn amount_of_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn status(&self) -> QuizStatus {
        self.status
    }

    /// Lets a caller mark the session `Saved` or `Quit`. The machine itself
    /// never produces those states.
    pub fn set_status(&mut self, status: QuizStatus) {
        self.status = status;
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn creation_date(&self) -> DateTime<Utc> {
        self.creation_date
    }

    pub fn history(&self) -> &[QuestionResult] {
        &self.history
    }
}

fn elapsed_since(start: DateTime<Utc>) -> Duration {
    (Utc::now() - start).to_std().unwrap_or_default()
}
