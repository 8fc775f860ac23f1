use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MultiChoice {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub difficulty: u32,
    pub answer: String,
    pub hint: Option<String>,
    pub time_limit: Duration,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrueFalse {
    pub id: String,
    pub prompt: String,
    pub difficulty: u32,
    pub answer: bool,
    pub hint: Option<String>,
    pub time_limit: Duration,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FillIn {
    pub id: String,
    pub prompt: String,
    pub difficulty: u32,
    pub answer: String,
    pub hint: Option<String>,
    pub time_limit: Duration,
}

/// Storage tag for each question variant. The tag-to-variant mapping lives
/// here so the adapter match arms in `question::db` stay the only decode
/// boundary to extend when a new variant is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    MultiChoice,
    TrueFalse,
    FillIn,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::MultiChoice => "MULTI_CHOICE",
            QuestionKind::TrueFalse => "TRUE_FALSE",
            QuestionKind::FillIn => "FILL_IN",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "MULTI_CHOICE" => Some(QuestionKind::MultiChoice),
            "TRUE_FALSE" => Some(QuestionKind::TrueFalse),
            "FILL_IN" => Some(QuestionKind::FillIn),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Question {
    MultiChoice(MultiChoice),
    TrueFalse(TrueFalse),
    FillIn(FillIn),
}

impl Question {
    pub fn id(&self) -> &str {
        match self {
            Question::MultiChoice(q) => &q.id,
            Question::TrueFalse(q) => &q.id,
            Question::FillIn(q) => &q.id,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Question::MultiChoice(q) => &q.prompt,
            Question::TrueFalse(q) => &q.prompt,
            Question::FillIn(q) => &q.prompt,
        }
    }

    pub fn difficulty(&self) -> u32 {
        match self {
            Question::MultiChoice(q) => q.difficulty,
            Question::TrueFalse(q) => q.difficulty,
            Question::FillIn(q) => q.difficulty,
        }
    }

    pub fn time_limit(&self) -> Duration {
        match self {
            Question::MultiChoice(q) => q.time_limit,
            Question::TrueFalse(q) => q.time_limit,
            Question::FillIn(q) => q.time_limit,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            Question::MultiChoice(q) => q.hint.as_deref(),
            Question::TrueFalse(q) => q.hint.as_deref(),
            Question::FillIn(q) => q.hint.as_deref(),
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::MultiChoice(_) => QuestionKind::MultiChoice,
            Question::TrueFalse(_) => QuestionKind::TrueFalse,
            Question::FillIn(_) => QuestionKind::FillIn,
        }
    }

    /// Pure check of a submitted answer against the canonical one. String
    /// comparison is exact, no trimming or case folding. A true/false
    /// question counts any submission other than the literal `"true"` as a
    /// "false" vote.
    pub fn check_answer(&self, submitted: &str) -> bool {
        match self {
            Question::MultiChoice(q) => submitted == q.answer,
            Question::TrueFalse(q) => (submitted == "true") == q.answer,
            Question::FillIn(q) => submitted == q.answer,
        }
    }

    /// The canonical answer as it is persisted in the answer column.
    pub(crate) fn answer_text(&self) -> &str {
        match self {
            Question::MultiChoice(q) => &q.answer,
            Question::TrueFalse(q) => {
                if q.answer {
                    "true"
                } else {
                    "false"
                }
            }
            Question::FillIn(q) => &q.answer,
        }
    }
}
