//! The question model consumed by the grader.
//!
//! These are plain data definitions; how they are authored, stored, and presented belongs to the
//! surrounding application. With the `serde` feature enabled they (de)serialize for whatever
//! persistence that application uses.

use mathcheck_symbolic::equiv::ComparisonMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fill-in question whose answer is a mathematical expression entered in a math editor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClozeQuestion {
    /// Identifier for matching submitted answers to questions.
    pub id: u64,

    /// The prompt shown to the student, in markup.
    pub prompt: String,

    /// The expected answer, in markup.
    pub expected: String,

    /// Points awarded for a correct answer.
    pub points: u32,

    /// How the submitted answer is compared to the expected one.
    pub mode: ComparisonMode,
}

/// A single option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultichoiceOption {
    /// The option text, in markup.
    pub markup: String,

    /// Whether this option is part of the correct answer.
    pub correct: bool,
}

/// A multiple-choice question. Any number of options may be marked correct, and the student must
/// select exactly that set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultichoiceQuestion {
    /// Identifier for matching submitted answers to questions.
    pub id: u64,

    /// The prompt shown to the student, in markup.
    pub prompt: String,

    /// The options, in display order.
    pub options: Vec<MultichoiceOption>,

    /// Points awarded for a correct answer.
    pub points: u32,
}

/// Any gradable question.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Question {
    /// A fill-in math question.
    Cloze(ClozeQuestion),

    /// A multiple-choice question.
    Multichoice(MultichoiceQuestion),
}

impl Question {
    /// Returns the question identifier.
    pub fn id(&self) -> u64 {
        match self {
            Question::Cloze(question) => question.id,
            Question::Multichoice(question) => question.id,
        }
    }

    /// Returns the points awarded for a correct answer.
    pub fn points(&self) -> u32 {
        match self {
            Question::Cloze(question) => question.points,
            Question::Multichoice(question) => question.points,
        }
    }
}

/// A submitted answer to a question.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Answer {
    /// A math-editor answer to a cloze question, in markup.
    Markup(String),

    /// The selected option indices of a multiple-choice question.
    Choices(Vec<usize>),
}
