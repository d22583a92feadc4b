//! Binary scoring of quiz questions.
//!
//! A submitted answer is worth either the full points of its question or nothing; there is no
//! partial credit. For cloze questions in [`ComparisonMode::Algebraic`], the submitted and
//! expected markup both run through [`mathcheck_markup::translate`] and the symbolic evaluator
//! decides equivalence; in [`ComparisonMode::Exact`] the raw markup strings are compared
//! directly, bypassing translation entirely. Multiple-choice questions require the selected
//! option set to equal the correct option set exactly.
//!
//! ```
//! use mathcheck_grade::{grade_cloze, question::ClozeQuestion};
//! use mathcheck_symbolic::equiv::ComparisonMode;
//!
//! let question = ClozeQuestion {
//!     id: 1,
//!     prompt: r"Expand $(x+1)^2$".to_string(),
//!     expected: "x^{2}+2x+1".to_string(),
//!     points: 2,
//!     mode: ComparisonMode::Algebraic,
//! };
//!
//! assert_eq!(grade_cloze(&question, r"\left(x+1\right)^{2}"), 2);
//! assert_eq!(grade_cloze(&question, "x^{2}+2x+2"), 0);
//! ```
//!
//! Any failure in the symbolic path — malformed markup, unparseable output — degrades to a score
//! of zero, never an error.

pub mod question;

use mathcheck_markup::translate;
use mathcheck_symbolic::equiv::{are_equivalent, ComparisonMode};
use question::{Answer, ClozeQuestion, MultichoiceQuestion, Question};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeSet, HashMap};

/// Grades a cloze question, returning the awarded points.
pub fn grade_cloze(question: &ClozeQuestion, submitted: &str) -> u32 {
    let correct = match question.mode {
        ComparisonMode::Algebraic => {
            let submitted = translate(submitted);
            let expected = translate(&question.expected);
            are_equivalent(&submitted, &expected, ComparisonMode::Algebraic)
        },
        // exact mode compares the raw markup; the translator and evaluator are bypassed
        ComparisonMode::Exact => {
            are_equivalent(submitted, &question.expected, ComparisonMode::Exact)
        },
    };

    if correct { question.points } else { 0 }
}

/// Grades a multiple-choice question, returning the awarded points.
///
/// The selected set of option indices must equal the set of options marked correct — no credit
/// for subsets or supersets.
pub fn grade_multichoice(question: &MultichoiceQuestion, selected: &[usize]) -> u32 {
    let selected: BTreeSet<usize> = selected.iter().copied().collect();
    let correct: BTreeSet<usize> = question
        .options
        .iter()
        .enumerate()
        .filter_map(|(idx, option)| option.correct.then_some(idx))
        .collect();

    if selected == correct { question.points } else { 0 }
}

/// Grades a single question against a submitted answer. An answer of the wrong kind scores zero.
pub fn grade(question: &Question, answer: &Answer) -> u32 {
    match (question, answer) {
        (Question::Cloze(question), Answer::Markup(markup)) => grade_cloze(question, markup),
        (Question::Multichoice(question), Answer::Choices(choices)) => {
            grade_multichoice(question, choices)
        },
        _ => 0,
    }
}

/// Grades a whole submission, returning the total score. Unanswered questions score zero.
pub fn grade_submission(questions: &[Question], answers: &HashMap<u64, Answer>) -> u32 {
    questions
        .iter()
        .map(|question| {
            answers
                .get(&question.id())
                .map(|answer| grade(question, answer))
                .unwrap_or(0)
        })
        .sum()
}

/// Draws up to `n` random questions from the pool, in random order.
pub fn draw_questions<T: Clone>(pool: &[T], n: usize, rng: &mut impl Rng) -> Vec<T> {
    let mut drawn = pool.to_vec();
    drawn.shuffle(rng);
    drawn.truncate(n);
    drawn
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use question::MultichoiceOption;
    use super::*;

    fn cloze(expected: &str, points: u32, mode: ComparisonMode) -> ClozeQuestion {
        ClozeQuestion {
            id: 1,
            prompt: "Solve.".to_string(),
            expected: expected.to_string(),
            points,
            mode,
        }
    }

    fn multichoice(correct: &[bool], points: u32) -> MultichoiceQuestion {
        MultichoiceQuestion {
            id: 2,
            prompt: "Pick.".to_string(),
            options: correct
                .iter()
                .map(|&correct| MultichoiceOption {
                    markup: String::new(),
                    correct,
                })
                .collect(),
            points,
        }
    }

    #[test]
    fn algebraic_cloze_accepts_rewritings() {
        let question = cloze("x^{2}+2x+1", 3, ComparisonMode::Algebraic);

        assert_eq!(grade_cloze(&question, r"\left(x+1\right)^{2}"), 3);
        assert_eq!(grade_cloze(&question, "x^{2}+2x+1"), 3);
        assert_eq!(grade_cloze(&question, "x^{2}+2x"), 0);
    }

    #[test]
    fn algebraic_cloze_handles_fractions() {
        let question = cloze(r"\frac{1}{2}", 1, ComparisonMode::Algebraic);

        assert_eq!(grade_cloze(&question, "0.5"), 1);
        assert_eq!(grade_cloze(&question, r"\frac{2}{4}"), 1);
        assert_eq!(grade_cloze(&question, r"\frac{1}{3}"), 0);
    }

    #[test]
    fn exact_cloze_requires_identical_form() {
        let question = cloze("1/2", 2, ComparisonMode::Exact);

        assert_eq!(grade_cloze(&question, "1/2"), 2);
        assert_eq!(grade_cloze(&question, " 1/2 "), 2);
        assert_eq!(grade_cloze(&question, "0.5"), 0);
    }

    #[test]
    fn malformed_answers_score_zero() {
        let question = cloze("x+1", 5, ComparisonMode::Algebraic);

        assert_eq!(grade_cloze(&question, "(("), 0);
        assert_eq!(grade_cloze(&question, ""), 0);
    }

    #[test]
    fn multichoice_requires_exact_set() {
        let question = multichoice(&[true, false, true], 4);

        assert_eq!(grade_multichoice(&question, &[0, 2]), 4);
        assert_eq!(grade_multichoice(&question, &[2, 0]), 4);
        assert_eq!(grade_multichoice(&question, &[0]), 0);
        assert_eq!(grade_multichoice(&question, &[0, 1, 2]), 0);
        assert_eq!(grade_multichoice(&question, &[]), 0);
    }

    #[test]
    fn mismatched_answer_kind_scores_zero() {
        let question = Question::Cloze(cloze("x", 1, ComparisonMode::Algebraic));
        assert_eq!(grade(&question, &Answer::Choices(vec![0])), 0);
    }

    #[test]
    fn submission_totals() {
        let questions = vec![
            Question::Cloze(cloze("2x", 2, ComparisonMode::Algebraic)),
            Question::Multichoice(multichoice(&[false, true], 3)),
            Question::Cloze(ClozeQuestion {
                id: 3,
                prompt: String::new(),
                expected: "y".to_string(),
                points: 1,
                mode: ComparisonMode::Algebraic,
            }),
        ];

        let mut answers = HashMap::new();
        answers.insert(1, Answer::Markup("x+x".to_string()));
        answers.insert(2, Answer::Choices(vec![1]));
        // question 3 left unanswered

        assert_eq!(grade_submission(&questions, &answers), 5);
    }

    #[test]
    fn draws_requested_number_of_questions() {
        let pool: Vec<u32> = (0..10).collect();
        let mut rng = rand::thread_rng();

        let drawn = draw_questions(&pool, 3, &mut rng);
        assert_eq!(drawn.len(), 3);
        assert!(drawn.iter().all(|q| pool.contains(q)));

        // asking for more than the pool holds returns the whole pool
        assert_eq!(draw_questions(&pool, 50, &mut rng).len(), 10);
    }
}
