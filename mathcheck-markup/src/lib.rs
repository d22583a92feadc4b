//! Best-effort translation of math-editor markup into linear algebraic notation.
//!
//! Graphical math-entry widgets emit a structured markup dialect in which grouping,
//! multiplication, and exponentiation are expressed visually: `\frac{1}{2}`, `\sqrt{x}`,
//! `x^{2}`, `2x`. A symbolic evaluator instead wants fully explicit infix syntax: `(1)/(2)`,
//! `sqrt(x)`, `(x)^(2)`, `2*x`. [`translate`] converts the former into the latter.
//!
//! ```
//! use mathcheck_markup::translate;
//!
//! assert_eq!(translate(r"\frac{a}{b}"), "(a)/(b)");
//! assert_eq!(translate(r"2x^{2}"), "2*(x)^(2)");
//! ```
//!
//! Translation is **total**: it never fails, no matter how mangled the input is. Constructs it
//! does not recognize pass through unchanged, producing output that simply fails to parse
//! downstream — the evaluator treats that as "not equivalent", which is the intended
//! degradation for malformed answers.

pub mod token;
pub mod translate;

pub use translate::translate;
