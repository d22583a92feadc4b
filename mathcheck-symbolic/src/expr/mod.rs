//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](mathcheck_parser::parser::ast::Expr) type from `mathcheck_parser` is a recursive
//! `enum` that represents the AST of a mathematical expression. It's convenient for parsing, but
//! not so much for algebraic manipulation.
//!
//! This module defines a separate type, [`SymExpr`], that stores additional information about
//! the expression, such as the terms and factors that make it up. It simplifies the AST by
//! recursively flattening it into a list of terms or factors, depending on the operation, and
//! normalizing the expression into a sum of products. Subtraction becomes addition of a negated
//! term, and division becomes multiplication by a reciprocal, so `Add` and `Mul` are the only
//! variadic nodes.
//!
//! # Strict equality
//!
//! A common problem that arises in symbolic computation is determining if two expressions are
//! semantically / mathematically equal, in order to determine if terms / factors are similar
//! enough to be combined. However, this is extremely difficult to do in general, because there
//! are an infinite number of ways to represent the same expression.
//!
//! Consider `x^2 + 2x + 1` and `(x + 1)^2`. Both are semantically equal, but this is not
//! immediately obvious without first applying expansion / simplification. This is a bit of a
//! chicken-and-egg problem: to simplify, we need to check semantic equality, but to check
//! semantic equality, we need to simplify!
//!
//! To alleviate these issues, we define a subset of semantic equality for expressions, called
//! **strict equality**. We define two expressions to be strictly equal if:
//!
//! - They are the same type of expression (i.e. both [`SymExpr::Primary`], both
//!   [`SymExpr::Add`], etc.).
//! - If both are [`SymExpr::Primary`], both expressions must have strictly equal values.
//! - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both expressions must have strictly equal
//!   terms / factors, in any order.
//! - If both are [`SymExpr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! Strict equality is not the same as semantic equality; `x^2 + 2x + 1` and `(x + 1)^2` are
//! **not** strictly equal. However, because strict equality is a subset of semantic equality, it
//! can never report false positives, it is fast to compute, and it does not depend on any
//! simplification to work. This resolves the chicken-and-egg problem: simplification uses strict
//! equality to decide what to combine, and equivalence checking uses strict equality on
//! simplified expressions.
//!
//! The [`PartialEq`] and [`Eq`] implementations for [`SymExpr`] implement **strict equality**,
//! not semantic equality.

use crate::primitive::{float_from_str, int, int_from_str};
use crate::simplify::fraction::make_fraction;
use mathcheck_parser::parser::{
    ast::{expr::Expr as AstExpr, literal::Literal},
    token::op::{BinOpKind, UnaryOpKind},
};
use rug::{Float, Integer};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg};

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(Integer),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// A function call, such as `sqrt(2)` or `f(x, y)`.
    Call(String, Vec<SymExpr>),
}

/// [`Eq`] is implemented manually to allow comparing [`Primary::Float`]s. This module **must
/// never** produce non-normal [`Float`]s (such as `NaN` or `Infinity`).
impl Eq for Primary {}

/// [`Hash`] is implemented manually so that [`Primary::Float`]s can be hashed; floats are hashed
/// through their `f64` bit pattern.
impl Hash for Primary {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Integer(int) => int.hash(state),
            Self::Float(float) => float.to_f64().to_bits().hash(state),
            Self::Symbol(sym) => sym.hash(state),
            Self::Call(name, args) => {
                name.hash(state);
                args.hash(state);
            },
        }
    }
}

impl std::fmt::Display for Primary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => write!(f, "{}", num.to_f64()),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

/// Adds two [`Primary`]s together. If both are the **same numeric type**, the numbers are added
/// together. Otherwise, the two [`Primary`]s are wrapped in a [`SymExpr::Add`].
impl Add<Primary> for Primary {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                SymExpr::Primary(Primary::Integer(lhs + rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) => {
                SymExpr::Primary(Primary::Float(lhs + rhs))
            },
            (lhs, rhs) => SymExpr::Add(vec![
                SymExpr::Primary(lhs),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// Multiplies two [`Primary`]s together. If both are the **same numeric type**, the numbers are
/// multiplied together. Otherwise, the two [`Primary`]s are wrapped in a [`SymExpr::Mul`].
impl Mul<Primary> for Primary {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                SymExpr::Primary(Primary::Integer(lhs * rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) => {
                SymExpr::Primary(Primary::Float(lhs * rhs))
            },
            (lhs, rhs) => SymExpr::Mul(vec![
                SymExpr::Primary(lhs),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// This type **flattens** out the tree structure of the AST it is built from: the expression
/// `x + (y + z)` is represented as a single [`SymExpr::Add`] node with _three_ children. For
/// more information, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Returns the binding strength of this node, used to decide where parentheses are needed
    /// when printing.
    fn precedence(&self) -> u8 {
        match self {
            Self::Add(_) => 0,
            Self::Mul(_) => 1,
            Self::Exp(..) => 2,
            Self::Primary(_) => 3,
        }
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Integer`], returns the contained integer.
    pub fn into_integer(self) -> Option<Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// Returns true if the expression is a [`Primary::Integer`] raised to the power of -1, the
    /// canonical representation of the denominator of a fraction.
    pub fn is_integer_recip(&self) -> bool {
        if let Self::Exp(base, exp) = self {
            if matches!(&**base, Self::Primary(Primary::Integer(_))) {
                if let Self::Primary(Primary::Integer(exp)) = &**exp {
                    return exp == &-1;
                }
            }
        }

        false
    }

    /// If the expression is a [`Primary::Integer`] raised to the power of -1, returns the
    /// contained integer (the denominator of the fraction).
    pub fn into_integer_recip(self) -> Option<Integer> {
        if let Self::Exp(base, exp) = self {
            if matches!(*base, Self::Primary(Primary::Integer(_))) {
                if let Self::Primary(Primary::Integer(exp)) = *exp {
                    if exp == -1 {
                        return base.into_integer();
                    }
                }
            }
        }

        None
    }

    /// Returns true if the expression is a [`Primary::Float`].
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Primary(Primary::Float(_)))
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in a [`SymExpr::Add`] with zero / one term, or a
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or a [`SymExpr::Primary`]
    /// containing the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::Primary(Primary::Integer(int(0)))
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::Primary(Primary::Integer(int(1)))
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }
}

impl std::fmt::Display for SymExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let mut iter = factors.iter();
                if let Some(factor) = iter.next() {
                    if factor.precedence() < self.precedence() {
                        write!(f, "({})", factor)?;
                    } else {
                        write!(f, "{}", factor)?;
                    }
                    for factor in iter {
                        if factor.precedence() < self.precedence() {
                            write!(f, " * ({})", factor)?;
                        } else {
                            write!(f, " * {}", factor)?;
                        }
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                if base.precedence() < self.precedence() {
                    write!(f, "({})", base)?;
                } else {
                    write!(f, "{}", base)?;
                }
                write!(f, "^")?;
                if exp.precedence() < self.precedence() {
                    write!(f, "({})", exp)?;
                } else {
                    write!(f, "{}", exp)?;
                }
                Ok(())
            },
        }
    }
}

/// Checks if two expressions are **strictly** equal; see the
/// [module-level documentation](self). Terms and factors are compared as multisets, so their
/// order does not matter.
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                if lhs.len() != rhs.len() {
                    return false;
                }

                // multiset equality: each matched element is only claimed once
                let mut remaining: Vec<&SymExpr> = rhs.iter().collect();
                lhs.iter().all(|item| {
                    if let Some(idx) = remaining.iter().position(|other| *other == item) {
                        remaining.swap_remove(idx);
                        true
                    } else {
                        false
                    }
                })
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// [`Hash`] is implemented manually to stay consistent with strict equality: the hashes of terms
/// and factors are combined with an order-insensitive XOR.
impl Hash for SymExpr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Primary(primary) => primary.hash(state),
            Self::Add(items) | Self::Mul(items) => {
                items.len().hash(state);
                let mut combined = 0u64;
                for item in items {
                    let mut hasher = DefaultHasher::new();
                    item.hash(&mut hasher);
                    combined ^= hasher.finish();
                }
                combined.hash(state);
            },
            Self::Exp(base, exp) => {
                base.hash(state);
                exp.hash(state);
            },
        }
    }
}

impl From<AstExpr> for SymExpr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(literal) => match literal {
                Literal::Integer(int) => Self::Primary(Primary::Integer(int_from_str(&int.value))),
                Literal::Float(float) => Self::Primary(Primary::Float(float_from_str(&float.value))),
                Literal::Symbol(sym) => Self::Primary(Primary::Symbol(sym.name)),
            },
            AstExpr::Paren(paren) => Self::from(paren.into_innermost()),
            AstExpr::Call(call) => {
                let args = call.args.into_iter().map(Self::from).collect();
                Self::Primary(Primary::Call(call.name.name, args))
            },
            AstExpr::Unary(unary) => match unary.op.kind {
                // treat negation as -1 * operand
                UnaryOpKind::Neg => Self::from(*unary.operand).neg(),
            },
            AstExpr::Binary(bin) => match bin.op.kind {
                BinOpKind::Exp => Self::Exp(
                    Box::new(Self::from(*bin.lhs)),
                    Box::new(Self::from(*bin.rhs)),
                ),
                // the `Mul` and `Add` operator impls flatten nested products / sums
                BinOpKind::Mul => Self::from(*bin.lhs) * Self::from(*bin.rhs),
                BinOpKind::Add => Self::from(*bin.lhs) + Self::from(*bin.rhs),
                // treat division as lhs * rhs^-1
                BinOpKind::Div => make_fraction(Self::from(*bin.lhs), Self::from(*bin.rhs)),
                // treat subtraction as lhs + -1 * rhs
                BinOpKind::Sub => Self::from(*bin.lhs) + Self::from(*bin.rhs).neg(),
            },
        }
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Add`], in which case both are combined
/// in one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) | (other, Self::Add(mut terms)) => {
                terms.push(other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for the case where
/// the operands are a mix of [`Primary`] and / or [`SymExpr::Mul`], in which case both are
/// combined in one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) | (other, Self::Mul(mut factors)) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a numeric [`Primary`], in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(int)) => Self::Primary(Primary::Integer(-int)),
            Self::Primary(Primary::Float(float)) => Self::Primary(Primary::Float(-float)),
            expr => Self::Primary(Primary::Integer(int(-1))) * expr,
        }
    }
}

#[cfg(test)]
mod tests {
    use mathcheck_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse the given expression and return the [`SymExpr`] representation.
    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::from(expr)
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("(y - 5 + x) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_is_not_semantic_equality() {
        // these are NOT strictly equal (but are semantically equal)
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("2x + 2y - 10");
        assert_ne!(a, b);
    }

    #[test]
    fn strict_equality_counts_duplicates() {
        let a = SymExpr::Mul(vec![
            parse_expr("x"),
            parse_expr("x"),
            parse_expr("y"),
        ]);
        let b = SymExpr::Mul(vec![
            parse_expr("x"),
            parse_expr("y"),
            parse_expr("y"),
        ]);
        assert_ne!(a, b);
    }

    #[test]
    fn simple_expr() {
        let expr = parse_expr("x^2 + 5x + 6");

        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::Exp(
                Box::new(SymExpr::Primary(Primary::Symbol(String::from("x")))),
                Box::new(SymExpr::Primary(Primary::Integer(int(2)))),
            ),
            SymExpr::Mul(vec![
                SymExpr::Primary(Primary::Integer(int(5))),
                SymExpr::Primary(Primary::Symbol(String::from("x"))),
            ]),
            SymExpr::Primary(Primary::Integer(int(6))),
        ]));
    }

    #[test]
    fn division_becomes_reciprocal() {
        let expr = parse_expr("x / 3");

        assert_eq!(expr, SymExpr::Mul(vec![
            SymExpr::Primary(Primary::Symbol(String::from("x"))),
            SymExpr::Exp(
                Box::new(SymExpr::Primary(Primary::Integer(int(3)))),
                Box::new(SymExpr::Primary(Primary::Integer(int(-1)))),
            ),
        ]));
    }

    #[test]
    fn subtraction_becomes_negated_term() {
        let expr = parse_expr("x - 4");

        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::Primary(Primary::Symbol(String::from("x"))),
            SymExpr::Primary(Primary::Integer(int(-4))),
        ]));
    }

    #[test]
    fn nested_sums_are_flattened() {
        let expr = parse_expr("x + (y + (z + 1))");

        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::Primary(Primary::Symbol(String::from("x"))),
            SymExpr::Primary(Primary::Symbol(String::from("y"))),
            SymExpr::Primary(Primary::Symbol(String::from("z"))),
            SymExpr::Primary(Primary::Integer(int(1))),
        ]));
    }

    #[test]
    fn calls_convert_arguments() {
        let expr = parse_expr("sqrt(2x)");

        assert_eq!(expr, SymExpr::Primary(Primary::Call(
            String::from("sqrt"),
            vec![SymExpr::Mul(vec![
                SymExpr::Primary(Primary::Integer(int(2))),
                SymExpr::Primary(Primary::Symbol(String::from("x"))),
            ])],
        )));
    }

    #[test]
    fn fmt_expr() {
        let expr = parse_expr("(x + 1) * 3");
        assert_eq!(expr.to_string(), "(x + 1) * 3");

        let expr = parse_expr("2^(x + 1)");
        assert_eq!(expr.to_string(), "2^(x + 1)");
    }
}
