use std::ops::Range;
use crate::parser::{
    ast::{expr::{Expr, Primary}, unary::Unary},
    error::Error,
    token::op::{Associativity, BinOp, BinOpKind, Precedence},
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary operator, possibly implicit.
#[derive(Debug, Clone, PartialEq)]
enum BinOpExt {
    /// A binary operator, such as `+` or `*`.
    Op(BinOp),

    /// Implicit multiplication, such as `2x` or `2(x + 1)`.
    ///
    /// This is not a real operator, but it is treated as one for the purposes of parsing.
    ImplicitMultiplication,
}

impl BinOpExt {
    /// Returns the precedence of the binary operator.
    fn precedence(&self) -> Precedence {
        match self {
            BinOpExt::Op(op) => op.precedence(),
            BinOpExt::ImplicitMultiplication => Precedence::Factor,
        }
    }
}

impl From<BinOp> for BinOpExt {
    fn from(op: BinOp) -> Self {
        BinOpExt::Op(op)
    }
}

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    ///
    /// If we are parsing the expression `1 + 2 * 3`, we will first parse the left-hand-side `1`,
    /// then the operator `+`, then the right-hand-side `2`. However, before we build the
    /// corresponding AST node, we should check if the operator after `2` has higher precedence
    /// than `+` (if it exists).
    ///
    /// If it does, we should parse the expression starting with `2` first, so that we get `2 * 3`
    /// as the right-hand-side to the `1 +` node. If it does not (such as in the expression
    /// `3 * 2 + 1`), we build the AST node `3 * 2` first, and [`Self::parse_expr`] picks up the
    /// `+ 1` part on its next iteration.
    ///
    /// When there is no operator after the right-hand-side at all, the tokens that follow may
    /// still continue `rhs` through implicit multiplication (`1 + 2x y`), which binds as tightly
    /// as `*`. The `changed` boolean returned by [`Self::parse_expr`] tells us whether anything
    /// was actually parsed there; if nothing was, the node is complete.
    fn complete_rhs(
        input: &mut Parser,
        lhs: Expr,
        op: BinOpExt,
        mut rhs: Expr,
    ) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            if let Ok(next_op) = input_ahead.try_parse::<BinOp>() {
                if next_op.precedence() > precedence
                    || next_op.precedence() == precedence
                        && next_op.associativity() == Associativity::Right
                {
                    // this operator has a higher precedence or it is right associative, so we
                    // should parse its expression starting with `rhs` first
                    rhs = Self::parse_expr(input, rhs, next_op.precedence())?.0;
                } else {
                    // this operator has lower precedence, or equal precedence and
                    // left-associativity; break out of the loop and let the outer call pick the
                    // operator up on its next iteration
                    break;
                }
            } else {
                // there is no operator; implicit multiplication can only extend `rhs` if the
                // pending operator binds looser than `*`
                if precedence >= BinOpKind::Mul.precedence() {
                    break;
                }

                let (expr, changed) = Self::parse_expr(input, rhs, BinOpKind::Mul.precedence())?;

                // `rhs = expr;` must happen in all cases, even if `changed` is false, otherwise
                // it would've been moved into `Self::parse_expr` above
                rhs = expr;

                if !changed {
                    break;
                }
            }
        }

        // create the binary node representing `lhs op rhs`
        let (start_span, end_span) = (lhs.span().start, rhs.span().end);
        match op {
            BinOpExt::Op(op) => Ok(Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span: start_span..end_span,
            })),
            BinOpExt::ImplicitMultiplication => {
                let op_span = lhs.span().end..rhs.span().start;
                Ok(Expr::Binary(Binary {
                    lhs: Box::new(lhs),
                    op: BinOp {
                        kind: BinOpKind::Mul,
                        implicit: true,
                        span: op_span,
                    },
                    rhs: Box::new(rhs),
                    span: start_span..end_span,
                }))
            },
        }
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there is a binary operator and a right-hand-side.
    ///
    /// The returned boolean indicates whether any tokens were consumed to extend `lhs`; see
    /// [`Self::complete_rhs`] for why this matters.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<(Expr, bool), Error> {
        let mut changed = false;
        loop {
            let mut input_ahead = input.clone();
            if let Ok(op) = input_ahead.try_parse::<BinOp>() {
                if op.precedence() >= precedence {
                    input.set_cursor(&input_ahead);
                    let rhs = input.try_parse_with_fn(Unary::parse_or_lower)?;
                    lhs = Self::complete_rhs(input, lhs, op.into(), rhs)?;
                } else {
                    break;
                }
            } else if BinOpKind::Mul.precedence() >= precedence {
                // there is no operator; if a primary expression follows, this is implicit
                // multiplication
                match input.try_parse::<Primary>() {
                    Ok(primary) => {
                        lhs = Self::complete_rhs(
                            input,
                            lhs,
                            BinOpExt::ImplicitMultiplication,
                            primary.into(),
                        )?;
                    },
                    Err(err) if err.fatal => return Err(err),
                    Err(_) => break,
                }
            } else {
                break;
            }

            changed = true;
        }

        Ok((lhs, changed))
    }
}
