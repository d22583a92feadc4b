use std::ops::Range;
use crate::parser::{
    ast::expr::Expr,
    error::kind,
    error::Error,
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression, such as `(1 + 2)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression, unwrapping any nested
    /// parenthesized expressions.
    pub fn into_innermost(self) -> Expr {
        let mut inner = *self.expr;
        while let Expr::Paren(paren) = inner {
            inner = *paren.expr;
        }
        inner
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;

        if input.clone().try_parse::<CloseParen>().is_ok() {
            return Err(input.error_fatal(kind::EmptyParenthesis));
        }

        let expr = input.try_parse::<Expr>()?;
        let close_paren = input.try_parse::<CloseParen>().map_err(|err| {
            if err.fatal {
                err
            } else {
                Error::new_fatal(vec![open_paren.span.clone()], kind::UnclosedParenthesis {
                    opening: true,
                })
            }
        })?;

        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_paren.span.end,
        })
    }
}
