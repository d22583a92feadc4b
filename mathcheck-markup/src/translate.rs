//! The markup-to-expression translator.
//!
//! The translator is a single scan over the markup token stream. Each recognized construct is
//! rewritten into an explicit infix *unit* (`\frac{a}{b}` → `(a)/(b)`); everything else passes
//! through as-is. Brace groups are scanned recursively, so constructs nest to arbitrary depth
//! without any rewrite-ordering concerns.

use crate::token::{tokenize_complete, Token, TokenKind};

/// Translates math-editor markup into explicit infix notation.
///
/// This function is total: unrecognized markup passes through unchanged rather than producing an
/// error.
pub fn translate(markup: &str) -> String {
    let tokens = tokenize_complete(markup);
    let mut scanner = Scanner { tokens: &tokens, cursor: 0 };
    let (units, _) = scan_until(&mut scanner, None);
    join_units(units)
}

/// A cursor over the markup token stream.
struct Scanner<'a> {
    tokens: &'a [Token<'a>],
    cursor: usize,
}

impl<'a> Scanner<'a> {
    /// Returns the current token without advancing.
    fn peek(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the current token and advances past it.
    fn bump(&mut self) -> Option<&'a Token<'a>> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(token)
    }

    /// Returns the token before the cursor.
    fn prev(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Advances past whitespace and spacing escapes, which never contribute to the output.
    fn skip_space(&mut self) {
        while let Some(token) = self.peek() {
            if matches!(token.kind, TokenKind::Whitespace | TokenKind::ThinSpace) {
                self.cursor += 1;
            } else {
                break;
            }
        }
    }
}

/// Scans tokens into translated units until the closing token (or the end of the stream) is
/// reached. Returns the units along with whether the closing token was actually found.
fn scan_until(sc: &mut Scanner, closer: Option<TokenKind>) -> (Vec<String>, bool) {
    let mut units = Vec::new();

    while let Some(token) = sc.peek() {
        if Some(token.kind) == closer {
            sc.cursor += 1;
            return (units, true);
        }

        match token.kind {
            TokenKind::Whitespace | TokenKind::ThinSpace => {
                sc.cursor += 1;
            },
            TokenKind::Command => {
                sc.cursor += 1;
                apply_command(sc, token.lexeme, &mut units);
            },
            TokenKind::Caret => {
                sc.cursor += 1;
                sc.skip_space();

                let exponent = match sc.peek().map(|token| token.kind) {
                    Some(TokenKind::OpenBrace) => Some(scan_group(sc)),
                    Some(TokenKind::OpenParen) => Some(scan_paren(sc)),
                    Some(TokenKind::Number) | Some(TokenKind::Word) => {
                        sc.bump().map(|token| token.lexeme.to_string())
                    },
                    _ => None,
                };

                match (units.pop(), exponent) {
                    (Some(base), Some(exponent)) => {
                        units.push(format!("{}^{}", wrap(&base), wrap(&exponent)));
                    },
                    // a caret with a missing side passes through and fails to parse downstream
                    (Some(base), None) => {
                        units.push(base);
                        units.push("^".to_string());
                    },
                    (None, Some(exponent)) => units.push(format!("^{}", exponent)),
                    (None, None) => units.push("^".to_string()),
                }
            },
            TokenKind::OpenParen => {
                units.push(scan_paren(sc));
            },
            TokenKind::Word => {
                let after_digit = sc.prev().map_or(false, |prev| {
                    prev.kind == TokenKind::Number && prev.span.end == token.span.start
                });
                sc.cursor += 1;

                // implicit multiplication between a digit run and a directly adjacent letter run
                // (`2x`); judged on the source tokens, never on rewritten text
                if after_digit {
                    units.push("*".to_string());
                }
                units.push(token.lexeme.to_string());
            },
            _ => {
                // numbers, stray braces / parentheses, and unknown symbols pass through
                sc.cursor += 1;
                units.push(token.lexeme.to_string());
            },
        }
    }

    (units, false)
}

/// Rewrites a single backslash command. The command token itself has already been consumed;
/// commands taking arguments scan their groups here.
fn apply_command(sc: &mut Scanner, lexeme: &str, units: &mut Vec<String>) {
    match lexeme {
        "\\frac" | "\\dfrac" => {
            let numerator = scan_group(sc);
            let denominator = scan_group(sc);
            units.push(format!("({})/({})", numerator, denominator));
        },
        "\\sqrt" => {
            let radicand = scan_group(sc);
            units.push(format!("sqrt({})", radicand));
        },
        // sizing directives only affect layout; their delimiters are kept
        "\\left" | "\\right" => {},
        "\\cdot" | "\\times" => units.push("*".to_string()),
        _ => units.push(lexeme.to_string()),
    }
}

/// Scans a brace-delimited group and returns its translated contents. If no brace follows, the
/// next single token (or construct) is taken as the group, which is how TeX itself reads
/// arguments.
fn scan_group(sc: &mut Scanner) -> String {
    sc.skip_space();
    match sc.peek().map(|token| token.kind) {
        Some(TokenKind::OpenBrace) => {
            sc.cursor += 1;
            let (units, _closed) = scan_until(sc, Some(TokenKind::CloseBrace));
            join_units(units)
        },
        Some(TokenKind::Command) => {
            let mut units = Vec::new();
            if let Some(token) = sc.bump() {
                apply_command(sc, token.lexeme, &mut units);
            }
            join_units(units)
        },
        Some(_) => sc.bump().map(|token| token.lexeme.to_string()).unwrap_or_default(),
        None => String::new(),
    }
}

/// Scans a parenthesized group, consuming the opening parenthesis. An unclosed group is emitted
/// unclosed, preserving the imbalance of the input.
fn scan_paren(sc: &mut Scanner) -> String {
    sc.cursor += 1;
    let (units, closed) = scan_until(sc, Some(TokenKind::CloseParen));
    let inner = join_units(units);
    if closed {
        format!("({})", inner)
    } else {
        format!("({}", inner)
    }
}

/// Joins translated units, inserting the explicit `*` that a closing-then-opening parenthesis
/// pair implies.
fn join_units(units: Vec<String>) -> String {
    let mut out = String::new();
    for unit in units {
        if out.ends_with(')') && unit.starts_with('(') {
            out.push('*');
        }
        out.push_str(&unit);
    }
    out
}

/// Returns true if the text is a single fully parenthesized group, such as `(x)` or
/// `((a)/(b))` — but not `(y)^(z)`, whose leading parenthesis closes before the end.
fn is_wrapped(text: &str) -> bool {
    if !text.starts_with('(') {
        return false;
    }

    let mut depth = 0usize;
    for (idx, byte) in text.bytes().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return idx == text.len() - 1;
                }
            },
            _ => {},
        }
    }

    false
}

/// Parenthesizes the text unless it already is a single parenthesized group.
fn wrap(text: &str) -> String {
    if is_wrapped(text) {
        text.to_string()
    } else {
        format!("({})", text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn fraction() {
        assert_eq!(translate(r"\frac{a}{b}"), "(a)/(b)");
    }

    #[test]
    fn nested_fraction() {
        assert_eq!(translate(r"\frac{\frac{a}{b}}{c}"), "((a)/(b))/(c)");
    }

    #[test]
    fn square_root() {
        assert_eq!(translate(r"\sqrt{2x}"), "sqrt(2*x)");
        assert_eq!(translate(r"2\sqrt{x}"), "2sqrt(x)");
    }

    #[test]
    fn braced_exponent() {
        assert_eq!(translate("x^{2}"), "(x)^(2)");
    }

    #[test]
    fn bare_exponent() {
        assert_eq!(translate("x^2"), "(x)^(2)");
    }

    #[test]
    fn nested_exponent() {
        assert_eq!(translate("x^{y^{z}}"), "(x)^((y)^(z))");
    }

    #[test]
    fn exponent_of_parenthesized_base() {
        assert_eq!(translate("(x+1)^2"), "(x+1)^(2)");
    }

    #[test]
    fn exponent_of_fraction() {
        assert_eq!(translate(r"\frac{a}{b}^2"), "((a)/(b))^(2)");
    }

    #[test]
    fn implicit_multiplication_digit_letter() {
        assert_eq!(translate("2x"), "2*x");
        // two letters form a single identifier
        assert_eq!(translate("xy"), "xy");
        // the rule requires direct adjacency in the source
        assert_eq!(translate("2 x"), "2x");
    }

    #[test]
    fn implicit_multiplication_parens() {
        assert_eq!(translate(r"\left(x+1\right)\left(x-1\right)"), "(x+1)*(x-1)");
        assert_eq!(translate(r"\frac{a}{b}\frac{c}{d}"), "(a)/(b)*(c)/(d)");
    }

    #[test]
    fn explicit_multiplication_commands() {
        assert_eq!(translate(r"2\cdot x"), "2*x");
        assert_eq!(translate(r"a\times b"), "a*b");
    }

    #[test]
    fn strips_spacing() {
        assert_eq!(translate(r"1\, + \;2"), "1+2");
        assert_eq!(translate("x +  y"), "x+y");
    }

    #[test]
    fn unknown_commands_pass_through() {
        assert_eq!(translate(r"\alpha+1"), r"\alpha+1");
    }

    #[test]
    fn unbalanced_input_passes_through() {
        assert_eq!(translate("(("), "((");
        assert_eq!(translate("}x{"), "}x{");
    }

    #[test]
    fn idempotent_on_explicit_input() {
        for explicit in ["2*x", "(x)^(2)", "(a)/(b)", "sqrt(x)", "(x+1)^(2)", "x+y-3"] {
            assert_eq!(translate(explicit), explicit);
        }
    }

    #[test]
    fn translating_twice_is_translating_once() {
        for markup in [r"\frac{a}{b}", "x^{2}", r"2x\sqrt{9}", r"\left(2x\right)^{3}"] {
            let once = translate(markup);
            assert_eq!(translate(&once), once);
        }
    }
}
