use logos::{Lexer, Logos};
use std::ops::Range;

/// The different kinds of tokens that appear in math-editor markup.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    /// A backslash command, such as `\frac` or `\sqrt`. The command is identified by its lexeme;
    /// commands the translator does not know pass through unchanged.
    #[regex(r"\\[a-zA-Z]+")]
    Command,

    /// A spacing escape, such as the thin space `\,`. These only affect layout.
    #[token(r"\,")]
    #[token(r"\;")]
    #[token(r"\:")]
    #[token(r"\!")]
    ThinSpace,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    #[token("^")]
    Caret,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    /// A run of digits, optionally with a decimal part.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    /// A run of letters: an identifier or a function name.
    #[regex(r"[a-zA-Z]+")]
    Word,

    #[regex(r".", priority = 0)]
    Symbol,
}

/// A token produced by the markup lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source markup that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme of the token.
    pub lexeme: &'source str,
}

/// Returns an iterator over the token kinds produced by the markup lexer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens in the input. The translator scans this
/// with arbitrary lookahead.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(Ok(kind)) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_and_groups() {
        let kinds = tokenize(r"\frac{a}{2x}")
            .map(|kind| kind.unwrap())
            .collect::<Vec<_>>();

        assert_eq!(kinds, vec![
            TokenKind::Command,
            TokenKind::OpenBrace,
            TokenKind::Word,
            TokenKind::CloseBrace,
            TokenKind::OpenBrace,
            TokenKind::Number,
            TokenKind::Word,
            TokenKind::CloseBrace,
        ]);
    }

    #[test]
    fn spacing_escapes() {
        let kinds = tokenize(r"1\, + \;2")
            .map(|kind| kind.unwrap())
            .collect::<Vec<_>>();

        assert_eq!(kinds, vec![
            TokenKind::Number,
            TokenKind::ThinSpace,
            TokenKind::Whitespace,
            TokenKind::Symbol,
            TokenKind::Whitespace,
            TokenKind::ThinSpace,
            TokenKind::Number,
        ]);
    }
}
