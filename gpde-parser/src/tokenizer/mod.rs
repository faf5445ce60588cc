pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Characters that no token matches are kept as [`TokenKind::Symbol`] tokens, so the parser can
/// report them with a span.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: kind.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2.5",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Float, "2.5"),
            ],
        );
    }

    #[test]
    fn operator_expr() {
        compare_tokens(
            "L = alpha*u + dx(u) # heat\nderive(L, xi1)",
            [
                (TokenKind::Name, "L"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Assign, "="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "alpha"),
                (TokenKind::Mul, "*"),
                (TokenKind::Name, "u"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "dx"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "u"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Comment, "# heat"),
                (TokenKind::NewLine, "\n"),
                (TokenKind::Name, "derive"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "L"),
                (TokenKind::Comma, ","),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "xi1"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn unknown_characters() {
        let tokens = tokenize_complete("x $ y");
        let kinds = tokens.iter().map(|token| token.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![
            TokenKind::Name,
            TokenKind::Whitespace,
            TokenKind::Symbol,
            TokenKind::Whitespace,
            TokenKind::Name,
        ]);
    }
}
