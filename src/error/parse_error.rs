/// Errors raised by the lexer.
///
/// Offsets are byte offsets into the source text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that starts no token.
    #[error("unexpected character {character:?} at offset {offset}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character.
        offset:    usize,
    },
    /// A string literal without its closing quote.
    #[error("unterminated string literal starting at offset {offset}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        offset: usize,
    },
    /// A numeric literal with a fractional part. Gambl only has integers.
    #[error("fractional literal {literal} at offset {offset} is not supported, numbers are integers")]
    FractionalLiteral {
        /// The literal as written.
        literal: String,
        /// Byte offset of the literal.
        offset:  usize,
    },
    /// An integer literal that does not fit in 64 bits.
    #[error("integer literal {literal} at offset {offset} is too large")]
    LiteralTooLarge {
        /// The literal as written.
        literal: String,
        /// Byte offset of the literal.
        offset:  usize,
    },
}

/// Errors raised when a token stream does not match the grammar.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Found a token other than the one the grammar requires here.
    #[error("expected {expected}, found {found} at offset {offset}")]
    UnexpectedToken {
        /// What the parser was looking for.
        expected: String,
        /// The token actually found.
        found:    String,
        /// Byte offset of the found token.
        offset:   usize,
    },
    /// The input ended while the grammar still required more.
    #[error("expected {expected}, found end of input")]
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
    },
    /// A complete program was parsed but tokens remain.
    #[error("unexpected {found} at offset {offset} after the end of the program")]
    TrailingInput {
        /// The first unconsumed token.
        found:  String,
        /// Byte offset of that token.
        offset: usize,
    },
}

/// The failure type of [`crate::parse`]: either lexing or parsing went wrong.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The source contains text that is not a token.
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    /// The tokens do not form a program.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}
