use std::fmt;

use logos::Logos;

use crate::error::LexError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
///
/// Keywords are matched as whole words: `iffy` is an identifier, not `if`
/// followed by `fy`. Multi-character operators win over their single-character
/// prefixes, so `==` is never lexed as two `=`.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Number(i64),
    /// A literal with a fractional part such as `1.5`. Rejected by [`Lexer`],
    /// never yielded.
    #[regex(r"[0-9]+\.[0-9]+")]
    Fractional,
    /// Double-quoted string literal with backslash escapes, such as `"cat"`.
    #[regex(r#""([^"\\]|\\.)*""#, unescape, allow_greedy = true)]
    Str(String),
    /// `if`
    #[token("if")]
    If,
    /// `then`
    #[token("then")]
    Then,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `def`
    #[token("def")]
    Def,
    /// `return`
    #[token("return")]
    Return,
    /// `ref`
    #[token("ref")]
    Ref,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// Identifier tokens; variable or function names such as `x` or `factorial`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `=`
    #[token("=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `# Comments` running to the end of the line.
    #[regex(r"#[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Spaces, tabs, feeds and newlines.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Number(n) => return write!(f, "number {n}"),
            Self::Str(s) => return write!(f, "string {s:?}"),
            Self::Identifier(name) => return write!(f, "identifier '{name}'"),
            Self::Fractional => "fractional literal",
            Self::If => "'if'",
            Self::Then => "'then'",
            Self::Else => "'else'",
            Self::While => "'while'",
            Self::Def => "'def'",
            Self::Return => "'return'",
            Self::Ref => "'ref'",
            Self::And => "'and'",
            Self::Or => "'or'",
            Self::Not => "'not'",
            Self::EqualEqual => "'=='",
            Self::LessEqual => "'<='",
            Self::GreaterEqual => "'>='",
            Self::Less => "'<'",
            Self::Greater => "'>'",
            Self::Assign => "'='",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Caret => "'^'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Comma => "','",
            Self::Colon => "':'",
            Self::Semicolon => "';'",
            Self::Comment => "comment",
            Self::Ignored => "whitespace",
        };
        f.write_str(text)
    }
}

/// A token paired with the byte offset where it starts.
pub type Spanned = (Token, usize);

/// Lazy, restartable token stream over a source string.
///
/// Wraps the generated `logos` lexer, attaches byte offsets, and turns
/// unmatched input into [`LexError`]s. Whitespace and comments are never
/// yielded. Creating a new `Lexer` over the same source starts over.
///
/// # Example
/// ```
/// use gambl::interpreter::lexer::{Lexer, Token};
///
/// let tokens = Lexer::new("x = 4 # four").collect::<Result<Vec<_>, _>>()
///                                        .unwrap();
///
/// assert_eq!(tokens,
///            vec![(Token::Identifier("x".to_string()), 0),
///                 (Token::Assign, 2),
///                 (Token::Number(4), 4)]);
/// ```
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, Token>,
}

impl<'source> Lexer<'source> {
    /// Starts lexing `source` from its first byte.
    #[must_use]
    pub fn new(source: &'source str) -> Self {
        Self { inner: Token::lexer(source) }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Spanned, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.inner.next()?;
        let offset = self.inner.span().start;
        let slice = self.inner.slice();

        Some(match token {
            Ok(Token::Fractional) => Err(LexError::FractionalLiteral { literal: slice.to_string(),
                                                                       offset }),
            Ok(token) => Ok((token, offset)),
            Err(()) => Err(classify_error(slice, offset)),
        })
    }
}

/// Tokenizes a complete source string.
///
/// Stops at the first lexical error.
///
/// # Example
/// ```
/// use gambl::{error::LexError, interpreter::lexer::tokenize};
///
/// assert_eq!(tokenize("1 + 2").unwrap().len(), 3);
/// assert_eq!(tokenize("1 $ 2"),
///            Err(LexError::UnexpectedCharacter { character: '$',
///                                                offset:    2, }));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, LexError> {
    Lexer::new(source).collect()
}

/// Works out why `logos` rejected `slice`.
///
/// A run of digits only fails when the integer callback overflows; a leading
/// quote means the string never closed; anything else is a stray character.
fn classify_error(slice: &str, offset: usize) -> LexError {
    if !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit()) {
        return LexError::LiteralTooLarge { literal: slice.to_string(),
                                           offset };
    }
    if slice.starts_with('"') {
        return LexError::UnterminatedString { offset };
    }
    LexError::UnexpectedCharacter { character: slice.chars().next().unwrap_or('\0'),
                                    offset }
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Some(i64)`: The parsed integer value if successful.
/// - `None`: If the literal does not fit in an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Strips the quotes from a string literal and resolves its escapes.
///
/// `\n`, `\t`, `\r` and `\0` map to their control characters; any other
/// escaped character, including `\\` and `\"`, stands for itself.
fn unescape(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let body = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {},
        }
    }
    out
}
