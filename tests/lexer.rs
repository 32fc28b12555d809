use gambl::{
    error::LexError,
    interpreter::lexer::{Lexer, Token, tokenize},
};
use pretty_assertions::assert_eq;

fn kinds(src: &str) -> Vec<Token> {
    tokenize(src).unwrap()
                 .into_iter()
                 .map(|(token, _)| token)
                 .collect()
}

fn ident(name: &str) -> Token {
    Token::Identifier(name.to_string())
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(kinds("if then else while def return ref and or not"),
               vec![Token::If,
                    Token::Then,
                    Token::Else,
                    Token::While,
                    Token::Def,
                    Token::Return,
                    Token::Ref,
                    Token::And,
                    Token::Or,
                    Token::Not]);
    assert_eq!(kinds("iffy return_value _x9 defs"),
               vec![ident("iffy"), ident("return_value"), ident("_x9"), ident("defs")]);
}

#[test]
fn operators_prefer_the_longest_match() {
    assert_eq!(kinds("a == b = c <= d >= e < f > g"),
               vec![ident("a"),
                    Token::EqualEqual,
                    ident("b"),
                    Token::Assign,
                    ident("c"),
                    Token::LessEqual,
                    ident("d"),
                    Token::GreaterEqual,
                    ident("e"),
                    Token::Less,
                    ident("f"),
                    Token::Greater,
                    ident("g")]);
}

#[test]
fn punctuation() {
    assert_eq!(kinds("+-*/%^()[],:;"),
               vec![Token::Plus,
                    Token::Minus,
                    Token::Star,
                    Token::Slash,
                    Token::Percent,
                    Token::Caret,
                    Token::LParen,
                    Token::RParen,
                    Token::LBracket,
                    Token::RBracket,
                    Token::Comma,
                    Token::Colon,
                    Token::Semicolon]);
}

#[test]
fn offsets_are_byte_positions() {
    assert_eq!(tokenize("x  =\n  42").unwrap(),
               vec![(ident("x"), 0), (Token::Assign, 3), (Token::Number(42), 7)]);
}

#[test]
fn comments_and_whitespace_are_skipped() {
    assert_eq!(kinds("1 # one\n\t+ 2 # two"),
               vec![Token::Number(1), Token::Plus, Token::Number(2)]);
    assert_eq!(kinds("   # nothing but a comment"), vec![]);
}

#[test]
fn string_escapes() {
    assert_eq!(kinds(r#""a\"b" "tab\tend" "back\\slash" "\q""#),
               vec![Token::Str("a\"b".to_string()),
                    Token::Str("tab\tend".to_string()),
                    Token::Str("back\\slash".to_string()),
                    Token::Str("q".to_string())]);
}

#[test]
fn lexing_errors() {
    assert_eq!(tokenize("x = 1.25"),
               Err(LexError::FractionalLiteral { literal: "1.25".to_string(),
                                                 offset:  4, }));
    assert_eq!(tokenize("99999999999999999999"),
               Err(LexError::LiteralTooLarge { literal: "99999999999999999999".to_string(),
                                               offset:  0, }));
    assert_eq!(tokenize("a @ b"),
               Err(LexError::UnexpectedCharacter { character: '@',
                                                   offset:    2, }));
    assert!(matches!(tokenize("s = \"open"),
                     Err(LexError::UnterminatedString { offset: 4 })));
}

#[test]
fn lexer_is_restartable() {
    let src = "a + 1";
    let first = Lexer::new(src).collect::<Vec<_>>();
    let second = Lexer::new(src).collect::<Vec<_>>();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}
