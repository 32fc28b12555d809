use std::iter::Peekable;

use crate::{
    error::{ParseError, SyntaxError},
    interpreter::{
        lexer::{Spanned, Token},
        parser::core::ParseResult,
    },
};

/// Returns the token `n` positions ahead without consuming anything.
///
/// `peek_nth(tokens, 0)` is the same as `tokens.peek()`.
pub(in crate::interpreter::parser) fn peek_nth<'a, I>(tokens: &Peekable<I>,
                                                      n: usize)
                                                      -> Option<&'a Token>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut lookahead = tokens.clone();
    for _ in 0..n {
        lookahead.next();
    }
    lookahead.next().map(|(token, _)| token)
}

/// Builds the error for a token the grammar does not allow here.
///
/// `found` is the offending token, or `None` at end of input.
pub(in crate::interpreter::parser) fn unexpected(expected: impl Into<String>,
                                                 found: Option<&Spanned>)
                                                 -> ParseError {
    let expected = expected.into();
    match found {
        Some((token, offset)) => SyntaxError::UnexpectedToken { expected,
                                                                found: token.to_string(),
                                                                offset: *offset }.into(),
        None => SyntaxError::UnexpectedEndOfInput { expected }.into(),
    }
}

/// Consumes the next token, which must equal `expected`.
///
/// # Returns
/// The byte offset of the consumed token.
///
/// # Errors
/// `UnexpectedToken` naming `expected` and the token found, or
/// `UnexpectedEndOfInput`.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((token, offset)) if token == expected => Ok(*offset),
        found => Err(unexpected(expected.to_string(), found)),
    }
}

/// Consumes the next token if it equals `token`.
///
/// # Returns
/// Whether a token was consumed.
pub(in crate::interpreter::parser) fn eat<'a, I>(tokens: &mut Peekable<I>, token: &Token) -> bool
    where I: Iterator<Item = &'a Spanned>
{
    tokens.next_if(|(next, _)| next == token).is_some()
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, function argument lists
/// and parameter lists. It repeatedly calls `parse_item` to parse one
/// element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut items = Vec::new();
    if eat(tokens, closing) {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((token, _)) if token == closing => break,
            found => return Err(unexpected(format!("',' or {closing}"), found)),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// The next token must be `Token::Identifier`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at an identifier.
///
/// # Returns
/// A `String` containing the identifier.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        found => Err(unexpected("identifier", found)),
    }
}
