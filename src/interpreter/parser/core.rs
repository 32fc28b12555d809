use std::iter::Peekable;

use crate::{
    ast::Node,
    error::{ParseError, SyntaxError},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            binary::parse_logical_or,
            statement::parse_statement,
            utils::eat,
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program.
///
/// A program is a `;`-separated sequence of statements. A single statement
/// is returned bare, several are wrapped in a `Node::Block`. A trailing `;`
/// is allowed and an empty input yields an empty block.
///
/// Grammar: `program := statement (";" statement)* [";"]`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, offset)` pairs.
///
/// # Errors
/// Any statement error, or `TrailingInput` if tokens remain after the last
/// statement.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut statements = Vec::new();
    while tokens.peek().is_some() {
        statements.push(parse_statement(tokens)?);
        if !eat(tokens, &Token::Semicolon) {
            break;
        }
    }

    if let Some((token, offset)) = tokens.next() {
        return Err(SyntaxError::TrailingInput { found:  token.to_string(),
                                                offset: *offset, }.into());
    }

    if statements.len() == 1 {
        Ok(statements.remove(0))
    } else {
        Ok(Node::Block(statements))
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing inside brackets,
/// parentheses and argument lists. It begins at the lowest-precedence
/// operator level, logical OR, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := or`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, offset)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    parse_logical_or(tokens)
}

/// Parses an `if` with optional `then` and `else` branches.
///
/// Syntax:
/// ```text
///     if <or> [then <statement>] [else <statement>]
/// ```
/// Without a leading `if` this falls through to [`parse_expression`].
///
/// Branches are full statements, so `if n <= 1 then return 1 else ...`
/// parses.
///
/// # Parameters
/// - `tokens`: Token stream positioned at a possible `if` keyword.
///
/// # Returns
/// A `Node::If`, or the expression when there is no `if`.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    if !eat(tokens, &Token::If) {
        return parse_expression(tokens);
    }

    let condition = parse_expression(tokens)?;

    let then_branch = if eat(tokens, &Token::Then) {
        Some(Box::new(parse_statement(tokens)?))
    } else {
        None
    };

    let else_branch = if eat(tokens, &Token::Else) {
        Some(Box::new(parse_statement(tokens)?))
    } else {
        None
    };

    Ok(Node::If { condition: Box::new(condition),
                  then_branch,
                  else_branch })
}
